//! Demonstrates enabling verbose logging for spectral-fft.
use spectral_fft::{ComplexVec, FftContext};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Trace)
        .init();

    let ctx = FftContext::<f32>::new(64).unwrap();
    let mut batch = vec![ComplexVec::<f32>::zeros(64); 8];
    ctx.fft_batch(&mut batch).unwrap();
    let _ = ctx.power_spectrum(&[1.0, 2.0, 3.0, 4.0]).unwrap();
}
