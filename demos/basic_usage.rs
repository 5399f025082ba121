//! Spectrum of a two-tone signal.
use spectral_fft::{FftContext, FftError};
use std::f64::consts::PI;

fn main() -> Result<(), FftError> {
    let sample_rate = 8_000.0;
    let ctx = FftContext::<f64>::new(256)?;
    let signal: Vec<f64> = (0..ctx.size())
        .map(|i| {
            let t = i as f64 / sample_rate;
            (2.0 * PI * 500.0 * t).sin() + 0.25 * (2.0 * PI * 2_000.0 * t).sin()
        })
        .collect();

    let freqs = ctx.rfft_freqs(sample_rate)?;
    let db = ctx.db_spectrum(&signal)?;
    for (f, level) in freqs.iter().zip(db.iter()).filter(|(_, level)| **level > -40.0) {
        println!("{:8.1} Hz  {:7.2} dB", f, level);
    }

    let mut re = signal.clone();
    let mut im = vec![0.0; ctx.size()];
    ctx.fft(&mut re, &mut im)?;
    ctx.ifft(&mut re, &mut im)?;
    let max_err = re
        .iter()
        .zip(signal.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    println!("round trip max error: {:e}", max_err);
    Ok(())
}
