//! Envelope of an amplitude-modulated carrier.
use spectral_fft::{FftContext, FftError};
use std::f64::consts::PI;

fn main() -> Result<(), FftError> {
    let ctx = FftContext::<f64>::new(512)?;
    let n = ctx.size() as f64;
    let signal: Vec<f64> = (0..ctx.size())
        .map(|i| {
            let x = i as f64 / n;
            (1.0 + 0.5 * (2.0 * PI * 2.0 * x).cos()) * (2.0 * PI * 64.0 * x).sin()
        })
        .collect();

    let envelope = ctx.envelope(&signal)?;
    for (i, e) in envelope.iter().enumerate().step_by(32) {
        println!("{:4}  {:6.3}", i, e);
    }
    Ok(())
}
