//! One-sided spectra of real signals.
//!
//! Every function zero-pads its input up to the context size, runs a single
//! forward transform and keeps bins `0..=size/2`.

use alloc::vec;
use alloc::vec::Vec;

use crate::fft::{FftContext, FftError, Float};

/// Power floor applied before taking a logarithm, giving at least -120 dB.
const MIN_DB_POWER: f64 = 1e-12;

impl<T: Float> FftContext<T> {
    /// Copy `samples` into a zero-padded real buffer and a zeroed imaginary buffer.
    pub(crate) fn padded(&self, samples: &[T]) -> Result<(Vec<T>, Vec<T>), FftError> {
        if samples.len() > self.size() {
            return Err(FftError::InputTooLong {
                max: self.size(),
                actual: samples.len(),
            });
        }
        let mut re = vec![T::zero(); self.size()];
        re[..samples.len()].copy_from_slice(samples);
        Ok((re, vec![T::zero(); self.size()]))
    }

    /// One-sided power spectrum `(re² + im²) / size²`.
    ///
    /// Interior bins are not doubled, so the result is half the conventional
    /// one-sided power density there.
    ///
    /// # Errors
    /// [`FftError::InputTooLong`] if `samples` holds more than `size` values.
    pub fn power_spectrum(&self, samples: &[T]) -> Result<Vec<T>, FftError> {
        let (mut re, mut im) = self.padded(samples)?;
        self.fft(&mut re, &mut im)?;
        let n = T::from_usize(self.size());
        let scale = n * n;
        Ok(re
            .iter()
            .zip(im.iter())
            .take(self.num_positive_bins())
            .map(|(&r, &i)| (r * r + i * i) / scale)
            .collect())
    }

    /// Elementwise square root of [`power_spectrum`](Self::power_spectrum).
    pub fn magnitude_spectrum(&self, samples: &[T]) -> Result<Vec<T>, FftError> {
        Ok(self
            .power_spectrum(samples)?
            .into_iter()
            .map(|p| p.sqrt())
            .collect())
    }

    /// Power spectrum in decibels, `10·log10(max(power, 1e-12))`.
    ///
    /// A NaN power bin stays NaN rather than being clamped to the floor.
    pub fn db_spectrum(&self, samples: &[T]) -> Result<Vec<T>, FftError> {
        let floor = T::from_f64(MIN_DB_POWER);
        let ten = T::from_f64(10.0);
        Ok(self
            .power_spectrum(samples)?
            .into_iter()
            .map(|p| {
                // NaN fails the comparison and passes through.
                let clamped = if p < floor { floor } else { p };
                ten * clamped.log10()
            })
            .collect())
    }

    /// Centre frequency of each one-sided bin, `k · sample_rate / size`.
    ///
    /// # Errors
    /// [`FftError::InvalidSampleRate`] unless `sample_rate` is finite and positive.
    pub fn rfft_freqs(&self, sample_rate: T) -> Result<Vec<T>, FftError> {
        if !sample_rate.is_finite() || sample_rate <= T::zero() {
            return Err(FftError::InvalidSampleRate);
        }
        let resolution = sample_rate / T::from_usize(self.size());
        Ok((0..self.num_positive_bins())
            .map(|k| resolution * T::from_usize(k))
            .collect())
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        let ctx = FftContext::<f64>::new(8).unwrap();
        let (re, im) = ctx.padded(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(re, vec![1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(im.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_dc_power() {
        // A constant of 1 puts all energy in bin 0: |8|² / 8² = 1.
        let ctx = FftContext::<f64>::new(8).unwrap();
        let power = ctx.power_spectrum(&[1.0; 8]).unwrap();
        assert!((power[0] - 1.0).abs() < 1e-12);
        assert!(power[1..].iter().all(|&p| p.abs() < 1e-24));
    }

    #[test]
    fn test_f32_db_floor() {
        let ctx = FftContext::<f32>::new(4).unwrap();
        let db = ctx.db_spectrum(&[0.0f32; 4]).unwrap();
        for v in db {
            assert!((v + 120.0).abs() < 1e-3, "{}", v);
        }
    }
}
