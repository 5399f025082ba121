//! Hilbert transform module
//! Analytic signal construction and envelope detection via FFT
//! no_std + alloc compatible

use alloc::vec::Vec;

use crate::fft::{ComplexVec, FftContext, FftError, Float};

impl<T: Float> FftContext<T> {
    /// Analytic signal of the real input, zero-padded to `size`.
    ///
    /// The spectrum is weighted by `1` at DC and Nyquist, `2` on positive
    /// frequencies and `0` on negative frequencies, then inverse transformed.
    /// The real part reproduces the (padded) input; the imaginary part is its
    /// Hilbert transform.
    ///
    /// # Errors
    /// [`FftError::InputTooLong`] if `samples` holds more than `size` values.
    pub fn hilbert(&self, samples: &[T]) -> Result<ComplexVec<T>, FftError> {
        let (mut re, mut im) = self.padded(samples)?;
        self.fft(&mut re, &mut im)?;

        let half = self.half_size();
        let two = T::from_f64(2.0);
        for k in 0..self.size() {
            if k == 0 || k == half {
                continue;
            }
            let weight = if k < half { two } else { T::zero() };
            re[k] = re[k] * weight;
            im[k] = im[k] * weight;
        }

        self.ifft(&mut re, &mut im)?;
        ComplexVec::new(re, im)
    }

    /// Instantaneous amplitude of `samples`, `size` values long.
    ///
    /// The mean of `samples` is removed before the Hilbert transform and added
    /// back to the magnitude of the analytic signal.
    ///
    /// # Errors
    /// [`FftError::EmptyInput`] for an empty slice, [`FftError::InputTooLong`]
    /// if `samples` holds more than `size` values.
    pub fn envelope(&self, samples: &[T]) -> Result<Vec<T>, FftError> {
        if samples.is_empty() {
            return Err(FftError::EmptyInput);
        }
        let sum = samples.iter().fold(T::zero(), |acc, &x| acc + x);
        let dc = sum / T::from_usize(samples.len());
        let centred: Vec<T> = samples.iter().map(|&x| x - dc).collect();
        let analytic = self.hilbert(&centred)?;
        Ok(analytic.magnitudes().into_iter().map(|m| m + dc).collect())
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;

    #[test]
    fn test_hilbert_analytic() {
        let ctx = FftContext::<f64>::new(4).unwrap();
        let analytic = ctx.hilbert(&[1.0, 0.0, -1.0, 0.0]).unwrap();
        assert_eq!(analytic.len(), 4);
        // cos -> cos + i·sin
        let want_im = [0.0, 1.0, 0.0, -1.0];
        for k in 0..4 {
            assert!((analytic.im[k] - want_im[k]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hilbert_errors() {
        let ctx = FftContext::<f64>::new(2).unwrap();
        assert_eq!(
            ctx.hilbert(&[1.0, 2.0, 3.0]).unwrap_err(),
            FftError::InputTooLong { max: 2, actual: 3 }
        );
        assert_eq!(ctx.envelope(&[]).unwrap_err(), FftError::EmptyInput);
    }

    #[test]
    fn test_single_point() {
        let ctx = FftContext::<f64>::new(1).unwrap();
        let analytic = ctx.hilbert(&[3.0]).unwrap();
        assert!((analytic.re[0] - 3.0).abs() < 1e-12);
        assert!(analytic.im[0].abs() < 1e-12);
        assert_eq!(ctx.envelope(&[3.0]).unwrap(), vec![3.0]);
    }
}
