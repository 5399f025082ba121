//! Fast Fourier Transform (FFT) engine.
//!
//! This module implements the iterative radix-2 decimation-in-time
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! over split real/imaginary buffers. An [`FftContext`] validates the transform
//! size once and precomputes the cosine and sine tables; it is immutable and can
//! be shared by reference across threads. The kernels overwrite their inputs,
//! and copying wrappers are provided for callers that need the input preserved.

use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use core::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::OnceLock;

pub use crate::num::{
    copy_from_complex, copy_to_complex, Complex, Complex32, Complex64, ComplexVec, Float,
};

/// Smallest batch handed to rayon when no override is present.
#[cfg(feature = "parallel")]
const DEFAULT_PARALLEL_BATCH_THRESHOLD: usize = 4;

/// Runtime override for the parallel batch threshold.
///
/// `0` means no override and the environment/default value is used.
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_OVERRIDE: AtomicUsize = AtomicUsize::new(0);
#[cfg(feature = "parallel")]
static PARALLEL_BATCH_THRESHOLD_ENV: OnceLock<usize> = OnceLock::new();

#[cfg(feature = "parallel")]
fn parallel_batch_threshold() -> usize {
    let override_thr = PARALLEL_BATCH_THRESHOLD_OVERRIDE.load(Ordering::Relaxed);
    if override_thr != 0 {
        return override_thr;
    }
    *PARALLEL_BATCH_THRESHOLD_ENV.get_or_init(|| {
        std::env::var("SPECTRAL_FFT_PAR_BATCH_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v != 0)
            .unwrap_or(DEFAULT_PARALLEL_BATCH_THRESHOLD)
    })
}

/// Set the minimum number of buffers a batch must hold before it is spread
/// across rayon workers.
///
/// Passing `0` reverts to `SPECTRAL_FFT_PAR_BATCH_THRESHOLD` or the built-in default.
#[cfg(feature = "parallel")]
pub fn set_parallel_batch_threshold(threshold: usize) {
    PARALLEL_BATCH_THRESHOLD_OVERRIDE.store(threshold, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    /// The requested transform size is zero or not a power of two.
    NonPowerOfTwo(usize),
    /// A buffer does not have the length the operation requires.
    MismatchedLengths { expected: usize, actual: usize },
    /// More real samples were supplied than the transform can hold.
    InputTooLong { max: usize, actual: usize },
    /// The sample rate is not a finite, strictly positive number.
    InvalidSampleRate,
    /// The operation needs at least one sample.
    EmptyInput,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FftError::NonPowerOfTwo(size) => {
                write!(f, "FFT size {} is not a positive power of two", size)
            }
            FftError::MismatchedLengths { expected, actual } => {
                write!(f, "expected a buffer of length {}, got {}", expected, actual)
            }
            FftError::InputTooLong { max, actual } => {
                write!(f, "input of {} samples exceeds the FFT size {}", actual, max)
            }
            FftError::InvalidSampleRate => write!(f, "sample rate must be finite and positive"),
            FftError::EmptyInput => write!(f, "input slice is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Smallest power of two greater than or equal to `n`.
///
/// Returns `Some(1)` for `0` and `None` when the result does not fit in `usize`.
pub fn next_pow2(n: usize) -> Option<usize> {
    n.checked_next_power_of_two()
}

/// Reverse the lowest `bits` bits of `x`.
#[inline]
fn reverse_bits(x: usize, bits: u32) -> usize {
    if bits == 0 {
        0
    } else {
        x.reverse_bits() >> (usize::BITS - bits)
    }
}

/// Size and trigonometric tables for one transform length.
///
/// Construction is the only place the power-of-two invariant is checked; every
/// operation afterwards only verifies buffer lengths against [`size`](Self::size).
#[derive(Clone, Debug, PartialEq)]
pub struct FftContext<T: Float = f64> {
    size: usize,
    levels: u32,
    /// `cos(2πi/size)` for `i in 0..size/2`.
    cos_table: Vec<T>,
    /// `sin(2πi/size)` for `i in 0..size/2`.
    sin_table: Vec<T>,
}

pub type FftContext32 = FftContext<f32>;
pub type FftContext64 = FftContext<f64>;

impl<T: Float> FftContext<T> {
    /// Build a context for `size`-point transforms.
    ///
    /// # Errors
    /// [`FftError::NonPowerOfTwo`] when `size` is zero or not a power of two.
    pub fn new(size: usize) -> Result<Self, FftError> {
        if !size.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo(size));
        }
        let levels = size.trailing_zeros();
        let half = size / 2;
        let step = T::from_f64(2.0) * T::pi() / T::from_usize(size);
        let mut cos_table = Vec::with_capacity(half);
        let mut sin_table = Vec::with_capacity(half);
        for i in 0..half {
            let angle = step * T::from_usize(i);
            cos_table.push(angle.cos());
            sin_table.push(angle.sin());
        }
        verbose!(debug, "planned {}-point FFT with {} levels", size, levels);
        Ok(Self {
            size,
            levels,
            cos_table,
            sin_table,
        })
    }

    /// Smallest context able to hold `len` samples without truncation.
    pub fn for_len(len: usize) -> Result<Self, FftError> {
        let size = next_pow2(len).ok_or(FftError::NonPowerOfTwo(len))?;
        Self::new(size)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn half_size(&self) -> usize {
        self.size / 2
    }

    /// Bins in a one-sided spectrum, DC through Nyquist.
    pub fn num_positive_bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// `log2(size)`.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    pub fn cos_table(&self) -> &[T] {
        &self.cos_table
    }

    pub fn sin_table(&self) -> &[T] {
        &self.sin_table
    }

    fn check_len(&self, len: usize) -> Result<(), FftError> {
        if len != self.size {
            return Err(FftError::MismatchedLengths {
                expected: self.size,
                actual: len,
            });
        }
        Ok(())
    }

    fn check_pair(&self, re: &[T], im: &[T]) -> Result<(), FftError> {
        self.check_len(re.len())?;
        self.check_len(im.len())
    }

    /// In-place forward DFT of the complex signal `re + i·im`.
    ///
    /// Destructive: both buffers are overwritten with the spectrum. Use
    /// [`fft_copy`](Self::fft_copy) to keep the input.
    ///
    /// # Errors
    /// [`FftError::MismatchedLengths`] if either buffer is not exactly
    /// [`size`](Self::size) long. Buffers are untouched on error.
    pub fn fft(&self, re: &mut [T], im: &mut [T]) -> Result<(), FftError> {
        self.check_pair(re, im)?;
        self.transform(re, im);
        Ok(())
    }

    /// In-place inverse DFT, scaled by `1/size`.
    ///
    /// Runs the forward kernel with the real and imaginary roles swapped,
    /// which equals `conj(FFT(conj(x)))`, then divides by `size`.
    ///
    /// # Errors
    /// Same as [`fft`](Self::fft).
    pub fn ifft(&self, re: &mut [T], im: &mut [T]) -> Result<(), FftError> {
        self.check_pair(re, im)?;
        self.inverse(re, im);
        Ok(())
    }

    /// Swapped-role forward kernel followed by the `1/size` scaling.
    fn inverse(&self, re: &mut [T], im: &mut [T]) {
        self.transform(im, re);
        let scale = T::from_usize(self.size);
        for (r, i) in re.iter_mut().zip(im.iter_mut()) {
            *r = *r / scale;
            *i = *i / scale;
        }
    }

    /// Radix-2 decimation-in-time kernel. Lengths are already validated.
    fn transform(&self, re: &mut [T], im: &mut [T]) {
        let n = self.size;

        // Bit-reversed addressing permutation
        for i in 0..n {
            let j = reverse_bits(i, self.levels);
            if j > i {
                re.swap(i, j);
                im.swap(i, j);
            }
        }

        let mut len = 2;
        while len <= n {
            let half = len / 2;
            let table_step = n / len;
            for start in (0..n).step_by(len) {
                for (j, k) in (start..start + half).zip((0..).step_by(table_step)) {
                    let (c, s) = (self.cos_table[k], self.sin_table[k]);
                    let (xr, xi) = (re[j + half], im[j + half]);
                    let tpre = xr * c + xi * s;
                    let tpim = -xr * s + xi * c;
                    re[j + half] = re[j] - tpre;
                    im[j + half] = im[j] - tpim;
                    re[j] = re[j] + tpre;
                    im[j] = im[j] + tpim;
                }
            }
            len *= 2;
        }
    }

    /// Forward transform into freshly allocated buffers, leaving the input intact.
    pub fn fft_copy(&self, re: &[T], im: &[T]) -> Result<ComplexVec<T>, FftError> {
        self.check_pair(re, im)?;
        let mut out = ComplexVec {
            re: re.to_vec(),
            im: im.to_vec(),
        };
        self.transform(&mut out.re, &mut out.im);
        Ok(out)
    }

    /// Inverse transform into freshly allocated buffers, leaving the input intact.
    pub fn ifft_copy(&self, re: &[T], im: &[T]) -> Result<ComplexVec<T>, FftError> {
        let mut out = ComplexVec {
            re: re.to_vec(),
            im: im.to_vec(),
        };
        self.ifft(&mut out.re, &mut out.im)?;
        Ok(out)
    }

    /// In-place forward transform of interleaved samples.
    pub fn fft_complex(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.check_len(data.len())?;
        let mut split = ComplexVec::from_complex(data);
        self.transform(&mut split.re, &mut split.im);
        copy_to_complex(&split.re, &split.im, data);
        Ok(())
    }

    /// In-place inverse transform of interleaved samples.
    pub fn ifft_complex(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.check_len(data.len())?;
        let mut split = ComplexVec::from_complex(data);
        self.ifft(&mut split.re, &mut split.im)?;
        copy_to_complex(&split.re, &split.im, data);
        Ok(())
    }

    /// Forward transform every signal in `batch` in place.
    ///
    /// All lengths are checked before any buffer is modified. With the
    /// `parallel` feature, batches at or above the configured threshold run on
    /// rayon, each worker owning disjoint buffers and sharing this context.
    pub fn fft_batch(&self, batch: &mut [ComplexVec<T>]) -> Result<(), FftError> {
        for signal in batch.iter() {
            self.check_pair(&signal.re, &signal.im)?;
        }
        self.run_batch(batch, |ctx, signal| {
            ctx.transform(&mut signal.re, &mut signal.im)
        });
        Ok(())
    }

    /// Inverse transform every signal in `batch` in place.
    pub fn ifft_batch(&self, batch: &mut [ComplexVec<T>]) -> Result<(), FftError> {
        for signal in batch.iter() {
            self.check_pair(&signal.re, &signal.im)?;
        }
        self.run_batch(batch, |ctx, signal| {
            ctx.inverse(&mut signal.re, &mut signal.im)
        });
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn run_batch<F>(&self, batch: &mut [ComplexVec<T>], op: F)
    where
        F: Fn(&Self, &mut ComplexVec<T>) + Sync,
    {
        if batch.len() >= parallel_batch_threshold() {
            verbose!(trace, "parallel batch of {} x {}-point", batch.len(), self.size);
            batch.par_iter_mut().for_each(|signal| op(self, signal));
        } else {
            verbose!(trace, "sequential batch of {} x {}-point", batch.len(), self.size);
            batch.iter_mut().for_each(|signal| op(self, signal));
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_batch<F>(&self, batch: &mut [ComplexVec<T>], op: F)
    where
        F: Fn(&Self, &mut ComplexVec<T>),
    {
        verbose!(trace, "sequential batch of {} x {}-point", batch.len(), self.size);
        batch.iter_mut().for_each(|signal| op(self, signal));
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;
    use alloc::vec;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_signal(n: usize, seed: u64) -> (Vec<f64>, Vec<f64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let re = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        let im = (0..n).map(|_| rng.gen_range(-10.0..10.0)).collect();
        (re, im)
    }

    /// Direct O(n²) DFT with the same sign convention as the kernel.
    fn naive_dft(re: &[f64], im: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let n = re.len();
        let mut out_re = vec![0.0; n];
        let mut out_im = vec![0.0; n];
        for k in 0..n {
            for t in 0..n {
                let angle = -2.0 * core::f64::consts::PI * (k * t) as f64 / n as f64;
                let (s, c) = angle.sin_cos();
                out_re[k] += re[t] * c - im[t] * s;
                out_im[k] += re[t] * s + im[t] * c;
            }
        }
        (out_re, out_im)
    }

    #[test]
    fn test_reverse_bits() {
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(5, 0), 0);
        assert_eq!(reverse_bits(1, 1), 1);
    }

    #[test]
    fn test_tables() {
        let ctx = FftContext::<f64>::new(8).unwrap();
        assert_eq!(ctx.cos_table().len(), 4);
        assert!((ctx.cos_table()[2]).abs() < 1e-15);
        assert!((ctx.sin_table()[2] - 1.0).abs() < 1e-15);
        assert!((ctx.sin_table()[1] - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn test_matches_naive_dft() {
        for &n in &[1usize, 2, 4, 8, 32] {
            let ctx = FftContext::<f64>::new(n).unwrap();
            let (re, im) = random_signal(n, n as u64);
            let (want_re, want_im) = naive_dft(&re, &im);
            let got = ctx.fft_copy(&re, &im).unwrap();
            for k in 0..n {
                assert!((got.re[k] - want_re[k]).abs() < 1e-9, "re[{}]", k);
                assert!((got.im[k] - want_im[k]).abs() < 1e-9, "im[{}]", k);
            }
        }
    }

    #[test]
    fn test_rejected_call_leaves_buffers() {
        let ctx = FftContext::<f64>::new(4).unwrap();
        let mut re = vec![1.0, 2.0, 3.0, 4.0];
        let mut im = vec![0.0; 3];
        assert!(ctx.fft(&mut re, &mut im).is_err());
        assert_eq!(re, vec![1.0, 2.0, 3.0, 4.0]);
    }

    proptest! {
        #[test]
        fn prop_fft_ifft_roundtrip(
            levels in 0u32..8,
            ref seed in proptest::collection::vec(-1000.0f64..1000.0, 256),
        ) {
            let n = 1usize << levels;
            let ctx = FftContext::<f64>::new(n).unwrap();
            let mut re: Vec<f64> = seed.iter().take(n).cloned().collect();
            let mut im: Vec<f64> = seed.iter().rev().take(n).cloned().collect();
            let (orig_re, orig_im) = (re.clone(), im.clone());
            ctx.fft(&mut re, &mut im).unwrap();
            ctx.ifft(&mut re, &mut im).unwrap();
            for k in 0..n {
                prop_assert!((re[k] - orig_re[k]).abs() <= 1e-9 * (1.0 + orig_re[k].abs()));
                prop_assert!((im[k] - orig_im[k]).abs() <= 1e-9 * (1.0 + orig_im[k].abs()));
            }
        }

        #[test]
        fn prop_parseval(levels in 1u32..8, seed in any::<u64>()) {
            let n = 1usize << levels;
            let ctx = FftContext::<f64>::new(n).unwrap();
            let (re, im) = random_signal(n, seed);
            let time: f64 = re.iter().zip(im.iter()).map(|(r, i)| r * r + i * i).sum();
            let spec = ctx.fft_copy(&re, &im).unwrap();
            let freq: f64 = spec.re.iter().zip(spec.im.iter()).map(|(r, i)| r * r + i * i).sum();
            prop_assert!((time - freq / n as f64).abs() <= 1e-9 * time.max(1.0));
        }
    }
}
