use alloc::vec;
use alloc::vec::Vec;

use crate::fft::FftError;

// Minimal float trait for the generic transforms (no_std, math through libm)
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + core::fmt::Debug
    + core::ops::Add<Output = Self>
    + core::ops::Sub<Output = Self>
    + core::ops::Mul<Output = Self>
    + core::ops::Div<Output = Self>
    + core::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    fn zero() -> Self;
    fn one() -> Self;
    fn from_f64(x: f64) -> Self;
    /// Lossy conversion used for lengths and bin indices.
    fn from_usize(x: usize) -> Self;
    fn cos(self) -> Self;
    fn sin(self) -> Self;
    fn sqrt(self) -> Self;
    fn log10(self) -> Self;
    fn is_finite(self) -> bool;
    fn pi() -> Self;
}

impl Float for f32 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x as f32
    }
    fn from_usize(x: usize) -> Self {
        x as f32
    }
    fn cos(self) -> Self {
        libm::cosf(self)
    }
    fn sin(self) -> Self {
        libm::sinf(self)
    }
    fn sqrt(self) -> Self {
        libm::sqrtf(self)
    }
    fn log10(self) -> Self {
        libm::log10f(self)
    }
    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
    fn pi() -> Self {
        core::f32::consts::PI
    }
}

impl Float for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
    fn from_f64(x: f64) -> Self {
        x
    }
    fn from_usize(x: usize) -> Self {
        x as f64
    }
    fn cos(self) -> Self {
        libm::cos(self)
    }
    fn sin(self) -> Self {
        libm::sin(self)
    }
    fn sqrt(self) -> Self {
        libm::sqrt(self)
    }
    fn log10(self) -> Self {
        libm::log10(self)
    }
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
    fn pi() -> Self {
        core::f64::consts::PI
    }
}

/// Interleaved complex sample.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex<T: Float> {
    pub re: T,
    pub im: T,
}

impl<T: Float> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
    pub fn zero() -> Self {
        Self {
            re: T::zero(),
            im: T::zero(),
        }
    }
    #[inline(always)]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }
    #[inline(always)]
    pub fn norm_sqr(self) -> T {
        self.re * self.re + self.im * self.im
    }
    #[inline(always)]
    pub fn abs(self) -> T {
        self.norm_sqr().sqrt()
    }
}

impl<T: Float> core::ops::Neg for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl<T: Float> core::ops::Add for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }
}

impl<T: Float> core::ops::Sub for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, other: Self) -> Self {
        Self {
            re: self.re - other.re,
            im: self.im - other.im,
        }
    }
}

impl<T: Float> core::ops::Mul for Complex<T> {
    type Output = Self;
    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
}

pub type Complex32 = Complex<f32>;
pub type Complex64 = Complex<f64>;

/// Owned complex signal in split (structure-of-arrays) storage: one vector of
/// real parts and one of imaginary parts, always the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexVec<T: Float> {
    pub re: Vec<T>,
    pub im: Vec<T>,
}

impl<T: Float> ComplexVec<T> {
    /// Pair up `re` and `im`, rejecting parts of different lengths.
    pub fn new(re: Vec<T>, im: Vec<T>) -> Result<Self, FftError> {
        if re.len() != im.len() {
            return Err(FftError::MismatchedLengths {
                expected: re.len(),
                actual: im.len(),
            });
        }
        Ok(Self { re, im })
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            re: vec![T::zero(); len],
            im: vec![T::zero(); len],
        }
    }

    /// Real signal with a zero imaginary part.
    pub fn from_real(re: &[T]) -> Self {
        Self {
            re: re.to_vec(),
            im: vec![T::zero(); re.len()],
        }
    }

    pub fn len(&self) -> usize {
        self.re.len()
    }
    pub fn is_empty(&self) -> bool {
        self.re.is_empty()
    }

    pub fn as_slices(&self) -> (&[T], &[T]) {
        (&self.re, &self.im)
    }

    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        (&mut self.re, &mut self.im)
    }

    /// Elementwise `sqrt(re² + im²)`.
    pub fn magnitudes(&self) -> Vec<T> {
        self.re
            .iter()
            .zip(self.im.iter())
            .map(|(&re, &im)| (re * re + im * im).sqrt())
            .collect()
    }

    pub fn from_complex(v: &[Complex<T>]) -> Self {
        let mut out = Self::zeros(v.len());
        copy_from_complex(v, &mut out.re, &mut out.im);
        out
    }

    pub fn to_complex_vec(&self) -> Vec<Complex<T>> {
        let mut out = vec![Complex::zero(); self.len()];
        copy_to_complex(&self.re, &self.im, &mut out);
        out
    }
}

impl<T: Float> From<Vec<Complex<T>>> for ComplexVec<T> {
    fn from(v: Vec<Complex<T>>) -> Self {
        Self::from_complex(&v)
    }
}

impl<T: Float> From<ComplexVec<T>> for Vec<Complex<T>> {
    fn from(cv: ComplexVec<T>) -> Self {
        cv.to_complex_vec()
    }
}

/// Split interleaved samples into `re`/`im`. All three slices must share a length.
pub fn copy_from_complex<T: Float>(input: &[Complex<T>], re: &mut [T], im: &mut [T]) {
    for ((c, r), i) in input.iter().zip(re.iter_mut()).zip(im.iter_mut()) {
        *r = c.re;
        *i = c.im;
    }
}

/// Interleave `re`/`im` into `out`. All three slices must share a length.
pub fn copy_to_complex<T: Float>(re: &[T], im: &[T], out: &mut [Complex<T>]) {
    for ((c, &r), &i) in out.iter_mut().zip(re.iter()).zip(im.iter()) {
        c.re = r;
        c.im = i;
    }
}

#[cfg(all(feature = "internal-tests", test))]
mod tests {
    use super::*;

    #[test]
    fn test_complex_operations() {
        let a = Complex64::new(1.0, -2.0);
        let b = Complex64::new(3.0, 4.0);
        let c = a * b;
        assert!((c.re - (1.0 * 3.0 - (-2.0) * 4.0)).abs() < 1e-12);
        assert!((c.im - (1.0 * 4.0 + (-2.0) * 3.0)).abs() < 1e-12);
        let n = -a;
        assert_eq!(n.re, -1.0);
        assert_eq!(n.im, 2.0);
        assert_eq!(a.conj().im, 2.0);
        assert!((b.abs() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_complex_vec_rejects_uneven_parts() {
        let err = ComplexVec::<f64>::new(vec![0.0; 4], vec![0.0; 3]).unwrap_err();
        assert_eq!(
            err,
            FftError::MismatchedLengths {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_interleave_roundtrip() {
        let data = vec![Complex64::new(1.0, 2.0), Complex64::new(-3.0, 0.5)];
        let split = ComplexVec::from_complex(&data);
        assert_eq!(split.re, vec![1.0, -3.0]);
        assert_eq!(split.im, vec![2.0, 0.5]);
        assert_eq!(Vec::from(split), data);
    }
}
