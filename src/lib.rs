//! # spectral-fft - small spectral analysis toolkit
//!
//! A radix-2 Cooley–Tukey FFT over split real/imaginary buffers, plus the
//! spectral products usually computed from it: power, magnitude and decibel
//! spectra, the frequency axis of a one-sided spectrum, the analytic signal
//! (Hilbert transform) and the signal envelope.
//!
//! ## Usage
//!
//! ```
//! use spectral_fft::FftContext;
//!
//! let ctx = FftContext::<f64>::new(4)?;
//! let mut re = [1.0, 0.0, -1.0, 0.0];
//! let mut im = [0.0; 4];
//! ctx.fft(&mut re, &mut im)?;
//! assert!((re[1] - 2.0).abs() < 1e-12);
//!
//! let power = ctx.power_spectrum(&[1.0, 1.0])?;
//! assert_eq!(power.len(), ctx.num_positive_bins());
//! # Ok::<(), spectral_fft::FftError>(())
//! ```
//!
//! An [`FftContext`] is built once per transform size and only holds the size
//! and its cosine/sine tables, so one context can serve any number of threads
//! working on their own buffers.
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` for [`FftError`]
//! - `parallel`: spread batch transforms across rayon workers
//! - `verbose-logging`: emit `log` records on planning and batch dispatch
//! - `internal-tests`: in-module property tests (proptest, rand)
//!
//! Only power-of-two sizes are supported.

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

/// Forward a record to `log` when `verbose-logging` is enabled.
macro_rules! verbose {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "verbose-logging")]
        {
            log::$level!($($arg)+);
        }
    };
}

/// Numeric primitives: the [`Float`] trait and complex containers.
pub mod num;

pub mod fft;

/// Power, magnitude and decibel spectra and frequency axes.
pub mod spectrum;

/// Analytic signal and envelope detection.
pub mod hilbert;

#[cfg(feature = "parallel")]
pub use fft::set_parallel_batch_threshold;
pub use fft::{next_pow2, FftContext, FftContext32, FftContext64, FftError};
pub use num::{Complex, Complex32, Complex64, ComplexVec, Float};
