// Test intent: verifies forward/inverse transform behavior including edge cases.
use spectral_fft::{next_pow2, Complex64, FftContext, FftError};

fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
    let re = (0..n).map(|i| (i as f64 * 0.37).sin() * 3.0).collect();
    let im = (0..n).map(|i| (i as f64 * 1.3).cos() - 0.25).collect();
    (re, im)
}

#[test]
fn rejects_non_power_of_two_sizes() {
    for &n in &[0usize, 3, 6, 12, 1000] {
        assert_eq!(
            FftContext::<f64>::new(n).unwrap_err(),
            FftError::NonPowerOfTwo(n)
        );
    }
}

#[test]
fn derived_sizes() {
    let ctx = FftContext::<f64>::new(64).expect("Invariant: operation should succeed");
    assert_eq!(ctx.size(), 64);
    assert_eq!(ctx.half_size(), 32);
    assert_eq!(ctx.num_positive_bins(), 33);
    assert_eq!(ctx.levels(), 6);
    assert_eq!(ctx.cos_table().len(), 32);
    assert_eq!(ctx.sin_table().len(), 32);

    let one = FftContext::<f64>::new(1).expect("Invariant: operation should succeed");
    assert_eq!(one.levels(), 0);
    assert_eq!(one.num_positive_bins(), 1);
    assert!(one.cos_table().is_empty());
}

#[test]
fn known_four_point_transform() {
    let ctx = FftContext::<f64>::new(4).expect("Invariant: operation should succeed");
    let mut re = [1.0, 0.0, -1.0, 0.0];
    let mut im = [0.0; 4];
    ctx.fft(&mut re, &mut im)
        .expect("Invariant: operation should succeed");
    let want = [0.0, 2.0, 0.0, 2.0];
    for k in 0..4 {
        assert!((re[k] - want[k]).abs() < 1e-12, "re[{}] = {}", k, re[k]);
        assert!(im[k].abs() < 1e-12, "im[{}] = {}", k, im[k]);
    }
}

#[test]
fn impulse_gives_flat_spectrum() {
    let ctx = FftContext::<f64>::new(16).expect("Invariant: operation should succeed");
    let mut re = vec![0.0; 16];
    let mut im = vec![0.0; 16];
    re[0] = 1.0;
    ctx.fft(&mut re, &mut im)
        .expect("Invariant: operation should succeed");
    for k in 0..16 {
        assert!((re[k] - 1.0).abs() < 1e-12);
        assert!(im[k].abs() < 1e-12);
    }
}

#[test]
fn roundtrip_restores_input() {
    for levels in 0..=12 {
        let n = 1usize << levels;
        let ctx = FftContext::<f64>::new(n).expect("Invariant: operation should succeed");
        let (mut re, mut im) = ramp(n);
        let (orig_re, orig_im) = (re.clone(), im.clone());
        ctx.fft(&mut re, &mut im)
            .expect("Invariant: operation should succeed");
        ctx.ifft(&mut re, &mut im)
            .expect("Invariant: operation should succeed");
        for k in 0..n {
            assert!((re[k] - orig_re[k]).abs() < 1e-9, "n={} re[{}]", n, k);
            assert!((im[k] - orig_im[k]).abs() < 1e-9, "n={} im[{}]", n, k);
        }
    }
}

#[test]
fn parseval_holds() {
    let n = 256;
    let ctx = FftContext::<f64>::new(n).expect("Invariant: operation should succeed");
    let (re, im) = ramp(n);
    let time: f64 = re.iter().zip(&im).map(|(r, i)| r * r + i * i).sum();
    let spec = ctx
        .fft_copy(&re, &im)
        .expect("Invariant: operation should succeed");
    let freq: f64 = spec.re.iter().zip(&spec.im).map(|(r, i)| r * r + i * i).sum();
    assert!((time - freq / n as f64).abs() < 1e-9 * time);
}

#[test]
fn wrong_lengths_are_rejected() {
    let ctx = FftContext::<f64>::new(8).expect("Invariant: operation should succeed");
    let mut short = vec![0.0; 7];
    let mut ok = vec![0.0; 8];
    assert_eq!(
        ctx.fft(&mut short, &mut ok),
        Err(FftError::MismatchedLengths {
            expected: 8,
            actual: 7
        })
    );
    assert_eq!(
        ctx.ifft(&mut ok, &mut short),
        Err(FftError::MismatchedLengths {
            expected: 8,
            actual: 7
        })
    );
    assert!(ctx.fft_copy(&ok, &short).is_err());
    let mut interleaved = vec![Complex64::zero(); 9];
    assert!(ctx.fft_complex(&mut interleaved).is_err());
}

#[test]
fn copy_wrappers_preserve_input() {
    let ctx = FftContext::<f64>::new(32).expect("Invariant: operation should succeed");
    let (re, im) = ramp(32);
    let spec = ctx
        .fft_copy(&re, &im)
        .expect("Invariant: operation should succeed");

    let (mut in_place_re, mut in_place_im) = (re.clone(), im.clone());
    ctx.fft(&mut in_place_re, &mut in_place_im)
        .expect("Invariant: operation should succeed");
    assert_eq!(spec.re, in_place_re);
    assert_eq!(spec.im, in_place_im);

    let back = ctx
        .ifft_copy(&spec.re, &spec.im)
        .expect("Invariant: operation should succeed");
    for k in 0..32 {
        assert!((back.re[k] - re[k]).abs() < 1e-9);
        assert!((back.im[k] - im[k]).abs() < 1e-9);
    }
}

#[test]
fn interleaved_matches_split() {
    let ctx = FftContext::<f64>::new(16).expect("Invariant: operation should succeed");
    let (re, im) = ramp(16);
    let mut data: Vec<Complex64> = re
        .iter()
        .zip(&im)
        .map(|(&r, &i)| Complex64::new(r, i))
        .collect();
    let spec = ctx
        .fft_copy(&re, &im)
        .expect("Invariant: operation should succeed");
    ctx.fft_complex(&mut data)
        .expect("Invariant: operation should succeed");
    for k in 0..16 {
        assert_eq!(data[k].re, spec.re[k]);
        assert_eq!(data[k].im, spec.im[k]);
    }
    ctx.ifft_complex(&mut data)
        .expect("Invariant: operation should succeed");
    for k in 0..16 {
        assert!((data[k].re - re[k]).abs() < 1e-9);
        assert!((data[k].im - im[k]).abs() < 1e-9);
    }
}

#[test]
fn single_precision_roundtrip() {
    let ctx = FftContext::<f32>::new(128).expect("Invariant: operation should succeed");
    let mut re: Vec<f32> = (0..128).map(|i| (i as f32 * 0.1).sin()).collect();
    let mut im = vec![0.0f32; 128];
    let orig = re.clone();
    ctx.fft(&mut re, &mut im)
        .expect("Invariant: operation should succeed");
    ctx.ifft(&mut re, &mut im)
        .expect("Invariant: operation should succeed");
    for (a, b) in re.iter().zip(orig.iter()) {
        assert!((a - b).abs() < 1e-4);
    }
}

#[test]
fn next_pow2_and_for_len() {
    assert_eq!(next_pow2(0), Some(1));
    assert_eq!(next_pow2(1), Some(1));
    assert_eq!(next_pow2(5), Some(8));
    assert_eq!(next_pow2(64), Some(64));
    assert_eq!(next_pow2(usize::MAX), None);
    let ctx = FftContext::<f64>::for_len(100).expect("Invariant: operation should succeed");
    assert_eq!(ctx.size(), 128);
}

#[test]
fn error_messages() {
    assert_eq!(
        FftError::NonPowerOfTwo(6).to_string(),
        "FFT size 6 is not a positive power of two"
    );
    assert_eq!(
        FftError::MismatchedLengths {
            expected: 8,
            actual: 7
        }
        .to_string(),
        "expected a buffer of length 8, got 7"
    );
}
