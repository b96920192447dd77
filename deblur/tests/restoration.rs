use ndarray::Array2;

use approx::assert_abs_diff_eq;
use deblur::{
    degrade::{convolve, degrade_image},
    inverse_filter,
    metrics::psnr,
    types::{DEFAULT_EPS, PEAK},
    wiener_filter, Kernel, RealGrid,
};

// ---------------------------------------------------------------------------
// Test images
// ---------------------------------------------------------------------------

/// Low-frequency pattern, fully representable after a mild blur.
fn smooth_image(shape: (usize, usize)) -> RealGrid {
    let (rows, cols) = shape;
    Array2::from_shape_fn(shape, |(r, c)| {
        let x = 2.0 * std::f32::consts::PI * c as f32 / cols as f32;
        let y = 2.0 * std::f32::consts::PI * r as f32 / rows as f32;
        128.0 + 50.0 * (3.0 * x).sin() + 40.0 * (2.0 * y).cos()
    })
}

/// A bright rectangle and disc over a gentle ramp, values within [60, 180].
fn shapes_image(shape: (usize, usize)) -> RealGrid {
    Array2::from_shape_fn(shape, |(r, c)| {
        let mut v = 60.0 + 0.5 * c as f32;
        if (10..30).contains(&r) && (8..40).contains(&c) {
            v += 100.0;
        }
        let (dr, dc) = (r as f32 - 44.0, c as f32 - 44.0);
        if dr * dr + dc * dc < 144.0 {
            v += 60.0;
        }
        v
    })
}

/// Deterministic zero-mean perturbation in [-1, 1] from a multiplicative hash.
fn hashed_noise(shape: (usize, usize)) -> RealGrid {
    let (_, cols) = shape;
    Array2::from_shape_fn(shape, |(r, c)| {
        let h = ((r * cols + c) as u32).wrapping_mul(2654435761) >> 24;
        (h as f32 - 127.5) / 127.5
    })
}

fn assert_close(a: &RealGrid, b: &RealGrid, tolerance: f32) {
    assert_eq!(a.dim(), b.dim());
    for ((idx, x), y) in a.indexed_iter().zip(b.iter()) {
        assert!((x - y).abs() < tolerance, "{idx:?}: {x} vs {y}");
    }
}

// ---------------------------------------------------------------------------
// Noise-free blur
// ---------------------------------------------------------------------------

#[test]
fn inverse_filter_recovers_noise_free_blur() {
    let image = smooth_image((64, 64));
    let kernel = Kernel::gaussian(2.0).unwrap();
    let blurred = convolve(&image, &kernel).unwrap();

    let restored = inverse_filter(&blurred, &kernel, DEFAULT_EPS).unwrap();
    assert_close(&restored, &image, 0.5);
}

#[test]
fn wiener_filter_recovers_noise_free_blur() {
    let image = smooth_image((48, 40));
    let kernel = Kernel::gaussian(1.5).unwrap();
    let blurred = convolve(&image, &kernel).unwrap();

    let restored = wiener_filter(&blurred, &kernel, 1e4).unwrap();
    assert_close(&restored, &image, 0.5);
}

// ---------------------------------------------------------------------------
// Blur plus noise
// ---------------------------------------------------------------------------

#[test]
fn wiener_filter_improves_psnr() {
    let image = shapes_image((64, 64));
    let degraded = degrade_image(&image, 2.0, 100.0, 1).unwrap();

    let restored = wiener_filter(&degraded.image, &degraded.kernel, 100.0).unwrap();
    assert_eq!(restored.dim(), image.dim());
    assert!(restored.iter().all(|v| v.is_finite()));

    let before = psnr(&image, &degraded.image).unwrap();
    let after = psnr(&image, &restored).unwrap();
    assert!(after > before, "PSNR went from {before} to {after}");
}

#[test]
fn tiny_threshold_amplifies_noise() {
    let image = shapes_image((64, 64));
    let degraded = degrade_image(&image, 2.0, 100.0, 1).unwrap();

    let coarse = inverse_filter(&degraded.image, &degraded.kernel, 0.1).unwrap();
    let fine = inverse_filter(&degraded.image, &degraded.kernel, 0.01).unwrap();
    assert!(coarse.iter().chain(fine.iter()).all(|v| v.is_finite()));

    let coarse = psnr(&image, &coarse).unwrap();
    let fine = psnr(&image, &fine).unwrap();
    assert!(coarse > fine + 5.0, "eps 0.1: {coarse} dB, eps 0.01: {fine} dB");
}

#[test]
fn reference_psnr_values() {
    let image = shapes_image((64, 64));
    let kernel = Kernel::gaussian(2.0).unwrap();
    let mut degraded = convolve(&image, &kernel).unwrap() + hashed_noise((64, 64));
    degraded.mapv_inplace(|v| v.clamp(0.0, PEAK));

    assert_abs_diff_eq!(psnr(&image, &degraded).unwrap(), 26.3607, epsilon = 0.01);

    for (eps, expected) in [(1.0, 26.3607), (0.1, 28.0740), (0.01, 12.8821)] {
        let restored = inverse_filter(&degraded, &kernel, eps).unwrap();
        let score = psnr(&image, &restored).unwrap();
        assert_abs_diff_eq!(score, expected, epsilon = 0.01);
    }

    for (snr, expected) in [(10.0, 24.8350), (100.0, 28.8518)] {
        let restored = wiener_filter(&degraded, &kernel, snr).unwrap();
        let score = psnr(&image, &restored).unwrap();
        assert_abs_diff_eq!(score, expected, epsilon = 0.01);
    }
}

#[test]
fn restoration_is_reproducible() {
    let image = shapes_image((32, 48));
    let a = degrade_image(&image, 1.0, 50.0, 99).unwrap();
    let b = degrade_image(&image, 1.0, 50.0, 99).unwrap();

    assert_eq!(
        wiener_filter(&a.image, &a.kernel, 50.0).unwrap(),
        wiener_filter(&b.image, &b.kernel, 50.0).unwrap()
    );
}

#[test]
fn inputs_are_not_mutated() {
    let image = shapes_image((32, 32));
    let degraded = degrade_image(&image, 1.0, 20.0, 3).unwrap();
    let (before_image, before_kernel) = (degraded.image.clone(), degraded.kernel.clone());

    let _ = inverse_filter(&degraded.image, &degraded.kernel, 0.05).unwrap();
    let _ = wiener_filter(&degraded.image, &degraded.kernel, 20.0).unwrap();

    assert_eq!(degraded.image, before_image);
    assert_eq!(degraded.kernel, before_kernel);
}
