//! Frequency-domain operators built from a blur kernel's spectrum.

use ndarray::Zip;
use num_complex::Complex;
use tracing::{debug, trace};

use crate::{
    check_positive, check_shape,
    types::{ComplexGrid, RealGrid},
    DeblurError, Result,
};

/// Thresholded inverse filter.
///
/// Cells whose magnitude exceeds `eps * max|H|` get the reciprocal `1 / H`,
/// all others get the real value `1 / (eps * max|H|)`. Smaller `eps` gives
/// sharper results at the cost of amplifying noise.
pub fn compute_inverse_filter(blur_spectrum: &ComplexGrid, eps: f32) -> Result<ComplexGrid> {
    let eps = check_positive("eps", eps)?;

    let magnitudes = blur_spectrum.mapv(|c| c.norm());
    let max_magnitude = peak_magnitude(&magnitudes)?;

    // below the normal range the reciprocal overflows
    let threshold = eps * max_magnitude;
    if !threshold.is_normal() {
        return Err(DeblurError::DegenerateSpectrum);
    }

    let fallback = Complex::new(1.0 / threshold, 0.0);
    let clamped = magnitudes.iter().filter(|&&m| m <= threshold).count();
    debug!(max_magnitude, threshold, clamped, "inverse filter");

    // 1/H as conj(H) / |H| / |H|, so |H|^2 never underflows
    Ok(Zip::from(blur_spectrum)
        .and(&magnitudes)
        .map_collect(|h, &magnitude| {
            if magnitude > threshold {
                h.conj() / magnitude / magnitude
            } else {
                fallback
            }
        }))
}

/// Wiener filter `conj(H) / (|H|^2 + 1 / snr)`.
pub fn compute_wiener_filter(blur_spectrum: &ComplexGrid, snr: f32) -> Result<ComplexGrid> {
    let snr = check_positive("snr", snr)?;
    peak_magnitude(&blur_spectrum.mapv(|c| c.norm()))?;

    let noise_to_signal = 1.0 / snr;
    trace!(noise_to_signal, "wiener filter");

    Ok(blur_spectrum.mapv(|h| h.conj() / (h.norm_sqr() + noise_to_signal)))
}

// largest magnitude, an all-zero spectrum has no inverse
fn peak_magnitude(magnitudes: &RealGrid) -> Result<f32> {
    let max = magnitudes.fold(0.0_f32, |max, &m| max.max(m));
    if max <= 0.0 {
        return Err(DeblurError::DegenerateSpectrum);
    }
    Ok(max)
}

/// Pointwise product of a spectrum and a filter of the same shape.
pub fn apply_filter(spectrum: &ComplexGrid, filter: &ComplexGrid) -> Result<ComplexGrid> {
    check_shape(spectrum.dim(), filter.dim())?;
    Ok(Zip::from(spectrum)
        .and(filter)
        .map_collect(|&value, &weight| value * weight))
}
