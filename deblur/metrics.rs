use ndarray::Zip;

use crate::{
    check_shape,
    types::{RealGrid, PEAK},
    DeblurError, Result,
};

/// Mean squared difference between two grids of equal shape.
pub fn mse(reference: &RealGrid, other: &RealGrid) -> Result<f32> {
    check_shape(reference.dim(), other.dim())?;
    if reference.is_empty() {
        return Err(DeblurError::EmptyGrid);
    }

    let mut sum = 0.0_f64;
    Zip::from(reference).and(other).for_each(|&a, &b| {
        let d = a as f64 - b as f64;
        sum += d * d;
    });
    Ok((sum / reference.len() as f64) as f32)
}

/// Peak signal to noise ratio in dB for 8 bit sample ranges.
/// Identical grids give `f32::INFINITY`.
pub fn psnr(reference: &RealGrid, other: &RealGrid) -> Result<f32> {
    let mse = mse(reference, other)?;
    Ok(10.0 * (PEAK * PEAK / mse).log10())
}
