//! Synthetic degradation: circular blur plus additive Gaussian noise.
//!
//! Used to produce test inputs whose blur kernel is known exactly.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Normal;
use tracing::debug;

use crate::{
    check_positive,
    filter::apply_filter,
    kernel::Kernel,
    transform,
    types::{RealGrid, PEAK},
    DeblurError, Result,
};

/// A degraded image together with the kernel that blurred it.
#[derive(Debug, Clone)]
pub struct Degraded {
    pub image: RealGrid,
    pub kernel: Kernel,
}

/// Circular convolution of `image` with `kernel`, computed in the frequency domain.
pub fn convolve(image: &RealGrid, kernel: &Kernel) -> Result<RealGrid> {
    if image.is_empty() {
        return Err(DeblurError::EmptyGrid);
    }

    let kernel_spectrum = kernel.spectrum(image.dim())?;
    let image_spectrum = transform::forward(image);
    Ok(transform::inverse(&apply_filter(
        &image_spectrum,
        &kernel_spectrum,
    )?))
}

/// Blurs `image` with `kernel`, adds zero-mean Gaussian noise with standard
/// deviation `stddev(image) / snr` and clamps the result to `[0, 255]`.
pub fn degrade<R: Rng + ?Sized>(
    image: &RealGrid,
    kernel: &Kernel,
    snr: f32,
    rng: &mut R,
) -> Result<RealGrid> {
    let snr = check_positive("snr", snr)?;
    let mut degraded = convolve(image, kernel)?;

    let noise_std_dev = std_dev(image) / snr;
    debug!(noise_std_dev, "degrading image");

    let noise = Normal::new(0.0, noise_std_dev).map_err(|_| DeblurError::InvalidParameter {
        name: "snr",
        value: snr,
    })?;

    degraded.mapv_inplace(|v| (v + rng.sample(noise)).clamp(0.0, PEAK));
    Ok(degraded)
}

/// Degrades `image` with a Gaussian blur of `filter_dev` and noise at `snr`,
/// using a deterministic generator seeded with `seed`.
pub fn degrade_image(image: &RealGrid, filter_dev: f32, snr: f32, seed: u64) -> Result<Degraded> {
    let kernel = Kernel::gaussian(filter_dev)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let image = degrade(image, &kernel, snr, &mut rng)?;
    Ok(Degraded { image, kernel })
}

// population standard deviation
fn std_dev(grid: &RealGrid) -> f32 {
    let n = grid.len().max(1) as f64;
    let mean = grid.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = grid.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() as f32
}
