use tracing::debug_span;

use crate::{
    check_positive,
    filter::{apply_filter, compute_inverse_filter, compute_wiener_filter},
    kernel::Kernel,
    transform,
    types::{ComplexGrid, RealGrid},
    DeblurError, Result,
};

/// Which regularized inverse to restore with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Thresholded inverse filter, `eps` relative to the largest kernel magnitude.
    Inverse { eps: f32 },
    /// Wiener filter for an assumed signal to noise ratio.
    Wiener { snr: f32 },
}

impl Method {
    pub fn validate(&self) -> Result<()> {
        match *self {
            Method::Inverse { eps } => check_positive("eps", eps).map(|_| ()),
            Method::Wiener { snr } => check_positive("snr", snr).map(|_| ()),
        }
    }

    /// Builds the filter spectrum for a kernel spectrum.
    pub fn filter(&self, kernel_spectrum: &ComplexGrid) -> Result<ComplexGrid> {
        match *self {
            Method::Inverse { eps } => compute_inverse_filter(kernel_spectrum, eps),
            Method::Wiener { snr } => compute_wiener_filter(kernel_spectrum, snr),
        }
    }
}

/// Deconvolves `degraded` with `kernel` in the frequency domain.
///
/// The kernel is zero-padded to the image size and rotated so its center
/// sits at the origin, both grids are transformed, the filter spectrum is
/// applied and the product transformed back. The output has the shape of
/// `degraded`; its range is not clamped.
pub fn restore(degraded: &RealGrid, kernel: &Kernel, method: Method) -> Result<RealGrid> {
    let shape = degraded.dim();
    let _span = debug_span!("restore", ?method, rows = shape.0, cols = shape.1).entered();

    if degraded.is_empty() {
        return Err(DeblurError::EmptyGrid);
    }
    method.validate()?;

    let kernel_spectrum = kernel.spectrum(shape)?;
    let image_spectrum = transform::forward(degraded);

    let filter = method.filter(&kernel_spectrum)?;
    let restored = apply_filter(&image_spectrum, &filter)?;

    Ok(transform::inverse(&restored))
}

pub fn inverse_filter(degraded: &RealGrid, kernel: &Kernel, eps: f32) -> Result<RealGrid> {
    restore(degraded, kernel, Method::Inverse { eps })
}

pub fn wiener_filter(degraded: &RealGrid, kernel: &Kernel, snr: f32) -> Result<RealGrid> {
    restore(degraded, kernel, Method::Wiener { snr })
}
