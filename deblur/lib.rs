use thiserror::Error;

pub mod degrade;
pub mod filter;
pub mod kernel;
pub mod metrics;
pub mod restore;
pub mod shift;
pub mod transform;
pub mod types;

pub use kernel::Kernel;
pub use restore::{inverse_filter, restore, wiener_filter, Method};
pub use types::{ComplexGrid, RealGrid, Shape};

pub type Result<T> = std::result::Result<T, DeblurError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeblurError {
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch { expected: Shape, actual: Shape },

    #[error("Kernel of size {kernel:?} does not fit into an image of size {image:?}")]
    KernelTooLarge { kernel: Shape, image: Shape },

    #[error("Grid has no samples")]
    EmptyGrid,

    #[error("Invalid parameter {name}: {value} (must be finite and positive)")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("Degenerate spectrum: every cell has zero magnitude")]
    DegenerateSpectrum,
}

// finite and strictly positive, as required for eps, snr and std deviations
pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DeblurError::InvalidParameter { name, value })
    }
}

pub(crate) fn check_shape(expected: Shape, actual: Shape) -> Result<()> {
    if expected != actual {
        return Err(DeblurError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
