use ndarray::Array2;
use num_complex::Complex;

/// Spatial-domain samples (an image or a kernel), indexed `[[row, col]]`.
pub type RealGrid = Array2<f32>;

/// Frequency-domain samples, always the same shape as the grid they came from.
pub type ComplexGrid = Array2<Complex<f32>>;

/// `(rows, cols)`
pub type Shape = (usize, usize);

// threshold factor used by the inverse filter when the caller has no better guess
pub const DEFAULT_EPS: f32 = 0.05;

// peak sample value of an 8 bit image, used for PSNR and output clamping
pub const PEAK: f32 = 255.0;
