use ndarray::{Array1, Array2, Axis};

use crate::{
    check_positive,
    shift::{circular_shift, pad_to},
    transform,
    types::{ComplexGrid, RealGrid, Shape},
    DeblurError, Result,
};

// largest Gaussian kernel side, 4095 taps (std_dev up to about 682)
const MAX_GAUSSIAN_TAPS: f32 = 4095.0;

/// Spatial blur response, conceptually centered on its middle cell.
///
/// For even sizes the center is taken with floor division, i.e. the cell at
/// `(rows / 2, cols / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: RealGrid,
}

impl Kernel {
    pub fn new(weights: RealGrid) -> Result<Self> {
        if weights.is_empty() {
            return Err(DeblurError::EmptyGrid);
        }
        Ok(Self { weights })
    }

    /// Normalized, separable Gaussian with `round(3 * std_dev) * 2 - 1` taps per axis.
    pub fn gaussian(std_dev: f32) -> Result<Self> {
        let std_dev = check_positive("std_dev", std_dev)?;
        let taps = ((std_dev * 3.0).round() * 2.0 - 1.0).max(1.0);
        if taps > MAX_GAUSSIAN_TAPS {
            return Err(DeblurError::InvalidParameter {
                name: "std_dev",
                value: std_dev,
            });
        }
        let size = taps as usize;

        let center = (size - 1) as f32 / 2.0;
        let mut taps = Array1::from_shape_fn(size, |i| {
            let d = i as f32 - center;
            (-(d * d) / (2.0 * std_dev * std_dev)).exp()
        });
        let sum = taps.sum();
        taps /= sum;

        let column = taps.view().insert_axis(Axis(1));
        let row = taps.view().insert_axis(Axis(0));
        Self::new(column.dot(&row))
    }

    /// Moving average over a `size x size` window.
    pub fn box_filter(size: usize) -> Result<Self> {
        let weight = 1.0 / (size * size).max(1) as f32;
        Self::new(Array2::from_elem((size, size), weight))
    }

    pub fn weights(&self) -> &RealGrid {
        &self.weights
    }

    pub fn into_weights(self) -> RealGrid {
        self.weights
    }

    pub fn dim(&self) -> Shape {
        self.weights.dim()
    }

    pub fn center(&self) -> Shape {
        let (rows, cols) = self.dim();
        (rows / 2, cols / 2)
    }

    /// Zero-pads the kernel to `shape` and rotates it so its center sits at `(0, 0)`.
    pub fn expand(&self, shape: Shape) -> Result<RealGrid> {
        let padded = pad_to(&self.weights, shape)?;
        let (center_row, center_col) = self.center();
        Ok(circular_shift(
            &padded,
            -(center_col as isize),
            -(center_row as isize),
        ))
    }

    /// Transfer function of the kernel on a grid of the given shape.
    pub fn spectrum(&self, shape: Shape) -> Result<ComplexGrid> {
        Ok(transform::forward(&self.expand(shape)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    #[test]
    fn gaussian_size_and_sum() {
        let kernel = Kernel::gaussian(2.0).unwrap();
        assert_eq!(kernel.dim(), (11, 11));
        assert_eq!(kernel.center(), (5, 5));
        assert_relative_eq!(kernel.weights().sum(), 1.0, epsilon = 1e-5);

        let small = Kernel::gaussian(0.1).unwrap();
        assert_eq!(small.dim(), (1, 1));
        assert_relative_eq!(small.weights()[[0, 0]], 1.0);
    }

    #[test]
    fn gaussian_is_symmetric_with_peak_in_center() {
        let kernel = Kernel::gaussian(1.5).unwrap();
        let w = kernel.weights();
        let (n, _) = kernel.dim();
        let peak = w.iter().cloned().fold(f32::MIN, f32::max);

        assert_eq!(w[[n / 2, n / 2]], peak);
        for ((r, c), v) in w.indexed_iter() {
            assert_abs_diff_eq!(*v, w[[c, r]], epsilon = 1e-7);
            assert_abs_diff_eq!(*v, w[[n - 1 - r, n - 1 - c]], epsilon = 1e-7);
        }
    }

    #[test]
    fn gaussian_rejects_bad_std_dev() {
        assert!(Kernel::gaussian(0.0).is_err());
        assert!(Kernel::gaussian(-1.0).is_err());
        assert!(Kernel::gaussian(f32::NAN).is_err());

        for std_dev in [1e6, 1e30, f32::MAX] {
            assert!(matches!(
                Kernel::gaussian(std_dev),
                Err(DeblurError::InvalidParameter { name: "std_dev", .. })
            ));
        }
    }

    #[test]
    fn empty_kernel() {
        assert_eq!(
            Kernel::new(RealGrid::zeros((0, 0))),
            Err(DeblurError::EmptyGrid)
        );
    }

    #[test]
    fn box_filter_weights() {
        let kernel = Kernel::box_filter(3).unwrap();
        assert!(kernel.weights().iter().all(|&w| w == 1.0 / 9.0));
    }

    #[test]
    fn expand_moves_center_to_origin() {
        let kernel = Kernel::new(array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]).unwrap();
        let expanded = kernel.expand((5, 5)).unwrap();

        assert_eq!(expanded[[0, 0]], 5.0);
        assert_eq!(expanded[[0, 1]], 6.0);
        assert_eq!(expanded[[1, 0]], 8.0);
        assert_eq!(expanded[[4, 4]], 1.0);
        assert_eq!(expanded[[4, 0]], 2.0);
        assert_eq!(expanded[[0, 4]], 4.0);
        assert_eq!(expanded.sum(), 45.0);
    }

    #[test]
    fn expand_even_kernel_uses_floor_center() {
        let kernel = Kernel::new(array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let expanded = kernel.expand((3, 3)).unwrap();

        // center (1, 1) holds 4.0
        assert_eq!(
            expanded,
            array![[4.0, 0.0, 3.0], [0.0, 0.0, 0.0], [2.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn symmetric_kernel_has_real_spectrum() {
        let spectrum = Kernel::gaussian(1.0).unwrap().spectrum((16, 12)).unwrap();

        assert_eq!(spectrum.dim(), (16, 12));
        assert_abs_diff_eq!(spectrum[[0, 0]].re, 1.0, epsilon = 1e-5);
        for c in spectrum.iter() {
            assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn kernel_larger_than_image() {
        let kernel = Kernel::gaussian(2.0).unwrap();
        assert!(matches!(
            kernel.spectrum((8, 8)),
            Err(DeblurError::KernelTooLarge { .. })
        ));
    }
}
