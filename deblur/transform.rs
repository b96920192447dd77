//! 2D discrete Fourier transform between real and complex grids.
//!
//! [`forward`] and [`inverse`] run a row pass followed by a column pass of
//! `rustfft`, so any grid size works (non powers of two included). The
//! `*_direct` variants evaluate the defining double sum and are kept as the
//! reference the fast path is checked against.

use std::f64::consts::PI;

use ndarray::{Array2, Axis};
use num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

use crate::types::{ComplexGrid, RealGrid};

/// `F(k,l) = sum_{x,y} f(x,y) * exp(-2 pi i (k x / rows + l y / cols))`
///
/// The result is not normalized.
pub fn forward(input: &RealGrid) -> ComplexGrid {
    let mut spectrum = input.mapv(|v| Complex::new(v, 0.0));
    fft_2d(&mut spectrum, FftDirection::Forward);
    spectrum
}

/// Inverse of [`forward`], scaled by `1 / (rows * cols)`. Only the real part is kept.
pub fn inverse(spectrum: &ComplexGrid) -> RealGrid {
    let mut buffer = spectrum.to_owned();
    fft_2d(&mut buffer, FftDirection::Inverse);

    let scale = 1.0 / buffer.len().max(1) as f32;
    buffer.mapv(|c| c.re * scale)
}

fn fft_2d(grid: &mut ComplexGrid, direction: FftDirection) {
    if grid.is_empty() {
        return;
    }

    let mut planner = FftPlanner::new();
    transform_lanes(grid, Axis(1), &mut planner, direction); // rows
    transform_lanes(grid, Axis(0), &mut planner, direction); // columns
}

// runs a 1D transform over every lane along `axis`, gathering each lane into a
// contiguous buffer so the grid's memory layout does not matter
fn transform_lanes(
    grid: &mut ComplexGrid,
    axis: Axis,
    planner: &mut FftPlanner<f32>,
    direction: FftDirection,
) {
    let len = grid.len_of(axis);
    let fft = planner.plan_fft(len, direction);

    let mut scratch = vec![Complex::default(); fft.get_inplace_scratch_len()];
    let mut buffer = vec![Complex::default(); len];

    for mut lane in grid.lanes_mut(axis) {
        buffer
            .iter_mut()
            .zip(lane.iter())
            .for_each(|(dst, src)| *dst = *src);

        fft.process_with_scratch(&mut buffer, &mut scratch);

        lane.iter_mut()
            .zip(buffer.iter())
            .for_each(|(dst, src)| *dst = *src);
    }
}

/// Canonical O(rows² · cols²) forward transform.
pub fn forward_direct(input: &RealGrid) -> ComplexGrid {
    let (rows, cols) = input.dim();

    Array2::from_shape_fn((rows, cols), |(k, l)| {
        let mut sum = Complex::<f64>::new(0.0, 0.0);
        for ((x, y), &value) in input.indexed_iter() {
            sum += twiddle(k * x % rows, rows, l * y % cols, cols, -1.0) * value as f64;
        }
        Complex::new(sum.re as f32, sum.im as f32)
    })
}

/// Canonical O(rows² · cols²) inverse transform, normalized, real part only.
pub fn inverse_direct(spectrum: &ComplexGrid) -> RealGrid {
    let (rows, cols) = spectrum.dim();
    let scale = 1.0 / (rows * cols).max(1) as f64;

    Array2::from_shape_fn((rows, cols), |(x, y)| {
        let mut sum = Complex::<f64>::new(0.0, 0.0);
        for ((k, l), value) in spectrum.indexed_iter() {
            let value = Complex::new(value.re as f64, value.im as f64);
            sum += twiddle(k * x % rows, rows, l * y % cols, cols, 1.0) * value;
        }
        (sum.re * scale) as f32
    })
}

// exp(sign * 2 pi i (a / rows + b / cols)); callers reduce the products mod the
// axis length first to keep the phase argument small
#[inline]
fn twiddle(a: usize, rows: usize, b: usize, cols: usize, sign: f64) -> Complex<f64> {
    let phase = sign * 2.0 * PI * (a as f64 / rows as f64 + b as f64 / cols as f64);
    Complex::from_polar(1.0, phase)
}
