use ndarray::{s, Array2};

use crate::{
    types::{RealGrid, Shape},
    DeblurError, Result,
};

/// Toroidal translation: the sample at `(row, col)` ends up at
/// `((row + dy) mod rows, (col + dx) mod cols)`. Negative offsets wrap to the
/// opposite edge.
pub fn circular_shift<T: Clone>(grid: &Array2<T>, dx: isize, dy: isize) -> Array2<T> {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return grid.clone();
    }

    // pull each output cell from where it came from
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        let src_row = (row as isize - dy).rem_euclid(rows as isize) as usize;
        let src_col = (col as isize - dx).rem_euclid(cols as isize) as usize;
        grid[[src_row, src_col]].clone()
    })
}

/// Zero-pads `grid` on the bottom and right until it has the given shape.
pub fn pad_to(grid: &RealGrid, shape: Shape) -> Result<RealGrid> {
    let (rows, cols) = grid.dim();
    if rows > shape.0 || cols > shape.1 {
        return Err(DeblurError::KernelTooLarge {
            kernel: (rows, cols),
            image: shape,
        });
    }

    let mut padded = RealGrid::zeros(shape);
    padded.slice_mut(s![..rows, ..cols]).assign(grid);
    Ok(padded)
}
