use deblur::RealGrid;
use image::GrayImage;
use ndarray::{Array2, ArrayView2};

pub type BoxError = Box<dyn std::error::Error>;

pub fn read_gray(path: &str) -> Result<RealGrid, BoxError> {
    let img: GrayImage = image::open(path)?.to_luma8();
    let (width, height) = img.dimensions();

    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(y, x)| img.get_pixel(x as u32, y as u32)[0] as f32,
    ))
}

// moves the zero frequency from (0, 0) to the middle of the grid
pub fn fftshift<T: Clone>(grid: ArrayView2<T>) -> Array2<T> {
    let (height, width) = grid.dim();
    deblur::shift::circular_shift(&grid.to_owned(), (width / 2) as isize, (height / 2) as isize)
}

pub fn output_name(file_name: &str, suffix: &str) -> String {
    format!("{}.{suffix}.png", file_name.trim_end_matches(".png"))
}
