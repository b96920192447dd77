use std::path::{Path, PathBuf};

use clap::Parser;
use deblur::{
    degrade::degrade_image,
    metrics::psnr,
    types::{DEFAULT_EPS, PEAK},
    DeblurError, Method, RealGrid,
};
use image::{GrayImage, ImageError, Luma};
use ndarray::Array2;
use thiserror::Error;
use tracing::info;

/// Degrades an image with a Gaussian blur and noise, then restores it with
/// the thresholded inverse filter and the Wiener filter.
#[derive(Parser, Debug, Clone)]
#[command(name = "deblur", version)]
pub struct Args {
    /// Path to the original image (converted to grayscale)
    pub image: PathBuf,

    /// Signal to noise ratio: the higher (e.g. 10000), the less noise
    #[arg(long, default_value_t = 100.0)]
    pub snr: f32,

    /// Standard deviation of the Gaussian blur
    #[arg(long, default_value_t = 2.0)]
    pub stddev: f32,

    /// Threshold factor of the inverse filter, relative to the largest kernel magnitude
    #[arg(long, default_value_t = DEFAULT_EPS)]
    pub eps: f32,

    /// Seed for the noise generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Directory the result images are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Stretch both restored images to the full range instead of clipping to [0, 255].
    /// Clipping keeps the written files comparable with the PSNR values that are logged.
    #[arg(long)]
    pub normalize: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Deblur(#[from] DeblurError),
}

/// How samples outside `[0, 255]` are mapped when writing an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    Clip,
    Normalize,
}

/// Writes `original.png`, `degraded.png`, `restored_inverse.png` and
/// `restored_wiener.png` into `args.out_dir`. Original and degraded images are
/// always clipped, the restored ones use the same [`Range`] for both filters.
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(path = %args.image.display(), "loading image");
    let original = load_grayscale(&args.image)?;
    std::fs::create_dir_all(&args.out_dir)?;
    save_grayscale(&original, &args.out_dir.join("original.png"), Range::Clip)?;

    info!(snr = args.snr, stddev = args.stddev, "degrading image");
    let degraded = degrade_image(&original, args.stddev, args.snr, args.seed)?;
    save_grayscale(&degraded.image, &args.out_dir.join("degraded.png"), Range::Clip)?;
    let degraded_psnr = psnr(&original, &degraded.image)?;
    info!(psnr = degraded_psnr, "degraded");

    let range = if args.normalize {
        Range::Normalize
    } else {
        Range::Clip
    };

    let methods = [
        ("restored_inverse.png", Method::Inverse { eps: args.eps }),
        ("restored_wiener.png", Method::Wiener { snr: args.snr }),
    ];

    for (file_name, method) in methods {
        let restored = deblur::restore(&degraded.image, &degraded.kernel, method)?;
        let restored_psnr = psnr(&original, &restored)?;
        info!(?method, psnr = restored_psnr, "restored");
        save_grayscale(&restored, &args.out_dir.join(file_name), range)?;
    }

    Ok(())
}

pub fn load_grayscale(path: &Path) -> Result<RealGrid, CliError> {
    let img = image::open(path)?.to_luma8();
    Ok(from_luma(&img))
}

pub fn save_grayscale(grid: &RealGrid, path: &Path, range: Range) -> Result<(), CliError> {
    to_luma(grid, range).save(path)?;
    Ok(())
}

pub fn from_luma(img: &GrayImage) -> RealGrid {
    let (width, height) = img.dimensions();
    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        img.get_pixel(col as u32, row as u32)[0] as f32
    })
}

pub fn to_luma(grid: &RealGrid, range: Range) -> GrayImage {
    let (rows, cols) = grid.dim();

    let (offset, scale) = match range {
        Range::Clip => (0.0, 1.0),
        Range::Normalize => {
            let min = grid.iter().cloned().fold(f32::INFINITY, f32::min);
            let max = grid.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            if max > min {
                (min, PEAK / (max - min))
            } else {
                (min, 0.0)
            }
        }
    };

    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let value = (grid[[y as usize, x as usize]] - offset) * scale;
        Luma([value.round().clamp(0.0, PEAK) as u8])
    })
}
