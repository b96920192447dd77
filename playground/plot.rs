use image::{ImageBuffer, Rgb};
use ndarray::Array2;
use num_complex::Complex;
use palette::{Hsv, IntoColor, Srgb};
use plotters::prelude::*;

use crate::util::{fftshift, BoxError};

pub fn visualize_frequencies(
    frequencies: &Array2<Complex<f32>>,
    filename: &str,
) -> Result<(), BoxError> {
    // Log magnitudes, zero frequency in the middle of the image
    let magnitudes = fftshift(frequencies.mapv(|c| (c.norm() + 1.0).ln()).view());

    let max_magnitude = magnitudes.fold(f32::MIN, |n, ac| f32::max(n, *ac));
    let min_magnitude = magnitudes.fold(f32::MAX, |n, ac| f32::min(n, *ac));
    let range = (max_magnitude - min_magnitude).max(f32::EPSILON);

    let (height, width) = magnitudes.dim();
    let mut img = ImageBuffer::new(width as u32, height as u32);

    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let t = (magnitudes[(y as usize, x as usize)] - min_magnitude) / range;

        // blue for weak, red for strong frequencies
        let hsv: Hsv = Hsv::new(240.0 * (1.0 - t), 1.0, 0.2 + 0.8 * t);
        let color: Srgb = hsv.into_color();
        let color: Srgb<u8> = color.into_format();
        *pixel = Rgb([color.red, color.green, color.blue]);
    }

    img.save(filename)?;
    Ok(())
}

pub struct Curve<'a> {
    pub label: &'a str,
    pub points: Vec<(f32, f32)>,
    pub color: RGBColor,
}

// PSNR over a log-scaled parameter axis
pub fn plot_sweep(
    filename: &str,
    caption: &str,
    x_desc: &str,
    curves: &[Curve],
) -> Result<(), BoxError> {
    let points = || curves.iter().flat_map(|c| c.points.iter());
    let (x_min, x_max) = points().fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.0), hi.max(p.0)));
    let (y_min, y_max) = points()
        .filter(|p| p.1.is_finite())
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));

    if x_min >= x_max || y_min > y_max {
        return Err("not enough points to plot".into());
    }

    let root = BitMapBackend::new(filename, (800, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min - 1.0)..(y_max + 1.0))?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("PSNR [dB]")
        .draw()?;

    for curve in curves {
        let color = curve.color;
        chart
            .draw_series(LineSeries::new(curve.points.iter().cloned(), &color))?
            .label(curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
