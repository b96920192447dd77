use deblur::{
    degrade::degrade_image,
    filter::{compute_inverse_filter, compute_wiener_filter},
    transform,
    types::DEFAULT_EPS,
};

use crate::{
    plot::visualize_frequencies,
    util::{self, output_name, BoxError},
};

const BLUR_STD_DEV: f32 = 2.0;
const SNR: f32 = 100.0;

pub fn run(file_name: &str) -> Result<(), BoxError> {
    let image = util::read_gray(file_name)?;
    let degraded = degrade_image(&image, BLUR_STD_DEV, SNR, 0)?;

    // Transform the image into the frequency domain. This is a 2D array of complex numbers
    let image_spectrum = transform::forward(&image);
    let degraded_spectrum = transform::forward(&degraded.image);
    let kernel_spectrum = degraded.kernel.spectrum(image.dim())?;

    let inverse = compute_inverse_filter(&kernel_spectrum, DEFAULT_EPS)?;
    let wiener = compute_wiener_filter(&kernel_spectrum, SNR)?;

    let outputs = [
        ("image.fft", &image_spectrum),
        ("degraded.fft", &degraded_spectrum),
        ("kernel.fft", &kernel_spectrum),
        ("inverse.fft", &inverse),
        ("wiener.fft", &wiener),
    ];

    for (suffix, spectrum) in outputs {
        visualize_frequencies(spectrum, &output_name(file_name, suffix))?;
    }

    Ok(())
}
