use deblur::RealGrid;
use ndarray::Array2;

// decodes a png into luminance samples, dropping alpha
pub fn from_png(data: &[u8]) -> Result<RealGrid, png::DecodingError> {
    let mut options = png::DecodeOptions::default();
    options.set_ignore_crc(true);
    let mut decoder = png::Decoder::new_with_options(data, options);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let channels = info.color_type.samples();
    let (width, height) = (info.width as usize, info.height as usize);

    Ok(Array2::from_shape_fn((height, width), |(row, col)| {
        let offset = (row * width + col) * channels;
        match channels {
            1 | 2 => buf[offset] as f32,
            _ => luma(buf[offset], buf[offset + 1], buf[offset + 2]),
        }
    }))
}

// Rec. 601 weights, same as image::Luma conversion
fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

pub fn to_dir(path: &str) -> String {
    path.split('/')
        .take(path.split('/').count() - 1)
        .collect::<Vec<&str>>()
        .join("/")
}
