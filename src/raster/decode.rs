use std::path::Path;

use image::DynamicImage;

use super::buffer::PixelBuffer;
use crate::error::{Result, WavetableError};

/// Decode an image file into an 8-bit [`PixelBuffer`], keeping its channel count.
pub fn decode_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).map_err(|source| WavetableError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    })?;

    let pixels = from_dynamic(img)?;

    log::info!(
        "Decoded image: {}x{}, {} channel(s) from {}",
        pixels.width(),
        pixels.height(),
        pixels.channels(),
        path.display()
    );

    Ok(pixels)
}

/// Deeper bit depths are narrowed to 8 bits with the same channel layout.
pub fn from_dynamic(img: DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = (img.width(), img.height());
    let (channels, data) = match img.color().channel_count() {
        1 => (1, img.into_luma8().into_raw()),
        2 => (2, img.into_luma_alpha8().into_raw()),
        3 => (3, img.into_rgb8().into_raw()),
        _ => (4, img.into_rgba8().into_raw()),
    };
    PixelBuffer::new(width, height, channels, data)
}
