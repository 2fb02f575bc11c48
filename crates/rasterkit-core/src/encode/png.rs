//! Lossless PNG encoding.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use crate::raster::{PixelBuffer, ProcessError};

/// Encode a raster to RGBA PNG bytes.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, ProcessError> {
    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(
            &buffer.to_rgba8(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ProcessError::EncodingFailed(e.to_string()))?;
    Ok(out.into_inner())
}
