//! JPEG encoding for export.
//!
//! JPEG carries no alpha channel, so pixels are flattened to RGB before
//! encoding.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use crate::raster::{PixelBuffer, ProcessError};

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `buffer` - Source raster (alpha is discarded)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for further editing
/// * 80-90: Good quality, recommended for most uses
/// * 60-80: Medium quality, acceptable for previews
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, ProcessError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);

    encoder
        .write_image(
            &buffer.to_rgb8(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ProcessError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
