//! WASM-compatible wrapper types for raster data.
//!
//! This module provides a JavaScript-friendly pixel buffer that can be
//! filled from canvas `ImageData` and read back either as packed ARGB words
//! or as RGBA bytes.

use rasterkit_core::{PixelBuffer, ProcessError};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// A raster of packed ARGB pixels for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. Calling `pixels()` or `rgba()`
/// copies it into JavaScript memory. The `free()` method releases WASM
/// memory early; wasm-bindgen's finalizer otherwise handles cleanup.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a buffer from dimensions and packed ARGB words.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - ARGB words, row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from RGBA bytes, such as canvas `ImageData.data`.
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::from_rgba8(width, height, bytes)
            .map(Self::from_buffer)
            .map_err(to_js_error)
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the buffer
    #[wasm_bindgen(getter)]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Returns the packed ARGB words as Uint32Array (copies).
    pub fn pixels(&self) -> Vec<u32> {
        self.pixels.clone()
    }

    /// Returns RGBA bytes suitable for `new ImageData(...)` (copies).
    pub fn rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| {
                let [a, r, g, b] = p.to_be_bytes();
                [r, g, b, a]
            })
            .collect()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width(),
            height: buffer.height(),
            pixels: buffer.into_pixels(),
        }
    }

    /// Validate and convert to a core buffer (clones the pixel data).
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, ProcessError> {
        PixelBuffer::new(self.width, self.height, self.pixels.clone())
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_from_rgba() {
        let img = JsPixelBuffer::from_rgba(1, 1, &[1, 2, 3, 4]).unwrap();
        assert_eq!(img.pixels(), vec![0x0401_0203]);
    }

    #[wasm_bindgen_test]
    fn test_from_rgba_wrong_length() {
        assert!(JsPixelBuffer::from_rgba(2, 2, &[0; 8]).is_err());
    }
}
