//! Image encoding WASM bindings.
//!
//! This module exposes the rasterkit-core encoders so the shell can save a
//! processed image.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@rasterkit/wasm';
//!
//! const png = encode_png(processed);
//! const jpeg = encode_jpeg(processed, 90);
//! await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
//! ```

use rasterkit_core::encode;
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsPixelBuffer;

/// Encode an image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Image to encode (alpha is discarded)
/// * `quality` - JPEG quality (1-100, where 100 is highest quality, recommended: 90)
///
/// # Errors
///
/// Returns an error if the image's pixel count does not match its
/// dimensions, or if encoding fails internally.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsPixelBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    let buffer = image.to_buffer().map_err(to_js_error)?;
    encode::encode_jpeg(&buffer, quality).map_err(to_js_error)
}

/// Encode an image to lossless RGBA PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    let buffer = image.to_buffer().map_err(to_js_error)?;
    encode::encode_png(&buffer).map_err(to_js_error)
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let img = JsPixelBuffer::new(100, 100, vec![0xFF80_8080; 100 * 100]);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let img = JsPixelBuffer::new(100, 100, vec![0; 50]);
        assert!(encode_jpeg(&img, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let img = JsPixelBuffer::new(4, 4, vec![0x8000_00FF; 16]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
