//! Rasterkit WASM - WebAssembly bindings for Rasterkit
//!
//! This crate lets a JavaScript shell hand a decoded ARGB raster to the
//! rasterkit-core engine, run any operator on it, read histograms for
//! charting and re-encode the result.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for pixel buffers
//! - `params` - Operator parameter sets with JSON round-tripping
//! - `processor` - The operator catalog bound to one source image
//! - `histogram` - Histogram bindings for the chart collaborator
//! - `encode` - PNG and JPEG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPixelBuffer, JsProcessor } from '@rasterkit/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, w, h).data;
//! const image = JsPixelBuffer.from_rgba(w, h, data);
//! const processor = new JsProcessor(image);
//! const inverted = processor.invert();
//! ```

use rasterkit_core::ProcessError;
use wasm_bindgen::prelude::*;

mod encode;
mod histogram;
mod params;
mod processor;
mod types;

// Re-export public types
pub use encode::{encode_jpeg, encode_png};
pub use histogram::{compute_histogram, JsEqualization, JsHistogram};
pub use params::{JsEmbossParams, JsWaveParams};
pub use processor::JsProcessor;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Report an engine error on the browser console and convert it for JavaScript.
pub(crate) fn to_js_error(err: ProcessError) -> JsValue {
    report(err.to_string())
}

/// Same as [`to_js_error`] for values that failed to cross the JS boundary.
pub(crate) fn serde_to_js_error(err: serde_wasm_bindgen::Error) -> JsValue {
    report(err.to_string())
}

fn report(message: String) -> JsValue {
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
