//! Histogram WASM bindings.
//!
//! This module hands histograms to the chart collaborator: per-channel bin
//! arrays, ordered `(level, count)` points, normalization and clipping info.

use rasterkit_core::histogram::compute_channel_histograms;
use rasterkit_core::{ChannelHistograms, Equalization, Histogram};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::{serde_to_js_error, to_js_error};
use crate::types::JsPixelBuffer;

/// One chart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct HistogramPoint {
    level: u8,
    count: u32,
}

fn chart_points(hist: &Histogram) -> Vec<HistogramPoint> {
    hist.points()
        .map(|(level, count)| HistogramPoint { level, count })
        .collect()
}

/// Histogram result accessible from JavaScript.
///
/// Contains 256-bin histograms for red, green, blue, and brightness,
/// plus helper methods for clipping detection and normalization.
#[wasm_bindgen]
pub struct JsHistogram {
    red: Vec<u32>,
    green: Vec<u32>,
    blue: Vec<u32>,
    brightness: Histogram,
    max_value: u32,
    has_highlight_clipping: bool,
    has_shadow_clipping: bool,
}

#[wasm_bindgen]
impl JsHistogram {
    /// Get red channel histogram (256 bins).
    pub fn red(&self) -> Vec<u32> {
        self.red.clone()
    }

    /// Get green channel histogram (256 bins).
    pub fn green(&self) -> Vec<u32> {
        self.green.clone()
    }

    /// Get blue channel histogram (256 bins).
    pub fn blue(&self) -> Vec<u32> {
        self.blue.clone()
    }

    /// Get brightness histogram (256 bins).
    pub fn brightness(&self) -> Vec<u32> {
        self.brightness.bins.to_vec()
    }

    /// Get maximum bin value across all RGB channels.
    ///
    /// Useful for normalizing histogram display.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Check if any RGB channel has values at 255 (highlight clipping).
    #[wasm_bindgen(getter)]
    pub fn has_highlight_clipping(&self) -> bool {
        self.has_highlight_clipping
    }

    /// Check if any RGB channel has values at 0 (shadow clipping).
    #[wasm_bindgen(getter)]
    pub fn has_shadow_clipping(&self) -> bool {
        self.has_shadow_clipping
    }

    /// Brightness histogram as `[{ level, count }, ...]` in level order.
    pub fn brightness_points(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&chart_points(&self.brightness))
            .map_err(serde_to_js_error)
    }
}

impl JsHistogram {
    pub(crate) fn from_channels(hists: &ChannelHistograms) -> Self {
        Self {
            red: hists.red.bins.to_vec(),
            green: hists.green.bins.to_vec(),
            blue: hists.blue.bins.to_vec(),
            brightness: hists.brightness.clone(),
            max_value: hists.max_value(),
            has_highlight_clipping: hists.has_highlight_clipping(),
            has_shadow_clipping: hists.has_shadow_clipping(),
        }
    }
}

/// Equalized image plus its histogram for display.
#[wasm_bindgen]
pub struct JsEqualization {
    image: JsPixelBuffer,
    histogram: Vec<u32>,
}

#[wasm_bindgen]
impl JsEqualization {
    /// The equalized, opaque gray image (copies).
    pub fn image(&self) -> JsPixelBuffer {
        JsPixelBuffer::new(self.image.width(), self.image.height(), self.image.pixels())
    }

    /// Histogram of the equalized image (256 bins).
    pub fn histogram(&self) -> Vec<u32> {
        self.histogram.clone()
    }
}

impl JsEqualization {
    pub(crate) fn from_core(eq: Equalization) -> Self {
        Self {
            histogram: eq.histogram.bins.to_vec(),
            image: JsPixelBuffer::from_buffer(eq.image),
        }
    }
}

/// Compute red, green, blue and brightness histograms of an image.
///
/// # Example (TypeScript)
/// ```typescript
/// const hist = compute_histogram(image);
/// const redBins = hist.red();        // Uint32Array[256]
/// const max = hist.max_value;        // For normalization
/// hist.free();
/// ```
#[wasm_bindgen]
pub fn compute_histogram(image: &JsPixelBuffer) -> Result<JsHistogram, JsValue> {
    let buffer = image.to_buffer().map_err(to_js_error)?;
    Ok(JsHistogram::from_channels(&compute_channel_histograms(&buffer)))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compute_histogram() {
        let image = JsPixelBuffer::new(2, 2, vec![0xFF80_8080; 4]);
        let hist = compute_histogram(&image).unwrap();
        assert_eq!(hist.red()[0x80], 4);
        assert!(hist.brightness_points().is_ok());
    }

    #[wasm_bindgen_test]
    fn test_compute_histogram_rejects_bad_image() {
        let image = JsPixelBuffer::new(2, 2, vec![0; 1]);
        assert!(compute_histogram(&image).is_err());
    }
}
