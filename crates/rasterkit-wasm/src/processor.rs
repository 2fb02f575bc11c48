//! Operator catalog WASM bindings.
//!
//! A [`JsProcessor`] is created once per loaded image and exposes every
//! engine operator. Each call returns a new [`JsPixelBuffer`]; the source
//! stays untouched so the shell can keep showing it if an operation fails.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rasterkit_core::{EngineConfig, ProcessingContext};
use wasm_bindgen::prelude::*;

use crate::histogram::{JsEqualization, JsHistogram};
use crate::params::{JsEmbossParams, JsWaveParams};
use crate::{serde_to_js_error, to_js_error};
use crate::types::JsPixelBuffer;

/// The engine bound to one source image.
#[wasm_bindgen]
pub struct JsProcessor {
    inner: ProcessingContext,
}

#[wasm_bindgen]
impl JsProcessor {
    /// Create a processor for `image`.
    ///
    /// # Errors
    /// Fails when the image's pixel count does not match its dimensions.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsPixelBuffer) -> Result<JsProcessor, JsValue> {
        let source = image.to_buffer().map_err(to_js_error)?;
        Ok(Self {
            inner: ProcessingContext::new(source),
        })
    }

    /// Apply an engine configuration given as a JSON object, e.g.
    /// `{ background: 0xFF000000, isodata: { max_iterations: 50 } }`.
    pub fn configure(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: EngineConfig =
            serde_wasm_bindgen::from_value(config).map_err(serde_to_js_error)?;
        self.inner.set_config(config);
        Ok(())
    }

    /// Current engine configuration as a JSON object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(serde_to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.geometry().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.geometry().height
    }

    // ---- Point operators ----

    pub fn copy(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.copy())
    }

    pub fn invert(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.invert())
    }

    pub fn add_const(&self, k: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.add_const(k))
    }

    pub fn subtract_const(&self, k: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.subtract_const(k))
    }

    pub fn log(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.log())
    }

    pub fn pow(&self, exponent: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.pow(exponent))
    }

    pub fn gray(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.gray())
    }

    pub fn grayscale_array(&self) -> Vec<u32> {
        self.inner.grayscale_array()
    }

    pub fn brightness(&self, percent: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.brightness(percent))
    }

    /// Random brightening; the same `seed` always gives the same image.
    pub fn noise(&self, percent: f32, seed: u64) -> JsPixelBuffer {
        let mut rng = StdRng::seed_from_u64(seed);
        JsPixelBuffer::from_buffer(self.inner.noise(percent, &mut rng))
    }

    pub fn transparency(&self, percent: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.transparency(percent))
    }

    pub fn pseudo_colors(&self, seed: i64) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.pseudo_colors(seed))
    }

    pub fn make_transparent(&self, r: u8, g: u8, b: u8, percent: f64) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.make_transparent(r, g, b, percent))
    }

    // ---- Histogram and threshold analysis ----

    /// Red, green, blue and brightness histograms of the source.
    pub fn histograms(&self) -> JsHistogram {
        JsHistogram::from_channels(&self.inner.channel_histograms())
    }

    pub fn linear_contrast(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.linear_contrast())
    }

    pub fn equalize(&self) -> JsEqualization {
        JsEqualization::from_core(self.inner.equalize())
    }

    pub fn isodata_threshold(&self) -> u8 {
        self.inner.isodata_threshold()
    }

    pub fn threshold_isodata(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.threshold_isodata())
    }

    pub fn gradient_threshold(&self) -> u8 {
        self.inner.gradient_threshold()
    }

    pub fn threshold_gradient(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.threshold_gradient())
    }

    pub fn threshold_otsu(&self) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .threshold_otsu()
            .map(JsPixelBuffer::from_buffer)
            .map_err(to_js_error)
    }

    // ---- Geometric remapping ----

    pub fn bit_slice(&self, plane: u32) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .bit_slice(plane)
            .map(JsPixelBuffer::from_buffer)
            .map_err(to_js_error)
    }

    pub fn horizontal_wave(&self, params: &JsWaveParams) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.horizontal_wave(params.inner()))
    }

    pub fn ripple(&self, params: &JsWaveParams) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.ripple(params.inner()))
    }

    pub fn zoom(&self, percent: i32) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .zoom(percent)
            .map(JsPixelBuffer::from_buffer)
            .map_err(to_js_error)
    }

    // ---- Neighborhood filters ----

    pub fn line_art(&self, intensity: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.line_art(intensity))
    }

    pub fn gray_line_art(&self, intensity: i32) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.gray_line_art(intensity))
    }

    pub fn emboss(&self, params: &JsEmbossParams) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.emboss(params.inner()))
    }

    pub fn gray_emboss(&self, params: &JsEmbossParams) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.gray_emboss(params.inner()))
    }
}
