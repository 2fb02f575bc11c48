//! Operator parameter WASM bindings.
//!
//! Wraps the core `WaveParams` and `EmbossParams` so the shell can edit them
//! field by field and persist them as JSON.

use rasterkit_core::{EmbossParams, WaveParams};
use wasm_bindgen::prelude::*;

use crate::serde_to_js_error;

/// Wave and ripple parameters for JavaScript
#[wasm_bindgen]
#[derive(Default)]
pub struct JsWaveParams {
    inner: WaveParams,
}

#[wasm_bindgen]
impl JsWaveParams {
    /// Create wave parameters with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn waves(&self) -> f64 {
        self.inner.waves
    }

    #[wasm_bindgen(setter)]
    pub fn set_waves(&mut self, value: f64) {
        self.inner.waves = value;
    }

    #[wasm_bindgen(getter)]
    pub fn percent(&self) -> f64 {
        self.inner.percent
    }

    #[wasm_bindgen(setter)]
    pub fn set_percent(&mut self, value: f64) {
        self.inner.percent = value;
    }

    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f64 {
        self.inner.offset
    }

    #[wasm_bindgen(setter)]
    pub fn set_offset(&mut self, value: f64) {
        self.inner.offset = value;
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(serde_to_js_error)
    }

    /// Deserialize from JSON; missing fields take their defaults
    pub fn from_json(value: JsValue) -> Result<JsWaveParams, JsValue> {
        let inner: WaveParams =
            serde_wasm_bindgen::from_value(value).map_err(serde_to_js_error)?;
        Ok(Self { inner })
    }
}

impl JsWaveParams {
    pub(crate) fn inner(&self) -> &WaveParams {
        &self.inner
    }
}

/// Emboss parameters for JavaScript
#[wasm_bindgen]
#[derive(Default)]
pub struct JsEmbossParams {
    inner: EmbossParams,
}

#[wasm_bindgen]
impl JsEmbossParams {
    /// Create emboss parameters with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Light direction in degrees
    #[wasm_bindgen(getter)]
    pub fn angle(&self) -> f64 {
        self.inner.angle
    }

    #[wasm_bindgen(setter)]
    pub fn set_angle(&mut self, value: f64) {
        self.inner.angle = value;
    }

    #[wasm_bindgen(getter)]
    pub fn power(&self) -> f64 {
        self.inner.power
    }

    #[wasm_bindgen(setter)]
    pub fn set_power(&mut self, value: f64) {
        self.inner.power = value;
    }

    /// Set the bias color
    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) {
        self.inner.red = red;
        self.inner.green = green;
        self.inner.blue = blue;
    }

    /// Bias color as `[red, green, blue]`
    pub fn color(&self) -> Vec<u8> {
        vec![self.inner.red, self.inner.green, self.inner.blue]
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(serde_to_js_error)
    }

    /// Deserialize from JSON; missing fields take their defaults
    pub fn from_json(value: JsValue) -> Result<JsEmbossParams, JsValue> {
        let inner: EmbossParams =
            serde_wasm_bindgen::from_value(value).map_err(serde_to_js_error)?;
        Ok(Self { inner })
    }
}

impl JsEmbossParams {
    pub(crate) fn inner(&self) -> &EmbossParams {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_params() {
        let mut params = JsWaveParams::new();
        assert_eq!(params.inner(), &WaveParams::default());

        params.set_waves(2.0);
        params.set_percent(12.5);
        params.set_offset(40.0);
        assert_eq!(params.waves(), 2.0);
        assert_eq!(params.percent(), 12.5);
        assert_eq!(params.offset(), 40.0);
    }

    #[test]
    fn test_emboss_params() {
        let mut params = JsEmbossParams::new();
        assert_eq!(params.inner(), &EmbossParams::default());

        params.set_angle(135.0);
        params.set_power(2.5);
        params.set_color(10, 20, 30);
        assert_eq!(params.angle(), 135.0);
        assert_eq!(params.power(), 2.5);
        assert_eq!(params.color(), vec![10, 20, 30]);
    }
}
