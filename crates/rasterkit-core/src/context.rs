//! Processing context: one source raster and the catalog of operators.
//!
//! A [`ProcessingContext`] is created when the shell loads a new image and
//! dropped when another image replaces it. It caches the source
//! [`Geometry`] and an [`EngineConfig`]; every operator reads the source and
//! returns a fresh destination buffer of the same dimensions.
//!
//! # Example
//!
//! ```ignore
//! use rasterkit_core::{PixelBuffer, ProcessingContext, WaveParams};
//!
//! let ctx = ProcessingContext::new(buffer);
//! let inverted = ctx.invert();
//! let waved = ctx.horizontal_wave(&WaveParams::default());
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::filter;
use crate::histogram::{self, Equalization};
use crate::point;
use crate::raster::{argb, PixelBuffer, ProcessError};
use crate::threshold::{self, GlobalThreshold, IsodataConfig, OtsuAnalyzer};
use crate::transform;
use crate::{Channel, ChannelHistograms, EmbossParams, Histogram, WaveParams};

/// Dimensions and centre of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    /// `width / 2`
    pub center_x: i64,
    /// `height / 2`
    pub center_y: i64,
}

impl Geometry {
    /// Derive the geometry of `buffer`.
    pub fn of(buffer: &PixelBuffer) -> Self {
        let (width, height) = (buffer.width(), buffer.height());
        Self {
            width,
            height,
            center_x: (width / 2) as i64,
            center_y: (height / 2) as i64,
        }
    }

    /// Coordinates of `(x, y)` relative to the centre.
    #[inline]
    pub fn centred(&self, x: u32, y: u32) -> (i64, i64) {
        (x as i64 - self.center_x, y as i64 - self.center_y)
    }

    /// Length of the image diagonal.
    pub fn diagonal(&self) -> f64 {
        let (w, h) = (self.width as f64, self.height as f64);
        (w * w + h * h).sqrt()
    }
}

/// Engine-wide settings shared by all operators of a context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// ARGB fill for samples the warps pull from outside the source.
    pub background: u32,
    /// Isodata iteration parameters.
    pub isodata: IsodataConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            background: argb::BLACK,
            isodata: IsodataConfig::default(),
        }
    }
}

/// Owns a read-only source raster and runs operators against it.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    source: PixelBuffer,
    geometry: Geometry,
    config: EngineConfig,
}

impl ProcessingContext {
    /// Create a context with the default [`EngineConfig`].
    pub fn new(source: PixelBuffer) -> Self {
        let geometry = Geometry::of(&source);
        tracing::debug!(
            width = geometry.width,
            height = geometry.height,
            "processing context created"
        );
        Self {
            source,
            geometry,
            config: EngineConfig::default(),
        }
    }

    /// Replace the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the engine configuration in place, keeping the source.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Replace only the background fill color.
    pub fn with_background(mut self, background: u32) -> Self {
        self.config.background = background;
        self
    }

    pub fn source(&self) -> &PixelBuffer {
        &self.source
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Give the source back, ending the context.
    pub fn into_source(self) -> PixelBuffer {
        self.source
    }

    // ---- Point operators ----

    pub fn copy(&self) -> PixelBuffer {
        point::copy(&self.source)
    }

    pub fn invert(&self) -> PixelBuffer {
        point::invert(&self.source)
    }

    pub fn add_const(&self, k: i32) -> PixelBuffer {
        point::add_const(&self.source, k)
    }

    pub fn subtract_const(&self, k: i32) -> PixelBuffer {
        point::subtract_const(&self.source, k)
    }

    pub fn log(&self) -> PixelBuffer {
        point::log(&self.source)
    }

    pub fn pow(&self, exponent: i32) -> PixelBuffer {
        point::pow(&self.source, exponent)
    }

    pub fn gray(&self) -> PixelBuffer {
        point::gray(&self.source)
    }

    pub fn grayscale_array(&self) -> Vec<u32> {
        point::grayscale_array(&self.source)
    }

    pub fn brightness(&self, percent: i32) -> PixelBuffer {
        point::brightness_scale(&self.source, percent)
    }

    pub fn noise<R: Rng + ?Sized>(&self, percent: f32, rng: &mut R) -> PixelBuffer {
        point::noise(&self.source, percent, rng)
    }

    pub fn transparency(&self, percent: i32) -> PixelBuffer {
        point::transparency(&self.source, percent)
    }

    pub fn pseudo_colors(&self, seed: i64) -> PixelBuffer {
        point::pseudo_colors(&self.source, seed)
    }

    pub fn make_transparent(&self, r: u8, g: u8, b: u8, percent: f64) -> PixelBuffer {
        point::make_transparent(&self.source, r, g, b, percent)
    }

    // ---- Histogram and threshold analysis ----

    pub fn histogram(&self, channel: Channel) -> Histogram {
        histogram::compute_histogram(&self.source, channel)
    }

    pub fn channel_histograms(&self) -> ChannelHistograms {
        histogram::compute_channel_histograms(&self.source)
    }

    pub fn linear_contrast(&self) -> PixelBuffer {
        histogram::linear_contrast(&self.source)
    }

    pub fn equalize(&self) -> Equalization {
        histogram::equalize(&self.source)
    }

    /// Isodata threshold using the configured iteration parameters.
    pub fn isodata_threshold(&self) -> u8 {
        threshold::find_isodata_threshold(&self.source, &self.config.isodata)
    }

    pub fn threshold_isodata(&self) -> PixelBuffer {
        threshold::threshold_isodata(&self.source, &self.config.isodata)
    }

    pub fn gradient_threshold(&self) -> u8 {
        threshold::find_gradient_threshold(&self.source)
    }

    pub fn threshold_gradient(&self) -> PixelBuffer {
        threshold::threshold_gradient(&self.source)
    }

    /// Binarize with a cutoff from an external analyzer.
    pub fn threshold_global<T: GlobalThreshold + ?Sized>(
        &self,
        analyzer: &T,
    ) -> Result<PixelBuffer, ProcessError> {
        threshold::threshold_global(&self.source, analyzer)
    }

    /// Binarize with the built-in [`OtsuAnalyzer`].
    pub fn threshold_otsu(&self) -> Result<PixelBuffer, ProcessError> {
        self.threshold_global(&OtsuAnalyzer)
    }

    // ---- Geometric remapping ----

    pub fn bit_slice(&self, plane: u32) -> Result<PixelBuffer, ProcessError> {
        transform::bit_slice(&self.source, plane)
    }

    pub fn horizontal_wave(&self, params: &WaveParams) -> PixelBuffer {
        transform::horizontal_wave(&self.source, params, self.config.background)
    }

    pub fn ripple(&self, params: &WaveParams) -> PixelBuffer {
        transform::ripple(&self.source, params, self.config.background)
    }

    pub fn zoom(&self, percent: i32) -> Result<PixelBuffer, ProcessError> {
        transform::zoom(&self.source, percent)
    }

    // ---- Neighborhood filters ----

    pub fn line_art(&self, intensity: i32) -> PixelBuffer {
        filter::line_art(&self.source, intensity)
    }

    pub fn gray_line_art(&self, intensity: i32) -> PixelBuffer {
        filter::gray_line_art(&self.source, intensity)
    }

    pub fn emboss(&self, params: &EmbossParams) -> PixelBuffer {
        filter::emboss(&self.source, params)
    }

    pub fn gray_emboss(&self, params: &EmbossParams) -> PixelBuffer {
        filter::gray_emboss(&self.source, params)
    }
}
