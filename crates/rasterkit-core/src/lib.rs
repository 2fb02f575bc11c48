//! Rasterkit Core - Pixel transform engine
//!
//! This crate provides deterministic operators over a fixed-size ARGB
//! raster: point transforms, histogram analysis and thresholding, geometric
//! warps, and neighborhood filters. Decoding, display and charting belong to
//! the embedding shell.

pub mod context;
pub mod encode;
pub mod filter;
pub mod histogram;
pub mod luminance;
pub mod point;
pub mod raster;
pub mod threshold;
pub mod transform;

pub use context::{EngineConfig, Geometry, ProcessingContext};
pub use histogram::{compute_channel_histograms, compute_histogram, Equalization};
pub use raster::{argb, PixelBuffer, ProcessError};
pub use threshold::{GlobalThreshold, IsodataConfig, OtsuAnalyzer};

use serde::{Deserialize, Serialize};

/// Which value of a pixel a histogram bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
    /// Mean of red, green and blue
    Brightness,
    /// Weighted `(3r + 4g + 2b) / 9`
    Luma,
}

impl Channel {
    /// Extract this channel's value from a packed ARGB pixel.
    #[inline]
    pub fn value_of(self, pixel: u32) -> u8 {
        match self {
            Channel::Red => argb::red(pixel),
            Channel::Green => argb::green(pixel),
            Channel::Blue => argb::blue(pixel),
            Channel::Alpha => argb::alpha(pixel),
            Channel::Brightness => luminance::brightness(pixel),
            Channel::Luma => luminance::luma(pixel),
        }
    }
}

/// 256-bin histogram of one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Count per level, indexed by level.
    pub bins: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; 256] }
    }
}

impl Histogram {
    /// Create a new empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all bins.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Largest single bin, for chart normalization.
    pub fn max_value(&self) -> u32 {
        self.bins.iter().copied().max().unwrap_or(0)
    }

    /// Running sum of the bins.
    pub fn cumulative(&self) -> [u64; 256] {
        let mut out = [0u64; 256];
        let mut acc = 0u64;
        for (slot, &c) in out.iter_mut().zip(self.bins.iter()) {
            acc += c as u64;
            *slot = acc;
        }
        out
    }

    /// Lowest populated level, or `None` for an empty histogram.
    pub fn min_level(&self) -> Option<u8> {
        self.bins.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest populated level, or `None` for an empty histogram.
    pub fn max_level(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    /// Ordered `(level, count)` pairs for charting.
    pub fn points(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.bins.iter().enumerate().map(|(level, &count)| (level as u8, count))
    }
}

/// Red, green, blue and brightness histograms of one image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelHistograms {
    pub red: Histogram,
    pub green: Histogram,
    pub blue: Histogram,
    pub brightness: Histogram,
}

impl ChannelHistograms {
    /// Find the maximum value across the color channels for normalization
    pub fn max_value(&self) -> u32 {
        self.red
            .max_value()
            .max(self.green.max_value())
            .max(self.blue.max_value())
    }

    /// Check for highlight clipping (values at 255)
    pub fn has_highlight_clipping(&self) -> bool {
        self.red.bins[255] > 0 || self.green.bins[255] > 0 || self.blue.bins[255] > 0
    }

    /// Check for shadow clipping (values at 0)
    pub fn has_shadow_clipping(&self) -> bool {
        self.red.bins[0] > 0 || self.green.bins[0] > 0 || self.blue.bins[0] > 0
    }
}

/// Parameters shared by the horizontal wave and ripple warps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Number of wave periods (over the height for waves, the diagonal for ripples)
    pub waves: f64,
    /// Amplitude in percent (of the width for waves, of a full turn for ripples)
    pub percent: f64,
    /// Phase offset in percent of one period
    pub offset: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            waves: 3.0,
            percent: 5.0,
            offset: 0.0,
        }
    }
}

/// Parameters of the emboss filters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbossParams {
    /// Light direction in degrees
    pub angle: f64,
    /// Multiplier on the neighbour difference
    pub power: f64,
    /// Bias color
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for EmbossParams {
    fn default() -> Self {
        Self {
            angle: 45.0,
            power: 1.0,
            red: 128,
            green: 128,
            blue: 128,
        }
    }
}
