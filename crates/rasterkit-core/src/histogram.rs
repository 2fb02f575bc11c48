//! Histogram computation and histogram-driven tone operators.
//!
//! This module builds 256-bin histograms from a [`PixelBuffer`] and uses
//! them for linear contrast stretching and cumulative-histogram
//! equalization. The histograms are also what the chart collaborator
//! displays.

use crate::luminance::brightness;
use crate::raster::{argb, PixelBuffer};
use crate::{Channel, ChannelHistograms, Histogram};

/// Compute the histogram of a single channel.
///
/// # Arguments
/// * `buffer` - Source raster
/// * `channel` - Which value to bin for every pixel
///
/// # Returns
/// A `Histogram` whose bins sum to `width * height`.
///
/// # Performance
/// Single pass, O(n) in the number of pixels.
pub fn compute_histogram(buffer: &PixelBuffer, channel: Channel) -> Histogram {
    let mut hist = Histogram::new();
    for &p in buffer.pixels() {
        hist.bins[channel.value_of(p) as usize] += 1;
    }
    hist
}

/// Compute red, green, blue and brightness histograms in one pass.
pub fn compute_channel_histograms(buffer: &PixelBuffer) -> ChannelHistograms {
    let mut hists = ChannelHistograms::default();
    for &p in buffer.pixels() {
        let (r, g, b) = argb::rgb(p);
        hists.red.bins[r as usize] += 1;
        hists.green.bins[g as usize] += 1;
        hists.blue.bins[b as usize] += 1;
        hists.brightness.bins[brightness(p) as usize] += 1;
    }
    hists
}

/// Stretch each color channel to the full `0..=255` range.
///
/// Every channel is rescaled independently with
/// `(v - min) / (max - min) * 255`, where `min` and `max` are the lowest and
/// highest populated bins of that channel's histogram. A channel with a
/// single populated bin (`max == min`) has nothing to stretch and is copied
/// unchanged.
pub fn linear_contrast(buffer: &PixelBuffer) -> PixelBuffer {
    let hists = compute_channel_histograms(buffer);
    let red = StretchRange::from_histogram(&hists.red, Channel::Red);
    let green = StretchRange::from_histogram(&hists.green, Channel::Green);
    let blue = StretchRange::from_histogram(&hists.blue, Channel::Blue);

    buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        argb::with_rgb(p, red.apply(r), green.apply(g), blue.apply(b))
    })
}

/// Per-channel bounds for [`linear_contrast`].
#[derive(Debug, Clone, Copy)]
struct StretchRange {
    min: f64,
    span: Option<f64>,
}

impl StretchRange {
    fn from_histogram(hist: &Histogram, channel: Channel) -> Self {
        let min = hist.min_level().unwrap_or(0);
        let max = hist.max_level().unwrap_or(0);
        let span = if max > min {
            Some((max - min) as f64)
        } else {
            tracing::debug!(?channel, level = min, "degenerate channel, skipping contrast stretch");
            None
        };
        Self {
            min: min as f64,
            span,
        }
    }

    #[inline]
    fn apply(&self, v: u8) -> u8 {
        match self.span {
            Some(span) => (((v as f64 - self.min) / span) * 255.0) as u8,
            None => v,
        }
    }
}

/// Result of [`equalize`]: the equalized image and its histogram.
#[derive(Debug, Clone)]
pub struct Equalization {
    /// Opaque grayscale image after equalization.
    pub image: PixelBuffer,
    /// Brightness histogram of `image`, for display.
    pub histogram: Histogram,
}

/// Build the equalization lookup table for a histogram.
///
/// `lut[i] = cumulative[i] * 255 / total`, truncated.
pub fn equalization_lut(hist: &Histogram) -> [u8; 256] {
    let cumulative = hist.cumulative();
    let total = cumulative[255];
    let mut lut = [0u8; 256];
    if total == 0 {
        return lut;
    }
    for (entry, &c) in lut.iter_mut().zip(cumulative.iter()) {
        *entry = (c as f64 * 255.0 / total as f64) as u8;
    }
    lut
}

/// Cumulative-histogram equalization on the brightness of the source.
///
/// The source is reduced to its brightness `(r + g + b) / 3`, the brightness
/// histogram is mapped through [`equalization_lut`], and the result is
/// written as opaque gray pixels.
pub fn equalize(buffer: &PixelBuffer) -> Equalization {
    let source_hist = compute_histogram(buffer, Channel::Brightness);
    let lut = equalization_lut(&source_hist);

    let image = buffer.map(|p| {
        let v = lut[brightness(p) as usize];
        argb::pack(255, v, v, v)
    });
    let histogram = compute_histogram(&image, Channel::Blue);

    Equalization { image, histogram }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
