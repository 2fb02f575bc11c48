//! Point operators.
//!
//! Every output pixel depends only on the co-located input pixel (plus, for
//! [`noise`] and [`pseudo_colors`], an explicitly supplied random source).
//! Alpha is preserved unless the operator exists to change it.
//!
//! ## Channel overflow
//!
//! [`add_const`] and [`subtract_const`] do not clamp. Each channel is
//! recombined with [`argb::pack_unclamped`], so a result outside `0..=255`
//! carries into the neighbouring channel. All other operators clamp to
//! `0..=255`.

use rand::Rng;

use crate::luminance::{brightness, luma};
use crate::raster::{argb, PixelBuffer};

/// Copy the source unchanged.
pub fn copy(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.clone()
}

/// Invert each color channel: `255 - v`.
pub fn invert(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        argb::with_rgb(p, 255 - r, 255 - g, 255 - b)
    })
}

/// Add `k` to each color channel without clamping.
pub fn add_const(buffer: &PixelBuffer, k: i32) -> PixelBuffer {
    buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        argb::pack_unclamped(
            p,
            (r as i32).wrapping_add(k),
            (g as i32).wrapping_add(k),
            (b as i32).wrapping_add(k),
        )
    })
}

/// Subtract `k` from each color channel without clamping.
pub fn subtract_const(buffer: &PixelBuffer, k: i32) -> PixelBuffer {
    buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        argb::pack_unclamped(
            p,
            (r as i32).wrapping_sub(k),
            (g as i32).wrapping_sub(k),
            (b as i32).wrapping_sub(k),
        )
    })
}

/// Replace each color channel with `floor(ln(v))`.
///
/// `ln(0)` is undefined; a zero channel stays 0.
pub fn log(buffer: &PixelBuffer) -> PixelBuffer {
    let mut zero_channels = 0usize;
    let out = buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        let mut ln = |v: u8| {
            if v == 0 {
                zero_channels += 1;
                0
            } else {
                (v as f64).ln().floor() as u8
            }
        };
        let (r, g, b) = (ln(r), ln(g), ln(b));
        argb::with_rgb(p, r, g, b)
    });
    if zero_channels > 0 {
        tracing::debug!(zero_channels, "log of zero channel values mapped to 0");
    }
    out
}

/// Per-pixel grayscale values as packed ARGB words.
///
/// Each entry keeps the source alpha and replicates the pixel's brightness
/// `(r + g + b) / 3` into all three color channels.
pub fn grayscale_array(buffer: &PixelBuffer) -> Vec<u32> {
    buffer
        .pixels()
        .iter()
        .map(|&p| {
            let v = brightness(p);
            argb::with_rgb(p, v, v, v)
        })
        .collect()
}

/// Power-law transform normalized by the brightest grayscale value.
///
/// Each channel becomes `floor(255 * (v / max) ^ exponent)` where `max` is
/// the largest entry of [`grayscale_array`], clamped to `0..=255`. An image
/// whose maximum grayscale value is 0 maps to black.
pub fn pow(buffer: &PixelBuffer, exponent: i32) -> PixelBuffer {
    let max = grayscale_array(buffer)
        .into_iter()
        .map(argb::blue)
        .max()
        .unwrap_or(0);

    if max == 0 {
        tracing::debug!("pow on an all-black image, returning black channels");
        return buffer.map(|p| argb::with_rgb(p, 0, 0, 0));
    }

    let max = max as f64;
    let scale = |v: u8| {
        let scaled = 255.0 * (v as f64 / max).powi(exponent);
        // NaN maps to 0 and infinities saturate before clamping.
        (scaled as i64).clamp(0, 255) as u8
    };
    buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        argb::with_rgb(p, scale(r), scale(g), scale(b))
    })
}

/// Convert to gray using the weighted luma `(3r + 4g + 2b) / 9`.
pub fn gray(buffer: &PixelBuffer) -> PixelBuffer {
    buffer.map(|p| {
        let v = luma(p);
        argb::with_rgb(p, v, v, v)
    })
}

/// Scale each color channel by `percent / 100`, clamped to `0..=255`.
pub fn brightness_scale(buffer: &PixelBuffer, percent: i32) -> PixelBuffer {
    buffer.map(|p| {
        let (r, g, b) = argb::rgb(p);
        argb::with_rgb(
            p,
            scale_percent(r, percent),
            scale_percent(g, percent),
            scale_percent(b, percent),
        )
    })
}

/// Brighten each pixel by a random factor in `[100, 100 + percent)` percent.
///
/// One factor is drawn per pixel from `rng` and applied to all three
/// channels, clamped to `0..=255`. Pixels are visited in row-major order, so
/// a seeded generator gives reproducible output.
pub fn noise<R: Rng + ?Sized>(buffer: &PixelBuffer, percent: f32, rng: &mut R) -> PixelBuffer {
    buffer.map(|p| {
        let factor = (rng.gen::<f32>() * percent) as i32 + 100;
        let (r, g, b) = argb::rgb(p);
        argb::with_rgb(
            p,
            scale_percent(r, factor),
            scale_percent(g, factor),
            scale_percent(b, factor),
        )
    })
}

/// Scale only the alpha channel by `percent / 100`, clamped to `0..=255`.
pub fn transparency(buffer: &PixelBuffer, percent: i32) -> PixelBuffer {
    buffer.map(|p| argb::with_alpha(p, scale_percent(argb::alpha(p), percent)))
}

/// Shift every pixel's RGB bits left by an amount derived from `seed`.
///
/// A single value is drawn from [`ShiftSequence`]; its low five bits give the
/// shift. The shifted word is masked to 24 bits and recombined with the
/// original alpha.
pub fn pseudo_colors(buffer: &PixelBuffer, seed: i64) -> PixelBuffer {
    let shift = ShiftSequence::new(seed).next_i32();
    tracing::debug!(seed, shift, "pseudo color shift drawn");
    buffer.map(|p| argb::alpha_bits(p) | argb::strip_alpha(p.wrapping_shl(shift as u32)))
}

/// Make pixels near a target color fully transparent.
///
/// A pixel matches when every channel lies within `percent * 1.28` of the
/// target (bounds truncated toward zero). Matching pixels lose their alpha;
/// all others are copied unchanged.
pub fn make_transparent(buffer: &PixelBuffer, r: u8, g: u8, b: u8, percent: f64) -> PixelBuffer {
    let tolerance = percent * 1.28;
    let range = |c: u8| {
        let c = c as f64;
        ((c - tolerance) as i32, (c + tolerance) as i32)
    };
    let (r_min, r_max) = range(r);
    let (g_min, g_max) = range(g);
    let (b_min, b_max) = range(b);

    buffer.map(|p| {
        let (pr, pg, pb) = argb::rgb(p);
        let (pr, pg, pb) = (pr as i32, pg as i32, pb as i32);
        let matches = (r_min..=r_max).contains(&pr)
            && (g_min..=g_max).contains(&pg)
            && (b_min..=b_max).contains(&pb);
        if matches {
            argb::strip_alpha(p)
        } else {
            p
        }
    })
}

#[inline]
fn scale_percent(v: u8, percent: i32) -> u8 {
    argb::clamp_channel((v as i32).saturating_mul(percent) / 100)
}

/// 48-bit linear congruential generator used by [`pseudo_colors`].
///
/// Uses the well-known multiplier `0x5DEECE66D` and increment `0xB`, taking
/// bits 47..16 of the state as output, so a given seed always produces the
/// same sequence on every platform.
#[derive(Debug, Clone)]
pub struct ShiftSequence {
    state: u64,
}

impl ShiftSequence {
    const MULTIPLIER: u64 = 0x5_DEEC_E66D;
    const INCREMENT: u64 = 0xB;
    const MASK: u64 = (1 << 48) - 1;

    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ Self::MULTIPLIER) & Self::MASK,
        }
    }

    /// Next 32 random bits as a signed integer.
    pub fn next_i32(&mut self) -> i32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
            & Self::MASK;
        (self.state >> 16) as u32 as i32
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
