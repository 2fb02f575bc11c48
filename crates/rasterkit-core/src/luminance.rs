//! Brightness and luma calculations on packed ARGB pixels.
//!
//! Two integer measures are used throughout the engine:
//!
//! - **Brightness**: the plain channel mean `(r + g + b) / 3`. Histogram
//!   thresholding, equalization and the grayscale array are built on it.
//! - **Luma**: a weighted mean `(3r + 4g + 2b) / 9` used by the gray point
//!   operator and the gray variants of the neighborhood filters.
//!
//! Both use integer division.

use crate::raster::argb;

/// Luma weight for the red channel.
pub const LUMA_R: u32 = 3;

/// Luma weight for the green channel.
pub const LUMA_G: u32 = 4;

/// Luma weight for the blue channel.
pub const LUMA_B: u32 = 2;

const LUMA_SUM: u32 = LUMA_R + LUMA_G + LUMA_B;

/// Mean of the red, green and blue channels.
#[inline]
pub fn brightness_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 + g as u32 + b as u32) / 3) as u8
}

/// Brightness of a packed ARGB pixel.
#[inline]
pub fn brightness(pixel: u32) -> u8 {
    let (r, g, b) = argb::rgb(pixel);
    brightness_u8(r, g, b)
}

/// Weighted luma of the red, green and blue channels.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B) / LUMA_SUM) as u8
}

/// Luma of a packed ARGB pixel.
#[inline]
pub fn luma(pixel: u32) -> u8 {
    let (r, g, b) = argb::rgb(pixel);
    luma_u8(r, g, b)
}
