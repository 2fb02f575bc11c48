//! Packing and unpacking of 32-bit ARGB pixel values.
//!
//! Layout, high to low: 8 bits alpha, 8 red, 8 green, 8 blue.

/// Opaque black.
pub const BLACK: u32 = 0xFF00_0000;

/// Opaque white.
pub const WHITE: u32 = 0xFFFF_FFFF;

/// Fully transparent black, used as the "undefined" sentinel.
pub const TRANSPARENT: u32 = 0x0000_0000;

const ALPHA_MASK: u32 = 0xFF00_0000;
const RGB_MASK: u32 = 0x00FF_FFFF;

/// Pack four channels into an ARGB word.
#[inline]
pub const fn pack(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

#[inline]
pub const fn alpha(pixel: u32) -> u8 {
    (pixel >> 24) as u8
}

#[inline]
pub const fn red(pixel: u32) -> u8 {
    (pixel >> 16) as u8
}

#[inline]
pub const fn green(pixel: u32) -> u8 {
    (pixel >> 8) as u8
}

#[inline]
pub const fn blue(pixel: u32) -> u8 {
    pixel as u8
}

/// Split a pixel into its `(r, g, b)` channels.
#[inline]
pub const fn rgb(pixel: u32) -> (u8, u8, u8) {
    (red(pixel), green(pixel), blue(pixel))
}

/// Keep the alpha of `pixel` and replace its color channels.
#[inline]
pub const fn with_rgb(pixel: u32, r: u8, g: u8, b: u8) -> u32 {
    (pixel & ALPHA_MASK) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Keep the color channels of `pixel` and replace its alpha.
#[inline]
pub const fn with_alpha(pixel: u32, a: u8) -> u32 {
    (pixel & RGB_MASK) | ((a as u32) << 24)
}

/// Drop the alpha of `pixel`, making it fully transparent.
#[inline]
pub const fn strip_alpha(pixel: u32) -> u32 {
    pixel & RGB_MASK
}

/// Keep only the alpha of `pixel`.
#[inline]
pub const fn alpha_bits(pixel: u32) -> u32 {
    pixel & ALPHA_MASK
}

/// Recombine unclamped channel values with the alpha of `pixel`.
///
/// Computes `alpha + (r << 16) + (g << 8) + b` in wrapping 32-bit integer
/// arithmetic. A channel outside `0..=255` carries into (or borrows from) the
/// neighbouring fields instead of saturating.
#[inline]
pub const fn pack_unclamped(pixel: u32, r: i32, g: i32, b: i32) -> u32 {
    (pixel & ALPHA_MASK)
        .wrapping_add((r as u32).wrapping_shl(16))
        .wrapping_add((g as u32).wrapping_shl(8))
        .wrapping_add(b as u32)
}

/// Clamp an integer channel value into `0..=255`.
#[inline]
pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
