//! Directional emboss shading.
//!
//! # Algorithm
//!
//! A light direction `angle` (degrees) selects one neighbour through a flat
//! row-major offset:
//! ```text
//! light      = round(sin θ) * width + round(cos θ) - 1
//! neighbour  = pixels[clamp(y * width + x - light, 0, len - 1)]
//! out        = clamp(bias + trunc((neighbour - current) * power), 0, 255)
//! ```
//! The offset is applied to the flat index, so a neighbour past the end of a
//! row continues on the adjacent row. The outermost rows and columns are then
//! overwritten with the bias color.

use crate::luminance::luma;
use crate::raster::{argb, PixelBuffer};
use crate::transform::round_half_up;
use crate::EmbossParams;

/// Compute the flat-index offset of the light neighbour for `angle` degrees.
pub fn light_offset(angle: f64, width: u32) -> i64 {
    let theta = angle.to_radians();
    round_half_up(theta.sin()) * width as i64 + round_half_up(theta.cos()) - 1
}

/// Emboss each color channel independently.
pub fn emboss(buffer: &PixelBuffer, params: &EmbossParams) -> PixelBuffer {
    shade(buffer, params, argb::rgb)
}

/// Emboss on luma, producing relief shading tinted by the bias color.
pub fn gray_emboss(buffer: &PixelBuffer, params: &EmbossParams) -> PixelBuffer {
    shade(buffer, params, |p| {
        let v = luma(p);
        (v, v, v)
    })
}

fn shade<F>(buffer: &PixelBuffer, params: &EmbossParams, channels: F) -> PixelBuffer
where
    F: Fn(u32) -> (u8, u8, u8),
{
    let width = buffer.width();
    let height = buffer.height();
    let pixels = buffer.pixels();
    let last = pixels.len() as i64 - 1;
    let light = light_offset(params.angle, width);
    let bias = argb::pack(0, params.red, params.green, params.blue);

    let relief = |bias: u8, current: u8, neighbour: u8| {
        let delta = ((neighbour as f64 - current as f64) * params.power) as i32;
        argb::clamp_channel((bias as i32).saturating_add(delta))
    };

    buffer.map_coords(|x, y| {
        let current = buffer.get(x, y);
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            return argb::alpha_bits(current) | bias;
        }

        let index = y as i64 * width as i64 + x as i64;
        let neighbour = pixels[(index - light).clamp(0, last) as usize];

        let (r1, g1, b1) = channels(current);
        let (r2, g2, b2) = channels(neighbour);
        argb::with_rgb(
            current,
            relief(params.red, r1, r2),
            relief(params.green, g1, g2),
            relief(params.blue, b1, b2),
        )
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
