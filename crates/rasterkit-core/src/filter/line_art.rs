//! Edge extraction by left and upper differencing.

use crate::luminance::luma;
use crate::raster::{argb, PixelBuffer};

/// Extract edges per color channel.
///
/// For every pixel below the first row, each channel becomes
/// `clamp((|above - c| + |left - c|) * intensity, 0, 255)`. Column 0 uses
/// itself as its left neighbour. The first row has no upper neighbour and
/// is filled with transparent black. Alpha is taken from the source pixel.
pub fn line_art(buffer: &PixelBuffer, intensity: i32) -> PixelBuffer {
    differenced(buffer, argb::rgb, intensity)
}

/// Extract edges on luma.
///
/// Same as [`line_art`] with every pixel reduced to its luma first, so the
/// output is gray.
pub fn gray_line_art(buffer: &PixelBuffer, intensity: i32) -> PixelBuffer {
    differenced(
        buffer,
        |p| {
            let v = luma(p);
            (v, v, v)
        },
        intensity,
    )
}

fn differenced<F>(buffer: &PixelBuffer, channels: F, intensity: i32) -> PixelBuffer
where
    F: Fn(u32) -> (u8, u8, u8),
{
    let edge = |c: u8, above: u8, left: u8| {
        let sum = (above as i32 - c as i32).abs() + (left as i32 - c as i32).abs();
        argb::clamp_channel(sum.saturating_mul(intensity))
    };

    buffer.map_coords(|x, y| {
        if y == 0 {
            return argb::TRANSPARENT;
        }
        let current = buffer.get(x, y);
        let left = buffer.get(x.saturating_sub(1), y);
        let above = buffer.get(x, y - 1);

        let (r, g, b) = channels(current);
        let (r1, g1, b1) = channels(left);
        let (r2, g2, b2) = channels(above);

        argb::with_rgb(
            current,
            edge(r, r2, r1),
            edge(g, g2, g1),
            edge(b, b2, b1),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_is_transparent_black() {
        let img = PixelBuffer::filled(4, 3, argb::WHITE).unwrap();
        let out = line_art(&img, 5);
        for x in 0..4 {
            assert_eq!(out.get(x, 0), argb::TRANSPARENT);
        }
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let img = PixelBuffer::filled(4, 3, argb::pack(200, 50, 60, 70)).unwrap();
        let out = line_art(&img, 10);
        for y in 1..3 {
            for x in 0..4 {
                assert_eq!(out.get(x, y), argb::pack(200, 0, 0, 0));
            }
        }
    }

    #[test]
    fn test_vertical_edge() {
        // Left half dark, right half bright.
        let img = PixelBuffer::from_fn(4, 2, |x, _| {
            if x < 2 {
                argb::pack(255, 10, 10, 10)
            } else {
                argb::pack(255, 40, 40, 40)
            }
        })
        .unwrap();
        let out = line_art(&img, 2);
        assert_eq!(out.get(1, 1), argb::pack(255, 0, 0, 0));
        assert_eq!(out.get(2, 1), argb::pack(255, 60, 60, 60));
        assert_eq!(out.get(3, 1), argb::pack(255, 0, 0, 0));
    }

    #[test]
    fn test_intensity_clamps() {
        let img = PixelBuffer::new(1, 2, vec![argb::BLACK, argb::pack(255, 100, 0, 20)]).unwrap();
        let out = line_art(&img, 3);
        assert_eq!(out.get(0, 1), argb::pack(255, 255, 0, 60));

        let out = line_art(&img, -3);
        assert_eq!(out.get(0, 1), argb::BLACK);
    }

    #[test]
    fn test_gray_line_art_uses_luma() {
        // Luma of (90, 0, 0) is 30.
        let img = PixelBuffer::new(1, 2, vec![argb::BLACK, argb::pack(255, 90, 0, 0)]).unwrap();
        let out = gray_line_art(&img, 1);
        assert_eq!(out.get(0, 1), argb::pack(255, 30, 30, 30));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
