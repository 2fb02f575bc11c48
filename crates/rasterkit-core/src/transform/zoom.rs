//! Scaling about the image centre.

use crate::context::Geometry;
use crate::raster::{argb, PixelBuffer, ProcessError};

/// Scale the image about its centre.
///
/// The destination pixel at centred coordinate `(dx, dy)` pulls from
/// `(dx * 100 / percent + center_x, dy * 100 / percent + center_y)`, with
/// integer division truncating toward zero. Percentages above 100 magnify,
/// below 100 shrink, and 100 reproduces the source exactly. Samples outside
/// the source become transparent black.
///
/// # Errors
///
/// Returns [`ProcessError::InvalidZoom`] when `percent <= 0`.
pub fn zoom(buffer: &PixelBuffer, percent: i32) -> Result<PixelBuffer, ProcessError> {
    if percent <= 0 {
        return Err(ProcessError::InvalidZoom(percent));
    }

    let geometry = Geometry::of(buffer);
    let percent = percent as i64;

    Ok(buffer.map_coords(|x, y| {
        let (dx, dy) = geometry.centred(x, y);
        let xs = dx * 100 / percent + geometry.center_x;
        let ys = dy * 100 / percent + geometry.center_y;
        buffer.get_checked(xs, ys).unwrap_or(argb::TRANSPARENT)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::from_fn(width, height, |x, y| argb::pack(255, x as u8, y as u8, 0)).unwrap()
    }

    #[test]
    fn test_zoom_identity() {
        let img = numbered(5, 3);
        assert_eq!(zoom(&img, 100).unwrap(), img);
    }

    #[test]
    fn test_zoom_in_doubles_centre() {
        let img = numbered(4, 4);
        let out = zoom(&img, 200).unwrap();
        // Column sources: dx = -2, -1, 0, 1 map to 1, 2, 2, 2.
        let expected_cols = [1u8, 2, 2, 2];
        for y in 0..4u32 {
            for x in 0..4u32 {
                let p = out.get(x, y);
                assert_eq!(argb::red(p), expected_cols[x as usize]);
                assert_eq!(argb::green(p), expected_cols[y as usize]);
            }
        }
    }

    #[test]
    fn test_zoom_out_fills_transparent() {
        let img = numbered(4, 4);
        let out = zoom(&img, 50).unwrap();
        // dx = -2 and dx = 1 sample -2 and 4, both outside.
        assert_eq!(out.get(0, 1), argb::TRANSPARENT);
        assert_eq!(out.get(3, 1), argb::TRANSPARENT);
        assert_eq!(out.get(1, 1), img.get(0, 0));
        assert_eq!(out.get(2, 2), img.get(2, 2));
    }

    #[test]
    fn test_zoom_rejects_non_positive_percent() {
        let img = numbered(2, 2);
        assert_eq!(zoom(&img, 0), Err(ProcessError::InvalidZoom(0)));
        assert_eq!(zoom(&img, -50), Err(ProcessError::InvalidZoom(-50)));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
