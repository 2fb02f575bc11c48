//! Geometric remapping: bit planes, waves, ripples and zoom.
//!
//! Every operator here produces a destination of the source's dimensions by
//! inverse mapping: for each destination pixel, in row-major order, compute
//! the source coordinate it pulls from and copy that pixel.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Centred coordinates are `x - center_x`, `y - center_y` with
//!   `center_x = width / 2` and `center_y = height / 2`
//!   (see [`Geometry`](crate::context::Geometry))
//! - A source coordinate outside the buffer never wraps; the operator fills
//!   the destination pixel with its own fill color instead

mod bit_plane;
mod warp;
mod zoom;

pub use bit_plane::{bit_slice, MAX_BIT_PLANE};
pub use warp::{horizontal_wave, ripple};
pub use zoom::zoom;

/// Round to the nearest integer, halves toward positive infinity.
#[inline]
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-1.5), -1);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.51), -3);
    }
}
