//! Bit-plane isolation.

use crate::raster::{argb, PixelBuffer, ProcessError};

/// Highest addressable plane of a packed ARGB word.
pub const MAX_BIT_PLANE: u32 = 31;

/// Isolate one bit of every packed ARGB word.
///
/// Planes `0..=7` are the blue channel, `8..=15` green, `16..=23` red and
/// `24..=31` alpha. A set bit becomes opaque white, a clear bit opaque black.
///
/// # Errors
///
/// Returns [`ProcessError::InvalidBitPlane`] when `plane > 31`.
pub fn bit_slice(buffer: &PixelBuffer, plane: u32) -> Result<PixelBuffer, ProcessError> {
    if plane > MAX_BIT_PLANE {
        return Err(ProcessError::InvalidBitPlane(plane));
    }

    Ok(buffer.map(|p| {
        if (p >> plane) & 1 == 1 {
            argb::WHITE
        } else {
            argb::BLACK
        }
    }))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
