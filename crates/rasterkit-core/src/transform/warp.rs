//! Sinusoidal warps: horizontal wave and ripple.
//!
//! # Algorithm
//!
//! Horizontal wave shifts every row sideways by a row-dependent amount:
//! ```text
//! frequency = waves * 2π / height
//! phase     = offset * waves * 2π / 100
//! radius    = width * percent / 100
//! shift(y)  = round(sin(y * frequency + phase) * radius)
//! dst(x, y) = src(x + shift(y), y)
//! ```
//!
//! Ripple rotates every centred coordinate by an angle that oscillates
//! with its distance from the centre:
//! ```text
//! amplitude = 2π * percent / 100
//! scale     = 2π * waves / sqrt(width² + height²)
//! phase     = offset * 2π / 100
//! a         = sin(dist(dx, dy) * scale + phase) * amplitude
//! src_x     = trunc(dx * cos a - dy * sin a) + center_x
//! src_y     = trunc(dy * cos a + dx * sin a) + center_y
//! ```

use std::f64::consts::TAU;

use super::round_half_up;
use crate::context::Geometry;
use crate::raster::PixelBuffer;
use crate::WaveParams;

/// Shift each row horizontally along a sine wave.
///
/// # Arguments
///
/// * `buffer` - Source raster
/// * `params` - Wave count, amplitude as a percentage of the width, and phase
///   offset as a percentage of one period
/// * `background` - ARGB fill for samples that fall outside the source
pub fn horizontal_wave(buffer: &PixelBuffer, params: &WaveParams, background: u32) -> PixelBuffer {
    let geometry = Geometry::of(buffer);
    let frequency = params.waves * TAU / geometry.height as f64;
    let phase = params.offset * params.waves * TAU / 100.0;
    let radius = geometry.width as f64 * params.percent / 100.0;
    let limit = i64::from(geometry.width);

    // Any shift of a full width or more samples outside the row.
    let shifts: Vec<i64> = (0..geometry.height)
        .map(|y| {
            round_half_up((y as f64 * frequency + phase).sin() * radius).clamp(-limit, limit)
        })
        .collect();

    buffer.map_coords(|x, y| {
        buffer
            .get_checked(x as i64 + shifts[y as usize], y as i64)
            .unwrap_or(background)
    })
}

/// Rotate coordinates around the centre by a distance-dependent angle.
///
/// # Arguments
///
/// * `buffer` - Source raster
/// * `params` - Ring count across the diagonal, maximum rotation as a
///   percentage of a full turn, and phase offset as a percentage of one period
/// * `background` - ARGB fill for samples that fall outside the source
pub fn ripple(buffer: &PixelBuffer, params: &WaveParams, background: u32) -> PixelBuffer {
    let geometry = Geometry::of(buffer);
    let amplitude = TAU * params.percent / 100.0;
    let max_dist = geometry.diagonal();
    let scale = TAU * params.waves / max_dist;
    let phase = params.offset * TAU / 100.0;

    buffer.map_coords(|x, y| {
        let (dx, dy) = geometry.centred(x, y);
        let (dx, dy) = (dx as f64, dy as f64);
        let a = ((dx * dx + dy * dy).sqrt() * scale + phase).sin() * amplitude;
        let (sa, ca) = a.sin_cos();

        let xs = (dx * ca - dy * sa) as i64 + geometry.center_x;
        let ys = (dy * ca + dx * sa) as i64 + geometry.center_y;
        buffer.get_checked(xs, ys).unwrap_or(background)
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u32>(), (w * h) as usize)
                .prop_map(move |pixels| PixelBuffer::new(w, h, pixels).unwrap())
        })
    }

    fn params_strategy() -> impl Strategy<Value = WaveParams> {
        (0.0f64..10.0, 0.0f64..100.0, 0.0f64..100.0).prop_map(|(waves, percent, offset)| {
            WaveParams {
                waves,
                percent,
                offset,
            }
        })
    }

    proptest! {
        /// Property: Wave output keeps dimensions and only contains source or fill pixels.
        #[test]
        fn prop_wave_samples_source_or_background(
            img in buffer_strategy(),
            params in params_strategy(),
            bg in any::<u32>(),
        ) {
            let out = horizontal_wave(&img, &params, bg);
            prop_assert_eq!((out.width(), out.height()), (img.width(), img.height()));
            for y in 0..img.height() {
                for x in 0..img.width() {
                    let p = out.get(x, y);
                    let row = &img.pixels()[(y * img.width()) as usize..((y + 1) * img.width()) as usize];
                    prop_assert!(p == bg || row.contains(&p));
                }
            }
        }

        /// Property: Ripple output keeps dimensions.
        #[test]
        fn prop_ripple_preserves_dimensions(
            img in buffer_strategy(),
            params in params_strategy(),
            bg in any::<u32>(),
        ) {
            let out = ripple(&img, &params, bg);
            prop_assert_eq!((out.width(), out.height()), (img.width(), img.height()));
        }
    }
}
