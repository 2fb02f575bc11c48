//! Threshold search and binary classification.
//!
//! Three ways of picking a brightness cutoff are provided:
//!
//! - **Isodata**: iterative mean splitting, see [`find_isodata_threshold`].
//! - **Gradient-weighted mean**: brightness averaged with local gradient
//!   magnitude as weight, see [`find_gradient_threshold`].
//! - **Global (Otsu)**: delegated to a [`GlobalThreshold`] collaborator that
//!   receives the image encoded as PNG bytes.
//!
//! All three feed [`apply_threshold`]: a pixel whose brightness is strictly
//! greater than the cutoff becomes black, every other pixel becomes white.

use serde::{Deserialize, Serialize};

use crate::encode::encode_png;
use crate::histogram::compute_histogram;
use crate::luminance::{brightness, brightness_u8};
use crate::raster::{argb, PixelBuffer, ProcessError};
use crate::{Channel, Histogram};

/// Threshold returned when the gradient accumulator is empty.
pub const FLAT_IMAGE_THRESHOLD: u8 = 127;

/// Capability interface for an external global-threshold analyzer.
///
/// Implementations receive the encoded image and return a cutoff in
/// `0..=255`.
pub trait GlobalThreshold {
    fn threshold(&self, encoded: &[u8]) -> Result<u8, ProcessError>;
}

/// Built-in [`GlobalThreshold`] that maximizes between-class variance.
///
/// Decodes the bytes with the `image` crate and runs Otsu's method over the
/// brightness histogram.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtsuAnalyzer;

impl GlobalThreshold for OtsuAnalyzer {
    fn threshold(&self, encoded: &[u8]) -> Result<u8, ProcessError> {
        let decoded = image::load_from_memory(encoded)
            .map_err(|e| ProcessError::ThresholdFailed(e.to_string()))?
            .to_rgb8();

        let mut hist = Histogram::new();
        for px in decoded.pixels() {
            let [r, g, b] = px.0;
            hist.bins[brightness_u8(r, g, b) as usize] += 1;
        }
        Ok(otsu_threshold(&hist))
    }
}

/// Otsu's method: the level that maximizes between-class variance.
///
/// Returns 0 for an empty or single-level histogram.
pub fn otsu_threshold(hist: &Histogram) -> u8 {
    let total = hist.total() as f64;
    let sum_all: f64 = hist
        .bins
        .iter()
        .enumerate()
        .map(|(level, &count)| level as f64 * count as f64)
        .sum();

    let mut best_threshold = 0u8;
    let mut best_variance = 0.0f64;
    let mut weight_bg = 0.0f64;
    let mut sum_bg = 0.0f64;

    for (t, &count) in hist.bins.iter().enumerate() {
        weight_bg += count as f64;
        if weight_bg == 0.0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0.0 {
            break;
        }

        sum_bg += t as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg;
        let mean_fg = (sum_all - sum_bg) / weight_fg;

        let between = weight_bg * weight_fg * (mean_bg - mean_fg) * (mean_bg - mean_fg);
        if between > best_variance {
            best_variance = between;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Parameters of the isodata iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsodataConfig {
    /// Starting threshold.
    pub initial_guess: f64,
    /// Convergence tolerance on successive thresholds.
    pub epsilon: f64,
    /// Hard cap on the number of iterations.
    pub max_iterations: u32,
}

impl Default for IsodataConfig {
    fn default() -> Self {
        Self {
            initial_guess: 230.0,
            epsilon: 0.0001,
            max_iterations: 1000,
        }
    }
}

/// Iterative (isodata) threshold search.
///
/// Pixels are split by brightness into `< t` and `>= t`; the next threshold
/// is the midpoint of the two group means. The loop stops once successive
/// thresholds differ by at most `config.epsilon`, or after
/// `config.max_iterations` rounds. An empty group contributes a mean of 0.
///
/// Each round is evaluated over the brightness histogram, which partitions
/// exactly like a rescan of every pixel.
pub fn find_isodata_threshold(buffer: &PixelBuffer, config: &IsodataConfig) -> u8 {
    let hist = compute_histogram(buffer, Channel::Brightness);
    let mut t = config.initial_guess;

    for iteration in 1..=config.max_iterations {
        let (mut below_n, mut below_sum, mut above_n, mut above_sum) = (0u64, 0u64, 0u64, 0u64);
        for (level, &count) in hist.bins.iter().enumerate() {
            let count = count as u64;
            if (level as f64) < t {
                below_n += count;
                below_sum += level as u64 * count;
            } else {
                above_n += count;
                above_sum += level as u64 * count;
            }
        }

        let below_mean = group_mean(below_sum, below_n);
        let above_mean = group_mean(above_sum, above_n);
        if below_n == 0 || above_n == 0 {
            tracing::debug!(iteration, t, "isodata partition empty, using mean 0");
        }

        let next = (below_mean + above_mean) / 2.0;
        tracing::trace!(iteration, t, next, "isodata step");
        if (next - t).abs() <= config.epsilon {
            return to_level(next);
        }
        t = next;
    }

    tracing::warn!(
        max_iterations = config.max_iterations,
        t,
        "isodata threshold did not converge"
    );
    to_level(t)
}

/// Gradient-weighted mean brightness over interior pixels.
///
/// For every pixel not on the one-pixel border, the gradient magnitude is
/// `max(|b(x+1,y) - b(x-1,y)|, |b(x,y+1) - b(x,y-1)|)`. The threshold is
/// `sum(b * g) / sum(g)`. Returns [`FLAT_IMAGE_THRESHOLD`] when the
/// accumulated gradient is zero, which includes images without interior
/// pixels.
pub fn find_gradient_threshold(buffer: &PixelBuffer) -> u8 {
    let (width, height) = (buffer.width(), buffer.height());
    let b = |x: u32, y: u32| brightness(buffer.get(x, y)) as i64;

    let mut weighted = 0i64;
    let mut gradient = 0i64;
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let gm = b(x + 1, y) - b(x - 1, y);
            let gn = b(x, y + 1) - b(x, y - 1);
            let g = gm.abs().max(gn.abs());
            weighted += b(x, y) * g;
            gradient += g;
        }
    }

    if gradient == 0 {
        tracing::debug!("no gradient accumulated, using flat image threshold");
        return FLAT_IMAGE_THRESHOLD;
    }
    (weighted / gradient).clamp(0, 255) as u8
}

/// Classify every pixel against `threshold`.
///
/// Brightness strictly above the threshold becomes black, everything else
/// white. Alpha is preserved.
pub fn apply_threshold(buffer: &PixelBuffer, threshold: u8) -> PixelBuffer {
    buffer.map(|p| {
        if brightness(p) > threshold {
            argb::with_rgb(p, 0, 0, 0)
        } else {
            argb::with_rgb(p, 255, 255, 255)
        }
    })
}

/// Binarize with the isodata threshold.
pub fn threshold_isodata(buffer: &PixelBuffer, config: &IsodataConfig) -> PixelBuffer {
    apply_threshold(buffer, find_isodata_threshold(buffer, config))
}

/// Binarize with the gradient-weighted threshold.
pub fn threshold_gradient(buffer: &PixelBuffer) -> PixelBuffer {
    apply_threshold(buffer, find_gradient_threshold(buffer))
}

/// Binarize with a threshold supplied by a global-threshold collaborator.
///
/// The buffer is encoded as PNG and handed to `analyzer`; only the returned
/// cutoff is used.
pub fn threshold_global<T: GlobalThreshold + ?Sized>(
    buffer: &PixelBuffer,
    analyzer: &T,
) -> Result<PixelBuffer, ProcessError> {
    let encoded = encode_png(buffer)?;
    let threshold = analyzer.threshold(&encoded)?;
    tracing::debug!(threshold, bytes = encoded.len(), "global threshold received");
    Ok(apply_threshold(buffer, threshold))
}

#[inline]
fn group_mean(sum: u64, n: u64) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum as f64 / n as f64
    }
}

#[inline]
fn to_level(t: f64) -> u8 {
    t.floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32, values: &[u8]) -> PixelBuffer {
        PixelBuffer::new(
            width,
            height,
            values.iter().map(|&v| argb::pack(255, v, v, v)).collect(),
        )
        .unwrap()
    }

    fn is_binary(buffer: &PixelBuffer) -> bool {
        buffer.pixels().iter().all(|&p| {
            let rgb = argb::rgb(p);
            rgb == (0, 0, 0) || rgb == (255, 255, 255)
        })
    }

    struct FixedThreshold(u8);

    impl GlobalThreshold for FixedThreshold {
        fn threshold(&self, _encoded: &[u8]) -> Result<u8, ProcessError> {
            Ok(self.0)
        }
    }

    struct FailingThreshold;

    impl GlobalThreshold for FailingThreshold {
        fn threshold(&self, _encoded: &[u8]) -> Result<u8, ProcessError> {
            Err(ProcessError::ThresholdFailed("unavailable".to_string()))
        }
    }

    #[test]
    fn test_isodata_checkerboard() {
        let img = gray_image(2, 2, &[0, 255, 255, 0]);
        let config = IsodataConfig {
            max_iterations: 50,
            ..Default::default()
        };
        assert_eq!(find_isodata_threshold(&img, &config), 127);
    }

    #[test]
    fn test_isodata_bimodal() {
        let img = gray_image(4, 1, &[10, 20, 200, 210]);
        // Means 15 and 205 -> 110
        assert_eq!(find_isodata_threshold(&img, &IsodataConfig::default()), 110);
    }

    #[test]
    fn test_isodata_uniform_image_uses_empty_group_fallback() {
        // 100 < 230, so the upper group is empty: t = (100 + 0) / 2 = 50.
        // Next round everything is >= 50, the lower group is empty: t = 50.
        let img = gray_image(2, 2, &[100, 100, 100, 100]);
        assert_eq!(find_isodata_threshold(&img, &IsodataConfig::default()), 50);
    }

    #[test]
    fn test_isodata_iteration_cap() {
        let img = gray_image(2, 2, &[0, 255, 255, 0]);
        let config = IsodataConfig {
            max_iterations: 0,
            ..Default::default()
        };
        assert_eq!(find_isodata_threshold(&img, &config), 230);
    }

    #[test]
    fn test_gradient_threshold_flat_image() {
        let img = gray_image(3, 3, &[50; 9]);
        assert_eq!(find_gradient_threshold(&img), FLAT_IMAGE_THRESHOLD);
    }

    #[test]
    fn test_gradient_threshold_without_interior() {
        let img = gray_image(2, 2, &[0, 255, 255, 0]);
        assert_eq!(find_gradient_threshold(&img), FLAT_IMAGE_THRESHOLD);
    }

    #[test]
    fn test_gradient_threshold_single_interior_pixel() {
        // Only (1, 1) is interior: gm = 90 - 10 = 80, gn = 0, b = 60.
        let img = gray_image(3, 3, &[0, 0, 0, 10, 60, 90, 0, 0, 0]);
        assert_eq!(find_gradient_threshold(&img), 60);
    }

    #[test]
    fn test_gradient_threshold_weighted_mean() {
        // Interior pixels (1,1) and (2,1) in a 4x3 image.
        // (1,1): b=100, gm = 200 - 0 = 200 -> g = 200
        // (2,1): b=200, gm = 255 - 100 = 155 -> g = 155
        // (100*200 + 200*155) / 355 = 51000 / 355 = 143
        let img = gray_image(
            4,
            3,
            &[
                0, 100, 200, 255, //
                0, 100, 200, 255, //
                0, 100, 200, 255,
            ],
        );
        assert_eq!(find_gradient_threshold(&img), 143);
    }

    #[test]
    fn test_apply_threshold_polarity() {
        let img = gray_image(3, 1, &[99, 100, 101]);
        let out = apply_threshold(&img, 100);
        assert_eq!(out.get(0, 0), argb::WHITE);
        assert_eq!(out.get(1, 0), argb::WHITE);
        assert_eq!(out.get(2, 0), argb::BLACK);
    }

    #[test]
    fn test_apply_threshold_preserves_alpha() {
        let img = PixelBuffer::new(1, 1, vec![argb::pack(17, 200, 200, 200)]).unwrap();
        assert_eq!(apply_threshold(&img, 10).get(0, 0), argb::pack(17, 0, 0, 0));
    }

    #[test]
    fn test_threshold_isodata_is_binary() {
        let img = gray_image(3, 2, &[5, 80, 120, 160, 220, 250]);
        assert!(is_binary(&threshold_isodata(&img, &IsodataConfig::default())));
    }

    #[test]
    fn test_threshold_global_uses_collaborator_value() {
        let img = gray_image(2, 1, &[10, 200]);
        let out = threshold_global(&img, &FixedThreshold(100)).unwrap();
        assert_eq!(out.get(0, 0), argb::WHITE);
        assert_eq!(out.get(1, 0), argb::BLACK);
    }

    #[test]
    fn test_threshold_global_propagates_failure() {
        let img = gray_image(1, 1, &[10]);
        let err = threshold_global(&img, &FailingThreshold).unwrap_err();
        assert_eq!(err, ProcessError::ThresholdFailed("unavailable".to_string()));
    }

    #[test]
    fn test_otsu_threshold_bimodal() {
        let mut hist = Histogram::new();
        for level in 0..50 {
            hist.bins[level] = 1;
        }
        for level in 200..256 {
            hist.bins[level] = 1;
        }
        let t = otsu_threshold(&hist);
        assert!((49..200).contains(&t), "otsu threshold was {}", t);
    }

    #[test]
    fn test_otsu_threshold_empty() {
        assert_eq!(otsu_threshold(&Histogram::new()), 0);
    }

    #[test]
    fn test_otsu_analyzer_on_encoded_image() {
        let img = gray_image(4, 1, &[10, 20, 200, 210]);
        let encoded = encode_png(&img).unwrap();
        let t = OtsuAnalyzer.threshold(&encoded).unwrap();
        assert!((20..200).contains(&t), "otsu threshold was {}", t);
    }

    #[test]
    fn test_otsu_analyzer_rejects_garbage() {
        let err = OtsuAnalyzer.threshold(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ProcessError::ThresholdFailed(_)));
    }

    #[test]
    fn test_threshold_global_with_otsu_analyzer() {
        let img = gray_image(4, 1, &[10, 20, 200, 210]);
        let out = threshold_global(&img, &OtsuAnalyzer).unwrap();
        assert_eq!(
            out.pixels(),
            &[argb::WHITE, argb::WHITE, argb::BLACK, argb::BLACK]
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating a small buffer with arbitrary ARGB pixels.
    fn buffer_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=20, 1u32..=20).prop_flat_map(|(w, h)| {
            let len = (w * h) as usize;
            prop::collection::vec(any::<u32>(), len..=len)
                .prop_map(move |pixels| PixelBuffer::new(w, h, pixels).unwrap())
        })
    }

    fn assert_binary(buffer: &PixelBuffer) -> Result<(), TestCaseError> {
        for &p in buffer.pixels() {
            let rgb = argb::rgb(p);
            prop_assert!(rgb == (0, 0, 0) || rgb == (255, 255, 255));
        }
        Ok(())
    }

    proptest! {
        /// Property: every threshold operator yields pure black or white pixels.
        #[test]
        fn prop_binary_exclusivity(img in buffer_strategy(), t in any::<u8>()) {
            assert_binary(&apply_threshold(&img, t))?;
            assert_binary(&threshold_isodata(&img, &IsodataConfig::default()))?;
            assert_binary(&threshold_gradient(&img))?;
        }

        /// Property: isodata converges within a bounded number of iterations.
        #[test]
        fn prop_isodata_converges(img in buffer_strategy()) {
            let capped = IsodataConfig { max_iterations: 300, ..Default::default() };
            let uncapped = IsodataConfig { max_iterations: 100_000, ..Default::default() };
            prop_assert_eq!(
                find_isodata_threshold(&img, &capped),
                find_isodata_threshold(&img, &uncapped)
            );
        }

        /// Property: threshold operators preserve dimensions.
        #[test]
        fn prop_dimensions_preserved(img in buffer_strategy()) {
            let out = threshold_gradient(&img);
            prop_assert_eq!((out.width(), out.height()), (img.width(), img.height()));
        }

        /// Property: the gradient threshold lies within the image's brightness range.
        #[test]
        fn prop_gradient_threshold_bounded(img in buffer_strategy()) {
            let t = find_gradient_threshold(&img);
            if t != FLAT_IMAGE_THRESHOLD {
                let levels: Vec<u8> = img.pixels().iter().map(|&p| brightness(p)).collect();
                let min = *levels.iter().min().unwrap();
                let max = *levels.iter().max().unwrap();
                prop_assert!(t >= min && t <= max);
            }
        }
    }
}
