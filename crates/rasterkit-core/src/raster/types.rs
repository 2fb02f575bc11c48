//! Core raster types and the engine error taxonomy.

use thiserror::Error;

use super::argb;

/// Error types for raster processing operations.
#[derive(Debug, Error, PartialEq)]
pub enum ProcessError {
    /// Width or height is zero, or the pixel count does not fit in memory.
    #[error("Invalid dimensions: {width}x{height} is empty or too large to address")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match the requested dimensions.
    #[error("Invalid pixel data: expected {expected} values, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Bit plane index outside the 32-bit ARGB word.
    #[error("Invalid bit plane {0}: expected 0..=31")]
    InvalidBitPlane(u32),

    /// Zoom percentage must be positive.
    #[error("Invalid zoom percentage {0}: must be greater than zero")]
    InvalidZoom(i32),

    /// Encoding the raster for a collaborator failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// The global-threshold collaborator could not produce a threshold.
    #[error("Threshold computation failed: {0}")]
    ThresholdFailed(String),
}

/// An immutable width x height grid of packed ARGB pixels in row-major order.
///
/// Dimensions are validated at construction and never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Create a buffer from row-major ARGB pixels.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, ProcessError> {
        let expected = Self::checked_len(width, height)?;
        if pixels.len() != expected {
            return Err(ProcessError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: u32) -> Result<Self, ProcessError> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; len],
        })
    }

    /// Create a buffer by evaluating `f(x, y)` for every pixel in row-major order.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self, ProcessError>
    where
        F: FnMut(u32, u32) -> u32,
    {
        let len = Self::checked_len(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer from RGBA bytes (4 bytes per pixel, row-major order).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, ProcessError> {
        let expected = Self::checked_len(width, height)?
            .checked_mul(4)
            .ok_or(ProcessError::InvalidDimensions { width, height })?;
        if bytes.len() != expected {
            return Err(ProcessError::InvalidPixelData {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| argb::pack(c[3], c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: &image::RgbaImage) -> Result<Self, ProcessError> {
        let (width, height) = img.dimensions();
        Self::from_rgba8(width, height, img.as_raw())
    }

    /// Convert to RGBA bytes (4 bytes per pixel, row-major order).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &p in &self.pixels {
            bytes.extend_from_slice(&[argb::red(p), argb::green(p), argb::blue(p), argb::alpha(p)]);
        }
        bytes
    }

    /// Convert to RGB bytes (3 bytes per pixel), discarding alpha.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            bytes.extend_from_slice(&[argb::red(p), argb::green(p), argb::blue(p)]);
        }
        bytes
    }

    /// Convert to an `image::RgbaImage` for codec collaborators.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.to_rgba8())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Consume the buffer and return its pixel data.
    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) out of bounds for {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Read the pixel at signed coordinates, or `None` outside the buffer.
    #[inline]
    pub fn get_checked(&self, x: i64, y: i64) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Apply `f` to every pixel, producing a new buffer of the same size.
    pub fn map<F>(&self, f: F) -> PixelBuffer
    where
        F: FnMut(u32) -> u32,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().copied().map(f).collect(),
        }
    }

    /// Build a new buffer of the same size from `f(x, y)` in row-major order.
    pub fn map_coords<F>(&self, mut f: F) -> PixelBuffer
    where
        F: FnMut(u32, u32) -> u32,
    {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for y in 0..self.height {
            for x in 0..self.width {
                pixels.push(f(x, y));
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    fn checked_len(width: u32, height: u32) -> Result<usize, ProcessError> {
        if width == 0 || height == 0 {
            return Err(ProcessError::InvalidDimensions { width, height });
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(ProcessError::InvalidDimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_dimensions() {
        let err = PixelBuffer::new(0, 10, vec![]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::InvalidDimensions {
                width: 0,
                height: 10
            }
        );
    }

    #[test]
    fn test_new_validates_pixel_count() {
        let err = PixelBuffer::new(2, 2, vec![0; 3]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::InvalidPixelData {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_get_is_row_major() {
        let buffer = PixelBuffer::new(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(buffer.get(0, 0), 0);
        assert_eq!(buffer.get(2, 0), 2);
        assert_eq!(buffer.get(0, 1), 3);
        assert_eq!(buffer.get(2, 1), 5);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_get_out_of_bounds_panics() {
        let buffer = PixelBuffer::filled(2, 2, 0).unwrap();
        buffer.get(2, 0);
    }

    #[test]
    fn test_get_checked() {
        let buffer = PixelBuffer::new(2, 1, vec![7, 8]).unwrap();
        assert_eq!(buffer.get_checked(1, 0), Some(8));
        assert_eq!(buffer.get_checked(-1, 0), None);
        assert_eq!(buffer.get_checked(2, 0), None);
        assert_eq!(buffer.get_checked(0, 1), None);
    }

    #[test]
    fn test_from_fn_fills_row_major() {
        let buffer = PixelBuffer::from_fn(3, 2, |x, y| y * 10 + x).unwrap();
        assert_eq!(buffer.pixels(), &[0, 1, 2, 10, 11, 12]);
    }

    #[test]
    fn test_rgba8_conversion() {
        let bytes = vec![10, 20, 30, 40, 50, 60, 70, 80];
        let buffer = PixelBuffer::from_rgba8(2, 1, &bytes).unwrap();
        assert_eq!(buffer.get(0, 0), argb::pack(40, 10, 20, 30));
        assert_eq!(buffer.to_rgba8(), bytes);
        assert_eq!(buffer.to_rgb8(), vec![10, 20, 30, 50, 60, 70]);
    }

    #[test]
    fn test_rgba8_wrong_length() {
        let err = PixelBuffer::from_rgba8(2, 1, &[0; 7]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::InvalidPixelData {
                expected: 8,
                actual: 7
            }
        );
    }

    #[test]
    fn test_rgba8_byte_count_overflow_is_rejected() {
        let err = PixelBuffer::from_rgba8(u32::MAX, u32::MAX, &[]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX
            }
        );
    }

    #[test]
    #[cfg(target_pointer_width = "32")]
    fn test_pixel_count_overflow_is_rejected() {
        let err = PixelBuffer::new(65536, 65536, vec![]).unwrap_err();
        assert_eq!(
            err,
            ProcessError::InvalidDimensions {
                width: 65536,
                height: 65536
            }
        );
    }

    #[test]
    fn test_rgba_image_round_trip() {
        let buffer = PixelBuffer::from_fn(4, 3, |x, y| argb::pack(255, x as u8, y as u8, 9)).unwrap();
        let img = buffer.to_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(PixelBuffer::from_rgba_image(&img).unwrap(), buffer);
    }

    #[test]
    fn test_map_preserves_dimensions() {
        let buffer = PixelBuffer::filled(5, 3, 1).unwrap();
        let mapped = buffer.map(|p| p + 1);
        assert_eq!(mapped.width(), 5);
        assert_eq!(mapped.height(), 3);
        assert!(mapped.pixels().iter().all(|&p| p == 2));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProcessError::InvalidBitPlane(40).to_string(),
            "Invalid bit plane 40: expected 0..=31"
        );
        assert_eq!(
            ProcessError::InvalidZoom(0).to_string(),
            "Invalid zoom percentage 0: must be greater than zero"
        );
    }
}
