//! Raster representation shared by every operator.
//!
//! A [`PixelBuffer`] is a fixed-size grid of packed 32-bit ARGB pixels
//! (alpha in the high byte, blue in the low byte). Operators read a source
//! buffer and always return a freshly allocated destination of the same
//! dimensions.
//!
//! # Examples
//!
//! ```ignore
//! use rasterkit_core::raster::{argb, PixelBuffer};
//!
//! let buffer = PixelBuffer::filled(4, 4, argb::pack(255, 10, 20, 30)).unwrap();
//! assert_eq!(argb::red(buffer.get(0, 0)), 10);
//! ```

pub mod argb;
mod types;

pub use types::{PixelBuffer, ProcessError};
