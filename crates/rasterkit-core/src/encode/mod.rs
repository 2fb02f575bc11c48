//! Encoding of processed rasters.
//!
//! This module provides functionality for:
//! - Encoding a [`PixelBuffer`](crate::raster::PixelBuffer) to PNG (lossless,
//!   keeps alpha). The global-threshold collaborator receives this format.
//! - Encoding to JPEG with configurable quality for export.
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use rasterkit_core::encode::encode_jpeg;
//!
//! let jpeg_bytes = encode_jpeg(&buffer, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;
