//! Serialising cropped pixels to bytes.
//!
//! This module provides the "serialize raster surface to bytes" capability
//! used by the export pipeline:
//! - JPEG with configurable quality
//! - Lossless PNG and WebP
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::{encode_image, OutputFormat};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let png = encode_image(&pixels, 100, 100, OutputFormat::Png, 0).unwrap();
//! println!("Encoded {} bytes", png.len());
//! ```

mod encoder;

pub use encoder::{encode_image, EncodeError, OutputFormat, DEFAULT_QUALITY};
