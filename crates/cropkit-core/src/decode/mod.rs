//! Decoding image sources for the cropper.
//!
//! This module provides the "decode image source" capability:
//! - Reading the displayed pixel size from a header (cheap, used for layout)
//! - Full decoding to RGB pixels (used by the export pipeline)
//! - Resampling to a requested output size
//!
//! # Architecture
//!
//! All operations are synchronous and single-threaded. Hosts that decode on
//! another thread or in the browser pair the result with a
//! [`LoadToken`](crate::loader::LoadToken) so stale results can be discarded.
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::{decode_image, probe_dimensions};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let dims = probe_dimensions(&bytes).unwrap();
//! let image = decode_image(&bytes).unwrap();
//! assert_eq!((image.width, image.height), (dims.width, dims.height));
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, probe_dimensions};
pub use resize::resize;
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
