//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode JPEG/PNG/WebP bytes with EXIF orientation applied
//! - [`probe_dimensions`] - Read the oriented pixel size without decoding pixels
//! - [`resize`] - Resize an image to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { probe_dimensions, decode_image } from '@cropkit/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const { width, height } = probe_dimensions(bytes);
//! const image = decode_image(bytes);
//! ```

use crate::types::{filter_from_u8, js_error, to_js, JsDecodedImage};
use cropkit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an encoded image.
///
/// # Errors
///
/// Returns an error string if the format is not recognised or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Read `{ width, height }` of an encoded image, after EXIF orientation.
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<JsValue, JsValue> {
    let dimensions = decode::probe_dimensions(bytes).map_err(js_error)?;
    to_js(&dimensions)
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - Source image
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = Lanczos3
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    decode::resize(&image.to_decoded(), width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}
