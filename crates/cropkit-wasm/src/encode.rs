//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_image`] - Encode RGB pixel data as JPEG, PNG or WebP
//! - [`encode_image_from`] - Encode a JsDecodedImage
//!
//! `format` accepts a MIME type (`"image/png"`) or a short name (`"jpg"`).

use crate::types::{format_from_str, js_error, JsDecodedImage};
use cropkit_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `format` - MIME type or short name
/// * `quality` - JPEG quality (1-100); ignored for PNG and WebP
///
/// # Errors
///
/// Returns an error if the format is unknown, the pixel data length doesn't
/// match `width * height * 3`, or the encoder fails.
#[wasm_bindgen]
pub fn encode_image(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: &str,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    let format = format_from_str(format)?;
    encode::encode_image(pixels, width, height, format, quality).map_err(js_error)
}

/// Encode a decoded image.
#[wasm_bindgen]
pub fn encode_image_from(
    image: &JsDecodedImage,
    format: &str,
    quality: u8,
) -> Result<Vec<u8>, JsValue> {
    let decoded = image.to_decoded();
    encode_image(&decoded.pixels, decoded.width, decoded.height, format, quality)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_by_mime_type() {
        let pixels = vec![128u8; 20 * 20 * 3];
        let png = encode_image(&pixels, 20, 20, "image/png", 90).unwrap();
        assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);

        let jpeg = encode_image(&pixels, 20, 20, "jpg", 80).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_errors() {
        let pixels = vec![128u8; 20 * 20 * 3];
        assert!(encode_image(&pixels, 20, 20, "image/gif", 90).is_err());
        assert!(encode_image(&pixels, 10, 10, "png", 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_image_from() {
        let img = JsDecodedImage::new(8, 8, vec![10u8; 8 * 8 * 3]);
        let webp = encode_image_from(&img, "webp", 90).unwrap();
        assert_eq!(&webp[0..4], b"RIFF");
    }
}
