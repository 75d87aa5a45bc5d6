//! WASM bindings for pixel-space crop math.

use crate::types::{from_js, to_js, JsDecodedImage};
use cropkit_core::geometry::{CropArea, DisplaySize, ExportedCropArea, ImageDimensions, ImageOffset};
use cropkit_core::transform::{apply_crop as core_crop, to_image_space as core_to_image_space};
use wasm_bindgen::prelude::*;

/// Cut an image-pixel rectangle `{ x, y, width, height }` out of an image.
///
/// The rectangle is clamped into the image first.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = apply_crop(sourceImage, cropper.exported_crop());
/// ```
#[wasm_bindgen]
pub fn apply_crop(image: &JsDecodedImage, area: JsValue) -> Result<JsDecodedImage, JsValue> {
    let area: ExportedCropArea = from_js(area)?;
    let result = core_crop(&image.to_decoded(), &area);
    Ok(JsDecodedImage::from_decoded(result))
}

/// Map a display-space crop to image pixels without a cropper session.
///
/// # Arguments
///
/// * `crop` - `{ x, y, width, height }` in viewport pixels
/// * `offset` - `{ offsetX, offsetY }` of the drawn image
/// * `scale` - Current zoom factor
/// * `base_width`, `base_height` - Display size at zoom 1.0
/// * `image_width`, `image_height` - Natural image size
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn to_image_space(
    crop: JsValue,
    offset: JsValue,
    scale: f64,
    base_width: f64,
    base_height: f64,
    image_width: u32,
    image_height: u32,
) -> Result<JsValue, JsValue> {
    let crop: CropArea = from_js(crop)?;
    let offset: ImageOffset = from_js(offset)?;
    let area = core_to_image_space(
        &crop,
        offset,
        scale,
        DisplaySize::new(base_width, base_height),
        ImageDimensions::new(image_width, image_height),
    );
    to_js(&area)
}
