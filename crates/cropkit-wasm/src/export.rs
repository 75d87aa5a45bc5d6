//! Export bindings.
//!
//! The browser fetches remote sources itself, so every binding takes the
//! encoded source bytes. The request is a partial `ExportRequest` object:
//!
//! ```typescript
//! const file = export_file(bytes, "holiday.jpg", {
//!   crop: cropper.exported_crop(),
//!   format: "webp",
//!   outputWidth: 1080,
//! });
//! ```

use crate::types::{from_js_opt, js_error, JsDecodedImage};
use cropkit_core::export::{self, ExportOutput, ExportRequest, ImageSource, NoFetch};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, File, FilePropertyBag};

fn request_from_js(request: JsValue) -> Result<ExportRequest, JsValue> {
    Ok(from_js_opt(request)?.unwrap_or_default())
}

fn render(source: &ImageSource, request: JsValue) -> Result<ExportOutput, JsValue> {
    let request = request_from_js(request)?;
    export::export_crop(source, &NoFetch, &request).map_err(js_error)
}

fn byte_parts(bytes: &[u8]) -> Array {
    Array::of1(&Uint8Array::from(bytes))
}

/// Export as encoded bytes (`Uint8Array`).
#[wasm_bindgen]
pub fn export_bytes(bytes: &[u8], request: JsValue) -> Result<Vec<u8>, JsValue> {
    render(&ImageSource::Blob(bytes.to_vec()), request).map(ExportOutput::into_bytes)
}

/// Export as a `Blob` typed with the output MIME type.
#[wasm_bindgen]
pub fn export_blob(bytes: &[u8], request: JsValue) -> Result<Blob, JsValue> {
    let output = render(&ImageSource::Blob(bytes.to_vec()), request)?;
    let options = BlobPropertyBag::new();
    options.set_type(output.mime_type());
    Blob::new_with_u8_array_sequence_and_options(&byte_parts(&output.bytes), &options)
}

/// Export as a `File` named after `name` with the output extension.
#[wasm_bindgen]
pub fn export_file(bytes: &[u8], name: &str, request: JsValue) -> Result<File, JsValue> {
    let source = ImageSource::File {
        name: name.to_string(),
        bytes: bytes.to_vec(),
    };
    let file = render(&source, request)?.into_file(source.file_stem());
    let options = FilePropertyBag::new();
    options.set_type(&file.mime_type);
    File::new_with_u8_array_sequence_and_options(&byte_parts(&file.bytes), &file.name, &options)
}

/// Export as a `data:` URL.
#[wasm_bindgen]
pub fn export_data_url(bytes: &[u8], request: JsValue) -> Result<String, JsValue> {
    render(&ImageSource::Blob(bytes.to_vec()), request).map(|output| output.to_data_url())
}

/// Export from an image that is already decoded, skipping the decode step.
#[wasm_bindgen]
pub fn export_from_image(image: &JsDecodedImage, request: JsValue) -> Result<Vec<u8>, JsValue> {
    let request = request_from_js(request)?;
    export::export_decoded(&image.to_decoded(), &request)
        .map(ExportOutput::into_bytes)
        .map_err(js_error)
}
