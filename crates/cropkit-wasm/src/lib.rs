//! Cropkit WASM - WebAssembly bindings for the cropkit crop engine
//!
//! This crate exposes cropkit-core to JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `cropper` - Interactive crop session (`JsCropper`)
//! - `export` - Crop export to bytes, `Blob`, `File` or data URL
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and resizing
//! - `encode` - Image encoding (JPEG, PNG, WebP)
//! - `transform` - Pixel crop and display-to-image mapping
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropper, export_blob } from '@cropkit/wasm';
//!
//! await init();
//!
//! const cropper = new JsCropper(undefined, canvas.width, canvas.height);
//! cropper.load_bytes(bytes, null);
//! const blob = export_blob(bytes, { crop: cropper.exported_crop(), format: "jpeg" });
//! ```

use wasm_bindgen::prelude::*;

mod cropper;
mod decode;
mod encode;
mod export;
mod logger;
mod transform;
mod types;

// Re-export public types
pub use cropper::JsCropper;
pub use decode::{decode_image, probe_dimensions, resize};
pub use encode::{encode_image, encode_image_from};
pub use export::{export_blob, export_bytes, export_data_url, export_file, export_from_image};
pub use transform::{apply_crop, to_image_space};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

/// Change the console log level (`"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`, `"off"`).
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::init(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
