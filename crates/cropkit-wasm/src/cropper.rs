//! Interactive cropper bindings.
//!
//! [`JsCropper`] wraps a core [`Cropper`] session. The host forwards pointer,
//! wheel and slider events, calls `take_redraw()` from its animation frame,
//! and receives settled crops through `on_crop_change`.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const cropper = new JsCropper({ aspect_ratio: 16 / 9 }, canvas.width, canvas.height);
//! cropper.on_crop_change((area) => console.log(area.x, area.y, area.width, area.height));
//! cropper.load_bytes(new Uint8Array(await file.arrayBuffer()), null);
//!
//! canvas.onpointerdown = (e) => cropper.pointer_down(e.offsetX, e.offsetY);
//! canvas.onpointermove = (e) => cropper.pointer_move(e.offsetX, e.offsetY);
//! document.onpointerup = () => cropper.pointer_up();
//! canvas.onwheel = (e) => cropper.wheel(e.deltaY);
//! ```

use std::cell::RefCell;

use crate::types::{from_js, from_js_opt, js_error, to_js};
use cropkit_core::decode::DecodeError;
use cropkit_core::selection::handle_at;
use cropkit_core::{
    ConfigError, Cropper, CropperConfig, ExportedCropArea, ImageDimensions, LoadToken, Point,
    ResizeHandle, ViewportRect,
};
use wasm_bindgen::prelude::*;

/// A cropping session for one canvas.
///
/// Methods take `&self` and release the session before running the
/// `on_crop_change` callback, so the callback may read from or drive the
/// same cropper.
#[wasm_bindgen]
pub struct JsCropper {
    inner: RefCell<Cropper>,
    callback: RefCell<Option<js_sys::Function>>,
}

#[wasm_bindgen]
impl JsCropper {
    /// Create a session. `config` may be `undefined` or a partial config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, width: f64, height: f64) -> Result<JsCropper, JsValue> {
        let config: CropperConfig = from_js_opt(config)?.unwrap_or_default();
        Self::with_config(config, width, height).map_err(js_error)
    }

    /// The canvas was resized.
    pub fn set_viewport(&self, width: f64, height: f64) {
        self.update(|cropper| cropper.set_viewport(ViewportRect::new(width, height)));
    }

    /// Start a host-side decode; pass the returned token to `complete_load`.
    pub fn begin_load(&self) -> f64 {
        self.update(|cropper| cropper.begin_load().generation() as f64)
    }

    /// Finish a host-side decode with the image's natural size.
    ///
    /// Rejects with a message if a newer load has started or the token was
    /// already used.
    pub fn complete_load(
        &self,
        token: f64,
        width: u32,
        height: u32,
        initial: JsValue,
    ) -> Result<JsValue, JsValue> {
        let initial: Option<ExportedCropArea> = from_js_opt(initial)?;
        let area = self
            .update(|cropper| {
                cropper.complete_load(token_from_js(token), ImageDimensions::new(width, height), initial)
            })
            .map_err(js_error)?;
        to_js(&area)
    }

    /// Report a failed host-side decode. Returns the message to surface.
    pub fn fail_load(&self, token: f64, message: &str) -> String {
        self.update(|cropper| {
            cropper.fail_load(token_from_js(token), DecodeError::IoError(message.to_string()))
        })
        .to_string()
    }

    /// Load encoded bytes directly.
    pub fn load_bytes(&self, bytes: &[u8], initial: JsValue) -> Result<JsValue, JsValue> {
        let initial: Option<ExportedCropArea> = from_js_opt(initial)?;
        let area = self
            .update(|cropper| cropper.load_bytes(bytes, initial))
            .map_err(js_error)?;
        to_js(&area)
    }

    pub fn pointer_down(&self, x: f64, y: f64) -> bool {
        self.update(|cropper| cropper.pointer_down(Point::new(x, y)))
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> bool {
        self.update(|cropper| cropper.pointer_move(Point::new(x, y)))
    }

    /// Call from a document-level listener so drags ending off-canvas settle too.
    pub fn pointer_up(&self) -> bool {
        self.update(Cropper::pointer_up)
    }

    /// A handle element (`"nw"`, `"e"`, `"move"`, ...) was pressed.
    pub fn begin_resize(&self, handle: &str, x: f64, y: f64) -> Result<bool, JsValue> {
        let handle: ResizeHandle = handle.parse().map_err(js_error)?;
        Ok(self.update(|cropper| cropper.begin_resize(handle, Point::new(x, y))))
    }

    /// Name of the handle under the pointer, for cursor styling.
    pub fn handle_at(&self, x: f64, y: f64) -> Option<String> {
        let cropper = self.inner.borrow();
        handle_at(
            Point::new(x, y),
            &cropper.crop_area(),
            cropper.config().handle_tolerance,
        )
        .map(|handle| handle.as_str().to_string())
    }

    pub fn wheel(&self, delta_y: f64) -> bool {
        self.update(|cropper| cropper.wheel(delta_y))
    }

    /// Zoom slider value.
    pub fn set_zoom(&self, value: f64) -> bool {
        self.update(|cropper| cropper.set_zoom(value))
    }

    pub fn set_aspect_ratio(&self, ratio: Option<f64>) -> Result<(), JsValue> {
        self.update(|cropper| cropper.set_aspect_ratio(ratio))
            .map_err(js_error)
    }

    /// Replace the crop with an image-pixel rectangle.
    pub fn set_crop_area(&self, area: JsValue) -> Result<(), JsValue> {
        let area: ExportedCropArea = from_js(area)?;
        self.update(|cropper| cropper.set_crop_area(area));
        Ok(())
    }

    pub fn reset(&self) {
        self.update(Cropper::reset);
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.borrow().scale()
    }

    #[wasm_bindgen(getter)]
    pub fn interaction(&self) -> String {
        self.inner.borrow().interaction().name().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn is_loading(&self) -> bool {
        self.inner.borrow().is_loading()
    }

    /// Crop rectangle in canvas pixels.
    pub fn crop_area(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().crop_area())
    }

    /// `{ offsetX, offsetY }` of the drawn image.
    pub fn image_offset(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().image_offset())
    }

    /// Drawn image size at the current zoom.
    pub fn display_size(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.borrow().display_size())
    }

    /// Crop in image pixels, or `null` before the first load.
    pub fn exported_crop(&self) -> Result<JsValue, JsValue> {
        match self.inner.borrow().exported_crop() {
            Some(area) => to_js(&area),
            None => Ok(JsValue::NULL),
        }
    }

    /// Call once per animation frame; `true` means redraw now.
    pub fn take_redraw(&self) -> bool {
        self.inner.borrow_mut().take_redraw()
    }

    /// Register the settled-crop callback, replacing any previous one.
    /// It receives `{ x, y, width, height }`.
    pub fn on_crop_change(&self, callback: js_sys::Function) {
        self.callback.replace(Some(callback));
    }
}

impl JsCropper {
    pub(crate) fn with_config(config: CropperConfig, width: f64, height: f64) -> Result<Self, ConfigError> {
        Cropper::new(config, ViewportRect::new(width, height)).map(|inner| Self {
            inner: RefCell::new(inner),
            callback: RefCell::new(None),
        })
    }

    /// Run `f` on the session, then deliver any settled crop with the
    /// session borrow released.
    fn update<R>(&self, f: impl FnOnce(&mut Cropper) -> R) -> R {
        let (result, settled) = {
            let mut cropper = self.inner.borrow_mut();
            let result = f(&mut cropper);
            (result, cropper.take_settled())
        };
        if let Some(area) = settled {
            self.notify(&area);
        }
        result
    }

    fn notify(&self, area: &ExportedCropArea) {
        let Some(callback) = self.callback.borrow().clone() else {
            return;
        };
        let value = match serde_wasm_bindgen::to_value(area) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Failed to convert crop area: {}", err);
                return;
            }
        };
        if let Err(err) = callback.call1(&JsValue::NULL, &value) {
            log::warn!("on_crop_change callback threw: {:?}", err);
        }
    }
}

fn token_from_js(token: f64) -> LoadToken {
    LoadToken::from_generation(token.max(0.0) as u64)
}
