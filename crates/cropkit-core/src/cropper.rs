//! Interactive crop session.
//!
//! [`Cropper`] owns the loaded image's dimensions, the viewport, and the
//! `(scale, offset, crop)` triple, and routes every input through the
//! gesture, zoom and resize logic. Listeners registered with
//! [`Cropper::on_crop_change`] only see settled states: after a load, after a
//! drag is released, and after momentary changes such as a zoom step.
//! Hosts that cannot be called back while the session is borrowed poll
//! [`Cropper::take_settled`] instead.

use std::fmt;

use crate::config::{validate_aspect_ratio, ConfigError, CropperConfig};
use crate::decode::{probe_dimensions, DecodeError};
use crate::geometry::{
    CropArea, DisplaySize, ExportedCropArea, ImageDimensions, ImageOffset, Point, ViewportRect,
};
use crate::gesture::{GestureController, Interaction};
use crate::loader::{LoadError, LoadToken, LoadTracker};
use crate::selection::{
    clamp_crop, clamp_position, conform_to_ratio, crop_bounds, handle_at, initial_crop,
    ResizeHandle, ResizeLimits,
};
use crate::state::CropState;
use crate::transform::{base_display_size, constrain, to_display_space, to_image_space};

/// Callback receiving the settled crop in image pixels.
pub type CropListener = Box<dyn FnMut(&ExportedCropArea)>;

/// One cropping session over a single viewport.
pub struct Cropper {
    config: CropperConfig,
    viewport: ViewportRect,
    image: Option<ImageDimensions>,
    base: DisplaySize,
    state: CropState,
    gestures: GestureController,
    loads: LoadTracker,
    /// Caller-supplied crop waiting for an image or a measured viewport.
    pending_crop: Option<ExportedCropArea>,
    /// Last settled crop not yet collected by [`Cropper::take_settled`].
    settled: Option<ExportedCropArea>,
    listener: Option<CropListener>,
}

impl fmt::Debug for Cropper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cropper")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("image", &self.image)
            .field("base", &self.base)
            .field("state", &self.state)
            .field("interaction", self.gestures.interaction())
            .finish_non_exhaustive()
    }
}

impl Cropper {
    /// Create an empty session. Fails if `config` is unusable.
    pub fn new(config: CropperConfig, viewport: ViewportRect) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            viewport,
            image: None,
            base: DisplaySize::default(),
            state: CropState::default(),
            gestures: GestureController::new(),
            loads: LoadTracker::new(),
            pending_crop: None,
            settled: None,
            listener: None,
        })
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn config(&self) -> &CropperConfig {
        &self.config
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    pub fn image_dimensions(&self) -> Option<ImageDimensions> {
        self.image
    }

    pub fn crop_area(&self) -> CropArea {
        self.state.crop
    }

    pub fn image_offset(&self) -> ImageOffset {
        self.state.offset
    }

    pub fn scale(&self) -> f64 {
        self.state.scale
    }

    pub fn state(&self) -> &CropState {
        &self.state
    }

    pub fn base_display_size(&self) -> DisplaySize {
        self.base
    }

    /// Size of the image as currently drawn.
    pub fn display_size(&self) -> DisplaySize {
        self.state.display(self.base)
    }

    pub fn interaction(&self) -> &Interaction {
        self.gestures.interaction()
    }

    pub fn is_loading(&self) -> bool {
        self.loads.is_loading()
    }

    /// The crop in image pixels, or `None` before the first load.
    ///
    /// While the viewport is unmeasured this is the caller-supplied crop, or
    /// the whole image.
    pub fn exported_crop(&self) -> Option<ExportedCropArea> {
        let image = self.image?;
        if self.base.is_empty() {
            let area = self
                .pending_crop
                .unwrap_or_else(|| ExportedCropArea::full(image));
            return Some(area.clamped_to(image));
        }
        Some(to_image_space(
            &self.state.crop,
            self.state.offset,
            self.state.scale,
            self.base,
            image,
        ))
    }

    // ------------------------------------------------------------------
    // Listener and redraw
    // ------------------------------------------------------------------

    /// Register the settled-crop listener, replacing any previous one.
    pub fn on_crop_change<F>(&mut self, listener: F)
    where
        F: FnMut(&ExportedCropArea) + 'static,
    {
        self.listener = Some(Box::new(listener));
    }

    /// Collect the latest settled crop since the previous call.
    ///
    /// Every change that notifies the listener also lands here, so a host can
    /// deliver notifications after its own borrow of the session has ended.
    pub fn take_settled(&mut self) -> Option<ExportedCropArea> {
        self.settled.take()
    }

    /// Consume the pending redraw. Call once per animation frame.
    pub fn take_redraw(&mut self) -> bool {
        self.gestures.take_redraw()
    }

    pub fn needs_redraw(&self) -> bool {
        self.gestures.scheduler().is_pending()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Start a load. Any earlier in-flight load becomes stale.
    pub fn begin_load(&mut self) -> LoadToken {
        let token = self.loads.begin();
        log::debug!("Started {}", token);
        token
    }

    /// Apply a finished decode.
    ///
    /// Resets zoom and offset, and places `initial` (or any crop set with
    /// [`Cropper::set_crop_area`] before the load) instead of the default crop.
    ///
    /// # Errors
    ///
    /// `LoadError::Stale` if a newer load has started, `LoadError::Finished` if
    /// `token` was already completed or failed, `LoadError::Decode` for an
    /// empty image. The session is unchanged in both cases.
    pub fn complete_load(
        &mut self,
        token: LoadToken,
        dimensions: ImageDimensions,
        initial: Option<ExportedCropArea>,
    ) -> Result<ExportedCropArea, LoadError> {
        if let Err(err) = self.loads.finish(token) {
            log::warn!("Discarding result: {}", err);
            return Err(err);
        }
        if dimensions.is_empty() {
            return Err(DecodeError::InvalidDimensions {
                width: dimensions.width,
                height: dimensions.height,
            }
            .into());
        }

        self.gestures.release();
        self.image = Some(dimensions);
        let initial = initial.or_else(|| self.pending_crop.take());
        self.layout(dimensions, initial);
        log::debug!(
            "Loaded {}x{} image ({})",
            dimensions.width,
            dimensions.height,
            token
        );

        self.emit();
        Ok(self
            .exported_crop()
            .unwrap_or_else(|| ExportedCropArea::full(dimensions)))
    }

    /// Record a failed decode and return the error to report.
    ///
    /// The previous image, if any, stays loaded.
    pub fn fail_load(&mut self, token: LoadToken, error: DecodeError) -> LoadError {
        if let Err(rejected) = self.loads.finish(token) {
            log::warn!("Ignoring load failure: {}", rejected);
            return rejected;
        }
        log::warn!("{} failed: {}", token, error);
        LoadError::Decode(error)
    }

    /// Probe encoded image bytes and load them in one step.
    pub fn load_bytes(
        &mut self,
        bytes: &[u8],
        initial: Option<ExportedCropArea>,
    ) -> Result<ExportedCropArea, LoadError> {
        let token = self.begin_load();
        match probe_dimensions(bytes) {
            Ok(dimensions) => self.complete_load(token, dimensions, initial),
            Err(err) => Err(self.fail_load(token, err)),
        }
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// React to a container resize, keeping the same image pixels in the crop.
    pub fn set_viewport(&mut self, viewport: ViewportRect) {
        if self.viewport == viewport {
            return;
        }
        let kept = self.exported_crop();
        let was_measured = !self.base.is_empty();
        self.viewport = viewport;

        let (Some(image), Some(area)) = (self.image, kept) else {
            return;
        };
        self.gestures.release();

        if !was_measured {
            let pending = self.pending_crop.take();
            self.layout(image, pending);
        } else {
            self.base = measured_base(viewport, image);
            if self.base.is_empty() {
                self.pending_crop = Some(area);
                self.state = CropState {
                    scale: self.state.scale,
                    ..CropState::default()
                };
                return;
            }
            self.show_area(image, &area);
            self.gestures.mark_dirty();
        }
        self.emit();
    }

    /// Put the crop back where a fresh load would.
    pub fn reset(&mut self) {
        let Some(image) = self.image else {
            return;
        };
        self.gestures.release();
        self.pending_crop = None;
        self.layout(image, None);
        self.emit();
    }

    /// Replace the crop with a caller-controlled image-pixel rectangle.
    ///
    /// Before a load (or while the viewport is unmeasured) the rectangle is
    /// kept and applied once it can be placed.
    pub fn set_crop_area(&mut self, area: ExportedCropArea) {
        let Some(image) = self.image else {
            self.pending_crop = Some(area);
            return;
        };
        if self.base.is_empty() {
            self.pending_crop = Some(area);
            self.emit();
            return;
        }
        self.gestures.release();
        self.show_area(image, &area);
        self.gestures.mark_dirty();
        self.emit();
    }

    /// Lock (or unlock) the crop's aspect ratio.
    ///
    /// Locking reshapes the current crop to the largest rectangle of that
    /// ratio inside it.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<(), ConfigError> {
        if let Some(ratio) = ratio {
            validate_aspect_ratio(ratio)?;
        }
        self.config.aspect_ratio = ratio;

        if let Some(ratio) = ratio {
            if self.image.is_some() && !self.base.is_empty() {
                self.gestures.release();
                let limits = self.resize_limits();
                self.state.crop = conform_to_ratio(&self.state.crop, ratio, &limits);
                self.gestures.mark_dirty();
                self.emit();
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Pointer pressed on the canvas. Grabs a handle if one is under the
    /// pointer, otherwise starts panning if the pointer is on the image.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.image.is_none() || self.base.is_empty() {
            return false;
        }
        if let Some(handle) = handle_at(point, &self.state.crop, self.config.handle_tolerance) {
            return self.gestures.begin_resize(handle, point, &self.state);
        }
        self.gestures.begin_pan(point, &self.state, self.base)
    }

    /// A handle element was pressed directly.
    pub fn begin_resize(&mut self, handle: ResizeHandle, point: Point) -> bool {
        if self.image.is_none() || self.base.is_empty() {
            return false;
        }
        self.gestures.begin_resize(handle, point, &self.state)
    }

    /// Pointer moved. Never notifies the listener.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.gestures.pointer_move(
            point,
            &mut self.state,
            self.base,
            self.viewport,
            &self.config,
        )
    }

    /// Pointer released, on the canvas or anywhere in the document.
    /// Flushes the settled crop once per drag.
    pub fn pointer_up(&mut self) -> bool {
        if !self.gestures.release() {
            return false;
        }
        self.emit();
        true
    }

    /// One wheel notch in the direction of `delta_y`.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        let changed = self
            .gestures
            .wheel(delta_y, &mut self.state, self.base, &self.config);
        if changed {
            self.emit();
        }
        changed
    }

    /// Zoom slider moved.
    pub fn set_zoom(&mut self, value: f64) -> bool {
        let changed = self
            .gestures
            .slider(value, &mut self.state, self.base, &self.config);
        if changed {
            self.emit();
        }
        changed
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn resize_limits(&self) -> ResizeLimits {
        ResizeLimits::new(
            self.config.min_width,
            self.config.min_height,
            self.config.aspect_ratio,
            crop_bounds(self.viewport, self.state.offset, self.display_size()),
        )
    }

    /// Fresh layout at the base zoom, optionally with a caller crop.
    fn layout(&mut self, image: ImageDimensions, initial: Option<ExportedCropArea>) {
        let layout = initial_crop(image, self.viewport, self.config.aspect_ratio);
        self.base = layout.base;
        self.state = CropState::new(1.0, layout.offset, layout.crop);

        if self.base.is_empty() {
            self.pending_crop = initial;
            return;
        }

        let base_scale = self.config.clamp_scale(1.0);
        if base_scale != 1.0 {
            self.gestures
                .zoom_to(base_scale, &mut self.state, self.base, &self.config);
        }
        if let Some(area) = initial {
            self.show_area(image, &area);
        }
        self.gestures.mark_dirty();
    }

    /// Place an image-pixel rectangle at the current zoom, panning the image
    /// so the rectangle is in view.
    fn show_area(&mut self, image: ImageDimensions, area: &ExportedCropArea) {
        let display = self.display_size();
        let centred = ImageOffset::new(
            (self.viewport.width - display.width) / 2.0,
            (self.viewport.height - display.height) / 2.0,
        );
        let mapped = to_display_space(area, centred, self.state.scale, self.base, image);
        let visible = clamp_position(&mapped, &self.viewport.bounds());
        let offset = centred.translated(visible.x - mapped.x, visible.y - mapped.y);

        let limits = ResizeLimits::new(
            self.config.min_width,
            self.config.min_height,
            self.config.aspect_ratio,
            crop_bounds(self.viewport, offset, display),
        );
        let crop = match self.config.aspect_ratio {
            Some(ratio) => conform_to_ratio(&visible, ratio, &limits),
            None => clamp_crop(&visible, &limits),
        };

        self.state.offset = constrain(offset, display, &crop);
        self.state.crop = crop;
    }

    fn emit(&mut self) {
        let Some(area) = self.exported_crop() else {
            return;
        };
        self.settled = Some(area);
        if let Some(listener) = self.listener.as_mut() {
            listener(&area);
        }
    }
}

/// Base display size, or empty while the viewport has no area.
fn measured_base(viewport: ViewportRect, image: ImageDimensions) -> DisplaySize {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return DisplaySize::default();
    }
    base_display_size(viewport, image)
}
