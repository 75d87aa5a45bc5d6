//! Pointer, wheel and slider input.
//!
//! [`GestureController`] is a small state machine with one held mode at a
//! time. Pans and resizes are held modes that start on pointer-down and end
//! on pointer-up; zoom is momentary and only runs while no drag is held, so
//! exactly one component writes the [`CropState`] during any gesture.
//!
//! Every mutation marks the [`RedrawScheduler`] dirty. Emitting the settled
//! crop to listeners is left to the caller, keyed off [`GestureController::release`].

mod scheduler;
mod session;

pub use scheduler::RedrawScheduler;
pub use session::{PanSession, ResizeSession};

use crate::config::CropperConfig;
use crate::geometry::{DisplaySize, Point, ViewportRect};
use crate::selection::{crop_bounds, resize_crop, ResizeHandle, ResizeLimits};
use crate::state::CropState;
use crate::transform::{constrain, set_scale, shrink_to_cover};

/// The held interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Dragging the image behind the crop window.
    Panning(PanSession),
    /// Dragging a crop handle (or the whole crop).
    Resizing(ResizeSession),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Interaction::Panning(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, Interaction::Resizing(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Panning(_) => "panning",
            Interaction::Resizing(_) => "resizing",
        }
    }
}

/// Turns raw input into constrained updates of a [`CropState`].
#[derive(Debug, Clone, Default)]
pub struct GestureController {
    interaction: Interaction,
    scheduler: RedrawScheduler,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn scheduler(&self) -> &RedrawScheduler {
        &self.scheduler
    }

    /// Mark the view dirty from outside a gesture (load, reset, resize of the viewport).
    pub fn mark_dirty(&mut self) -> bool {
        self.scheduler.mark_dirty()
    }

    /// Consume the pending redraw, if any.
    pub fn take_redraw(&mut self) -> bool {
        self.scheduler.tick()
    }

    /// Start panning if `point` lies on the displayed image.
    ///
    /// Ignored while another drag is held or before an image is measured.
    pub fn begin_pan(&mut self, point: Point, state: &CropState, base: DisplaySize) -> bool {
        if !self.interaction.is_idle() || base.is_empty() {
            return false;
        }
        if !state.image_bounds(base).contains(point) {
            return false;
        }
        self.interaction = Interaction::Panning(PanSession::new(point, state.offset));
        true
    }

    /// Start dragging `handle`. Ignored while another drag is held.
    pub fn begin_resize(&mut self, handle: ResizeHandle, point: Point, state: &CropState) -> bool {
        if !self.interaction.is_idle() {
            return false;
        }
        self.interaction = Interaction::Resizing(ResizeSession::new(handle, point, state.crop));
        true
    }

    /// Apply a pointer move to the held drag.
    ///
    /// Returns `true` if the state changed. Pan updates that the constraint
    /// solver pins within `pan_epsilon` of the current offset are dropped.
    pub fn pointer_move(
        &mut self,
        point: Point,
        state: &mut CropState,
        base: DisplaySize,
        viewport: ViewportRect,
        config: &CropperConfig,
    ) -> bool {
        let display = state.display(base);
        match self.interaction {
            Interaction::Idle => false,
            Interaction::Panning(session) => {
                let next = constrain(session.candidate(point), display, &state.crop);
                if next.approx_eq(&state.offset, config.pan_epsilon) {
                    return false;
                }
                state.offset = next;
                self.scheduler.mark_dirty();
                true
            }
            Interaction::Resizing(session) => {
                let limits = ResizeLimits::new(
                    config.min_width,
                    config.min_height,
                    config.aspect_ratio,
                    crop_bounds(viewport, state.offset, display),
                );
                let (dx, dy) = point.delta_from(session.pointer_start);
                let next = resize_crop(session.handle, dx, dy, &session.crop_at_start, &limits);
                if next == state.crop {
                    return false;
                }
                state.crop = next;
                self.scheduler.mark_dirty();
                true
            }
        }
    }

    /// End the held drag, wherever the pointer was released.
    ///
    /// Returns `true` exactly once per drag; the caller flushes the settled
    /// crop on `true`.
    pub fn release(&mut self) -> bool {
        if self.interaction.is_idle() {
            return false;
        }
        log::debug!("{} gesture settled", self.interaction.name());
        self.interaction = Interaction::Idle;
        true
    }

    /// Zoom to `scale` about the crop centre.
    ///
    /// If the zoomed-out image would no longer cover the crop, the crop is
    /// shrunk about its centre first. Returns `true` if the state changed.
    pub fn zoom_to(
        &mut self,
        scale: f64,
        state: &mut CropState,
        base: DisplaySize,
        config: &CropperConfig,
    ) -> bool {
        if !self.interaction.is_idle() {
            log::debug!("zoom ignored while {}", self.interaction.name());
            return false;
        }

        let limits = config.scale_limits();
        let new_scale = limits.clamp(scale);
        if (new_scale - state.scale).abs() < f64::EPSILON {
            return false;
        }

        let crop = if base.is_empty() {
            state.crop
        } else {
            shrink_to_cover(
                &state.crop,
                base.scaled(new_scale),
                config.aspect_ratio.is_some(),
            )
        };
        let result = set_scale(new_scale, &crop, state.offset, state.scale, base, limits);

        state.crop = crop;
        state.scale = result.scale;
        state.offset = result.offset;
        self.scheduler.mark_dirty();
        true
    }

    /// Zoom one wheel notch. Scrolling up (negative `delta_y`) zooms in.
    pub fn wheel(
        &mut self,
        delta_y: f64,
        state: &mut CropState,
        base: DisplaySize,
        config: &CropperConfig,
    ) -> bool {
        if delta_y == 0.0 || delta_y.is_nan() {
            return false;
        }
        let step = if delta_y < 0.0 {
            config.wheel_step
        } else {
            -config.wheel_step
        };
        self.zoom_to(config.snap_slider(state.scale + step), state, base, config)
    }

    /// Zoom to a slider value, snapped to the slider step.
    pub fn slider(
        &mut self,
        value: f64,
        state: &mut CropState,
        base: DisplaySize,
        config: &CropperConfig,
    ) -> bool {
        self.zoom_to(config.snap_slider(value), state, base, config)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
