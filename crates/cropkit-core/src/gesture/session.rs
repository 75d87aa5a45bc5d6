//! Per-gesture session records.
//!
//! One is created when a drag starts and dropped when it ends, so a drag
//! never reads state left over from an earlier one.

use crate::geometry::{CropArea, ImageOffset, Point};
use crate::selection::ResizeHandle;

/// An image pan in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanSession {
    pub pointer_start: Point,
    pub offset_at_start: ImageOffset,
}

impl PanSession {
    pub fn new(pointer_start: Point, offset_at_start: ImageOffset) -> Self {
        Self {
            pointer_start,
            offset_at_start,
        }
    }

    /// Unconstrained offset for the pointer at `pointer`.
    pub fn candidate(&self, pointer: Point) -> ImageOffset {
        let (dx, dy) = pointer.delta_from(self.pointer_start);
        self.offset_at_start.translated(dx, dy)
    }
}

/// A crop resize or move in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSession {
    pub handle: ResizeHandle,
    pub pointer_start: Point,
    pub crop_at_start: CropArea,
}

impl ResizeSession {
    pub fn new(handle: ResizeHandle, pointer_start: Point, crop_at_start: CropArea) -> Self {
        Self {
            handle,
            pointer_start,
            crop_at_start,
        }
    }
}
