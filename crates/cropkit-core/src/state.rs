//! The mutable crop state shared by pan, zoom and resize.

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, CropArea, DisplaySize, ImageOffset};

/// Zoom factor, image offset and crop rectangle.
///
/// The three fields only ever change together through one component at a
/// time, so the displayed image covers the crop after every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropState {
    pub scale: f64,
    pub offset: ImageOffset,
    pub crop: CropArea,
}

impl Default for CropState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: ImageOffset::default(),
            crop: CropArea::default(),
        }
    }
}

impl CropState {
    pub fn new(scale: f64, offset: ImageOffset, crop: CropArea) -> Self {
        Self {
            scale,
            offset,
            crop,
        }
    }

    /// Size of the image as currently drawn.
    pub fn display(&self, base: DisplaySize) -> DisplaySize {
        base.scaled(self.scale)
    }

    /// Bounds of the image as currently drawn.
    pub fn image_bounds(&self, base: DisplaySize) -> Bounds {
        Bounds::of_image(self.offset, self.display(base))
    }

    /// True if the drawn image fully covers the crop rectangle.
    pub fn is_covered(&self, base: DisplaySize) -> bool {
        self.image_bounds(base).contains_crop(&self.crop)
    }
}
