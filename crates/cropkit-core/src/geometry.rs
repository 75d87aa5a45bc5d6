//! Geometric primitives shared by every crop component.
//!
//! Two coordinate spaces are in play:
//!
//! - **Display space**: `f64` pixels relative to the viewport origin
//!   (top-left of the crop canvas).
//! - **Image space**: whole pixels of the decoded source image.
//!
//! Only [`ExportedCropArea`] lives in image space; everything else is display space.

use serde::{Deserialize, Serialize};

/// Tolerance used when comparing display-space values.
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Natural pixel size of the loaded source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either side is zero (nothing decoded yet).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// On-screen size of the crop canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportRect {
    pub width: f64,
    pub height: f64,
}

impl ViewportRect {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The viewport as a bounds rectangle anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0))
    }
}

/// Size of the image as drawn on the canvas (base size times zoom).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Multiply both sides by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            width: self.width * scale,
            height: self.height * scale,
        }
    }

    /// True if either side is zero or negative (image not measured yet).
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Top-left position of the displayed image relative to the viewport origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOffset {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ImageOffset {
    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }

    /// Translate by a pointer delta.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            offset_x: self.offset_x + dx,
            offset_y: self.offset_y + dy,
        }
    }

    /// True if both components are within `epsilon` of `other`.
    pub fn approx_eq(&self, other: &ImageOffset, epsilon: f64) -> bool {
        (self.offset_x - other.offset_x).abs() <= epsilon
            && (self.offset_y - other.offset_y).abs() <= epsilon
    }
}

/// A pointer position in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to `self`.
    pub fn delta_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Crop rectangle in display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropArea {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Visual centre of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width divided by height, `None` for a zero-height rectangle.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height > 0.0).then(|| self.width / self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Same size, centred on `center`.
    pub fn centered_on(&self, center: Point) -> Self {
        Self::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }
}

/// An axis-aligned region the crop rectangle must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds of an image drawn at `offset` with size `display`.
    pub fn of_image(offset: ImageOffset, display: DisplaySize) -> Self {
        Self::new(
            offset.offset_x,
            offset.offset_y,
            offset.offset_x + display.width,
            offset.offset_y + display.height,
        )
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }

    /// Overlap of two regions. An empty overlap collapses to zero size
    /// at the clamped corner instead of going negative.
    pub fn intersect(&self, other: &Bounds) -> Bounds {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right).max(left);
        let bottom = self.bottom.min(other.bottom).max(top);
        Bounds::new(left, top, right, bottom)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// True if `crop` lies fully inside these bounds (within [`GEOMETRY_EPSILON`]).
    pub fn contains_crop(&self, crop: &CropArea) -> bool {
        crop.x >= self.left - GEOMETRY_EPSILON
            && crop.y >= self.top - GEOMETRY_EPSILON
            && crop.right() <= self.right + GEOMETRY_EPSILON
            && crop.bottom() <= self.bottom + GEOMETRY_EPSILON
    }

    pub fn as_crop(&self) -> CropArea {
        CropArea::new(self.left, self.top, self.width(), self.height())
    }
}

/// Crop rectangle in image pixel space, always inside the source image.
///
/// Derived from a [`CropArea`] plus the current offset and scale; never the
/// source of truth for the interactive state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportedCropArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl ExportedCropArea {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full(image: ImageDimensions) -> Self {
        Self::new(0, 0, image.width, image.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clamp into `image`: size first, then position, so the result never
    /// extends past the right or bottom edge.
    pub fn clamped_to(&self, image: ImageDimensions) -> Self {
        let width = self.width.min(image.width);
        let height = self.height.min(image.height);
        Self {
            x: self.x.min(image.width - width),
            y: self.y.min(image.height - height),
            width,
            height,
        }
    }
}
