//! Handle-driven resize with aspect-ratio lock and boundary clamping.
//!
//! A drag is always evaluated against the crop as it was when the drag
//! started plus the cumulative pointer delta, so a long drag never drifts
//! from accumulated rounding.
//!
//! The pipeline for a resize handle is:
//!
//! 1. Raw edge update (the dragged edges move by the delta)
//! 2. Aspect-ratio correction from the driving dimension
//! 3. Size clamp into `[minimum, maximum extent from the anchor]`
//! 4. Re-anchor on the edge or corner opposite the handle
//! 5. Position clamp into the bounds
//!
//! Bounds are the intersection of the viewport and the displayed image, so
//! the tighter of the two always governs and the boundary wins over both
//! the minimum size and the aspect ratio.

use super::handle::{Edge, ResizeHandle};
use crate::geometry::{Bounds, CropArea, DisplaySize, ImageOffset, ViewportRect};

/// Constraints applied to every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeLimits {
    pub min_width: f64,
    pub min_height: f64,
    /// Locked width / height ratio, if any.
    pub aspect_ratio: Option<f64>,
    /// Region the crop must stay inside.
    pub bounds: Bounds,
}

impl ResizeLimits {
    pub fn new(min_width: f64, min_height: f64, aspect_ratio: Option<f64>, bounds: Bounds) -> Self {
        Self {
            min_width,
            min_height,
            aspect_ratio: aspect_ratio.filter(|r| r.is_finite() && *r > 0.0),
            bounds,
        }
    }
}

/// The region a crop may occupy: the viewport intersected with the displayed image.
pub fn crop_bounds(viewport: ViewportRect, offset: ImageOffset, display: DisplaySize) -> Bounds {
    viewport.bounds().intersect(&Bounds::of_image(offset, display))
}

/// Apply a handle drag of `(dx, dy)` to the crop as it was at drag start.
///
/// # Arguments
///
/// * `handle` - The handle being dragged (`Move` translates without resizing)
/// * `dx`, `dy` - Pointer movement since the drag started
/// * `start` - Crop rectangle at drag start
/// * `limits` - Minimum size, aspect ratio and bounds
///
/// # Returns
///
/// The new crop rectangle, always inside `limits.bounds`.
pub fn resize_crop(
    handle: ResizeHandle,
    dx: f64,
    dy: f64,
    start: &CropArea,
    limits: &ResizeLimits,
) -> CropArea {
    let start = clamp_crop(start, limits);

    if handle == ResizeHandle::Move {
        let moved = CropArea::new(start.x + dx, start.y + dy, start.width, start.height);
        return clamp_position(&moved, &limits.bounds);
    }

    let h_edge = handle.horizontal();
    let v_edge = handle.vertical();
    let (raw_width, anchor_x) = raw_extent(h_edge, start.x, start.width, dx);
    let (raw_height, anchor_y) = raw_extent(v_edge, start.y, start.height, dy);

    let (width, height) = match limits.aspect_ratio {
        Some(ratio) => {
            let width_drives = match (h_edge, v_edge) {
                (_, Edge::Fixed) => true,
                (Edge::Fixed, _) => false,
                _ => (raw_width - start.width).abs() >= (raw_height - start.height).abs() * ratio,
            };
            if width_drives {
                (raw_width, raw_width / ratio)
            } else {
                (raw_height * ratio, raw_height)
            }
        }
        None => (raw_width, raw_height),
    };

    let locked = limits.aspect_ratio.is_some();
    let bounds = &limits.bounds;
    let max_width = max_extent(h_edge, anchor_x, bounds.left, bounds.right, locked);
    let max_height = max_extent(v_edge, anchor_y, bounds.top, bounds.bottom, locked);
    let (width, height) = fit_size(width, height, max_width, max_height, limits);

    let resized = CropArea::new(
        reanchor(h_edge, anchor_x, width),
        reanchor(v_edge, anchor_y, height),
        width,
        height,
    );
    clamp_position(&resized, bounds)
}

/// Fit an existing crop into `limits` without moving its edges more than needed.
pub fn clamp_crop(crop: &CropArea, limits: &ResizeLimits) -> CropArea {
    let (width, height) = fit_size(
        crop.width,
        crop.height,
        limits.bounds.width(),
        limits.bounds.height(),
        limits,
    );
    let sized = CropArea::new(0.0, 0.0, width, height).centered_on(crop.center());
    clamp_position(&sized, &limits.bounds)
}

/// Largest rectangle of `ratio` inside `crop`, centred on it, then clamped.
pub fn conform_to_ratio(crop: &CropArea, ratio: f64, limits: &ResizeLimits) -> CropArea {
    if !(ratio.is_finite() && ratio > 0.0) || crop.height <= 0.0 {
        return clamp_crop(crop, limits);
    }
    let (width, height) = if crop.width / crop.height > ratio {
        (crop.height * ratio, crop.height)
    } else {
        (crop.width, crop.width / ratio)
    };
    let shaped = CropArea::new(0.0, 0.0, width, height).centered_on(crop.center());
    clamp_crop(&shaped, limits)
}

/// Move `crop` the minimum distance needed to lie inside `bounds`.
pub fn clamp_position(crop: &CropArea, bounds: &Bounds) -> CropArea {
    let x = crop.x.min(bounds.right - crop.width).max(bounds.left);
    let y = crop.y.min(bounds.bottom - crop.height).max(bounds.top);
    CropArea::new(x, y, crop.width, crop.height)
}

/// Raw length after the drag, plus the coordinate that stays fixed.
fn raw_extent(edge: Edge, start: f64, len: f64, delta: f64) -> (f64, f64) {
    match edge {
        Edge::End => (len + delta, start),
        Edge::Start => (len - delta, start + len),
        Edge::Fixed => (len, start + len / 2.0),
    }
}

fn max_extent(edge: Edge, anchor: f64, low: f64, high: f64, locked: bool) -> f64 {
    let extent = match edge {
        Edge::End => high - anchor,
        Edge::Start => anchor - low,
        // A locked ratio grows the fixed axis symmetrically about its centre
        Edge::Fixed if locked => 2.0 * (anchor - low).min(high - anchor),
        Edge::Fixed => high - low,
    };
    extent.max(0.0)
}

fn reanchor(edge: Edge, anchor: f64, len: f64) -> f64 {
    match edge {
        Edge::End => anchor,
        Edge::Start => anchor - len,
        Edge::Fixed => anchor - len / 2.0,
    }
}

/// Clamp a size into `[min, max]`. With a locked ratio every clamp rescales
/// the other side too; the maximum is applied last so the boundary wins.
fn fit_size(
    width: f64,
    height: f64,
    max_width: f64,
    max_height: f64,
    limits: &ResizeLimits,
) -> (f64, f64) {
    match limits.aspect_ratio {
        None => (
            width.max(limits.min_width).min(max_width),
            height.max(limits.min_height).min(max_height),
        ),
        Some(ratio) => {
            let (mut w, mut h) = (width, height);
            if w < limits.min_width {
                w = limits.min_width;
                h = w / ratio;
            }
            if h < limits.min_height {
                h = limits.min_height;
                w = h * ratio;
            }
            if w > max_width {
                w = max_width;
                h = w / ratio;
            }
            if h > max_height {
                h = max_height;
                w = h * ratio;
            }
            (w, h)
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
