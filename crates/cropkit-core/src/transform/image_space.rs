//! Mapping the crop between display space and source-image pixels.

use crate::geometry::{CropArea, DisplaySize, ExportedCropArea, ImageDimensions, ImageOffset};

/// Image pixels per display pixel at the given zoom, or `None` when the
/// geometry is not measured yet.
#[inline]
fn image_pixels_per_display_pixel(
    scale: f64,
    base: DisplaySize,
    image: ImageDimensions,
) -> Option<f64> {
    if image.is_empty() || base.is_empty() || scale <= 0.0 {
        return None;
    }
    Some(image.height as f64 / (base.height * scale))
}

/// Convert a display-space crop into source-image pixels.
///
/// The rectangle is translated into image-local coordinates, scaled by
/// `base_scale / scale` and rounded to whole pixels. Size is clamped into the
/// image first, then position, so the result is always fully inside the
/// source even when rounding drifts.
///
/// Returns an empty area when no image is loaded.
///
/// # Example
///
/// ```
/// use cropkit_core::geometry::*;
/// use cropkit_core::transform::to_image_space;
///
/// // 800x600 image shown at 400x300: display pixels are two image pixels wide
/// let area = to_image_space(
///     &CropArea::new(0.0, 0.0, 400.0, 300.0),
///     ImageOffset::new(0.0, 0.0),
///     1.0,
///     DisplaySize::new(400.0, 300.0),
///     ImageDimensions::new(800, 600),
/// );
/// assert_eq!(area, ExportedCropArea::new(0, 0, 800, 600));
/// ```
pub fn to_image_space(
    crop: &CropArea,
    offset: ImageOffset,
    scale: f64,
    base: DisplaySize,
    image: ImageDimensions,
) -> ExportedCropArea {
    let Some(factor) = image_pixels_per_display_pixel(scale, base, image) else {
        return ExportedCropArea::default();
    };

    let to_px = |v: f64| v.round().max(0.0) as u32;

    ExportedCropArea {
        x: to_px((crop.x - offset.offset_x) * factor),
        y: to_px((crop.y - offset.offset_y) * factor),
        width: to_px(crop.width * factor),
        height: to_px(crop.height * factor),
    }
    .clamped_to(image)
}

/// Convert an image-pixel rectangle back into display space.
///
/// Used for caller-supplied crops and to carry the crop across viewport
/// resizes. The input is clamped into the image before mapping.
pub fn to_display_space(
    area: &ExportedCropArea,
    offset: ImageOffset,
    scale: f64,
    base: DisplaySize,
    image: ImageDimensions,
) -> CropArea {
    let Some(factor) = image_pixels_per_display_pixel(scale, base, image) else {
        return CropArea::default();
    };

    let area = area.clamped_to(image);
    CropArea {
        x: area.x as f64 / factor + offset.offset_x,
        y: area.y as f64 / factor + offset.offset_y,
        width: area.width as f64 / factor,
        height: area.height as f64 / factor,
    }
}
