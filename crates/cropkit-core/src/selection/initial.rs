//! Initial placement of the image and the crop rectangle.

use crate::geometry::{Bounds, CropArea, DisplaySize, ImageDimensions, ImageOffset, ViewportRect};
use crate::transform::base_display_size;

/// Where the image and crop start out after a load.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InitialLayout {
    pub crop: CropArea,
    pub offset: ImageOffset,
    pub base: DisplaySize,
}

/// Centre the image in the viewport at scale 1.0 and choose the starting crop.
///
/// Without an aspect ratio the crop is the visible part of the image (the
/// whole image unless it is wider than the viewport). With one, the limiting
/// dimension is shrunk to the ratio and the crop is centred on the image.
///
/// An unmeasured viewport or empty image yields an empty layout (zero base
/// size, offset and crop) so callers can tell nothing has been placed yet.
pub fn initial_crop(
    image: ImageDimensions,
    viewport: ViewportRect,
    aspect_ratio: Option<f64>,
) -> InitialLayout {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return InitialLayout::default();
    }
    let base = base_display_size(viewport, image);
    if base.is_empty() {
        return InitialLayout::default();
    }

    let offset = ImageOffset::new(
        (viewport.width - base.width) / 2.0,
        (viewport.height - base.height) / 2.0,
    );
    let available = Bounds::of_image(offset, base).intersect(&viewport.bounds());

    let crop = match aspect_ratio {
        Some(ratio) if ratio > 0.0 => {
            let (width, height) = if available.width() / available.height() > ratio {
                // Wider than the target: height limits
                (available.height() * ratio, available.height())
            } else {
                (available.width(), available.width() / ratio)
            };
            CropArea::new(
                available.left + (available.width() - width) / 2.0,
                available.top + (available.height() - height) / 2.0,
                width,
                height,
            )
        }
        _ => available.as_crop(),
    };

    InitialLayout { crop, offset, base }
}
