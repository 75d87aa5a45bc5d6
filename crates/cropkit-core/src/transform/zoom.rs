//! Zooming about the crop centre.
//!
//! Zoom never moves the crop rectangle. Instead the image offset is recomputed
//! so the image point under the crop centre stays under it, and the result is
//! then run through [`constrain`] so the image still covers the crop.

use serde::{Deserialize, Serialize};

use super::constrain::constrain;
use crate::geometry::{CropArea, DisplaySize, ImageOffset};

/// Inclusive zoom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self { min: 1.0, max: 2.0 }
    }
}

impl ScaleLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into the range. NaN maps to `min`; an inverted range collapses to `min`.
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.min(self.max).max(self.min)
    }
}

/// Outcome of a zoom step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomResult {
    pub scale: f64,
    pub offset: ImageOffset,
}

/// Change the zoom factor while keeping the crop centre fixed on the image.
///
/// `new_scale` is clamped into `limits` first. Without a measured base size
/// (no image loaded) only the scale changes.
///
/// # Arguments
///
/// * `new_scale` - Requested zoom factor
/// * `crop` - Current crop rectangle (unchanged by zoom)
/// * `offset` - Current image offset
/// * `scale` - Current zoom factor
/// * `base` - Display size at scale 1.0
/// * `limits` - Allowed zoom range
pub fn set_scale(
    new_scale: f64,
    crop: &CropArea,
    offset: ImageOffset,
    scale: f64,
    base: DisplaySize,
    limits: ScaleLimits,
) -> ZoomResult {
    let new_scale = limits.clamp(new_scale);

    if base.is_empty() || scale <= 0.0 {
        return ZoomResult {
            scale: new_scale,
            offset,
        };
    }

    let old_size = base.scaled(scale);
    let new_size = base.scaled(new_scale);
    let center = crop.center();

    // Vector from the image centre to the crop centre, at the old zoom.
    let center_offset_x = center.x - (offset.offset_x + old_size.width / 2.0);
    let center_offset_y = center.y - (offset.offset_y + old_size.height / 2.0);

    // The same image point sits `ratio` times further from the centre after zooming.
    let ratio = new_scale / scale;
    let candidate = ImageOffset::new(
        center.x - center_offset_x * ratio - new_size.width / 2.0,
        center.y - center_offset_y * ratio - new_size.height / 2.0,
    );

    ZoomResult {
        scale: new_scale,
        offset: constrain(candidate, new_size, crop),
    }
}

/// Shrink `crop` about its centre until it fits inside `display`.
///
/// With `keep_ratio` both sides shrink by the same factor; otherwise each side
/// is reduced independently. A crop that already fits is returned unchanged.
pub fn shrink_to_cover(crop: &CropArea, display: DisplaySize, keep_ratio: bool) -> CropArea {
    if crop.width <= display.width && crop.height <= display.height {
        return *crop;
    }

    let (width, height) = if keep_ratio {
        let factor = (display.width / crop.width).min(display.height / crop.height).min(1.0);
        (crop.width * factor, crop.height * factor)
    } else {
        (crop.width.min(display.width), crop.height.min(display.height))
    };

    CropArea::new(0.0, 0.0, width, height).centered_on(crop.center())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Bounds;
    use proptest::prelude::*;

    proptest! {
        /// Property: zooming keeps the image point under the crop centre within
        /// 0.01px whenever the offset needs no clamping, and always keeps the
        /// image under the crop.
        #[test]
        fn prop_zoom_center_stable_and_covering(
            (cx, cy) in (150.0f64..=250.0, 150.0f64..=250.0),
            (cw, ch) in (50.0f64..=200.0, 50.0f64..=200.0),
            from in 1.0f64..=2.0,
            to in 1.0f64..=2.0,
            (pan_x, pan_y) in (-1.0f64..=1.0, -1.0f64..=1.0),
        ) {
            let base = DisplaySize::new(400.0, 400.0);
            let crop = CropArea::new(cx - cw / 2.0, cy - ch / 2.0, cw, ch);
            let size = base.scaled(from);
            // A valid starting offset somewhere inside the allowed range
            let start = constrain(
                ImageOffset::new(crop.x - (size.width - cw) * (pan_x + 1.0) / 2.0,
                                 crop.y - (size.height - ch) * (pan_y + 1.0) / 2.0),
                size,
                &crop,
            );

            let result = set_scale(to, &crop, start, from, base, ScaleLimits::default());

            let center = crop.center();
            let ratio = to / from;
            let unclamped = ImageOffset::new(
                center.x - (center.x - start.offset_x) * ratio,
                center.y - (center.y - start.offset_y) * ratio,
            );
            if constrain(unclamped, base.scaled(to), &crop).approx_eq(&unclamped, 1e-9) {
                let before = ((center.x - start.offset_x) / from, (center.y - start.offset_y) / from);
                let after = (
                    (center.x - result.offset.offset_x) / result.scale,
                    (center.y - result.offset.offset_y) / result.scale,
                );
                prop_assert!((before.0 - after.0).abs() < 0.01);
                prop_assert!((before.1 - after.1).abs() < 0.01);
            }

            let image = Bounds::of_image(result.offset, base.scaled(result.scale));
            prop_assert!(image.contains_crop(&crop));
        }
    }
}
