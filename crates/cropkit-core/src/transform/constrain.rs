//! Keeping the displayed image under the crop window.

use crate::geometry::{CropArea, DisplaySize, ImageOffset};

/// Clamp a candidate image offset so the displayed image covers `crop`.
///
/// The allowed range on each axis is
/// `[crop.x + crop.width - display.width, crop.x]` (likewise for Y): the image's
/// left edge may not pass the crop's left edge and its right edge may not pass
/// the crop's right edge.
///
/// If the image is narrower than the crop the range is inverted. The clamp then
/// collapses to the lower bound, which right-aligns the image with the crop.
/// This never panics; callers keep scale and crop size from reaching that state.
///
/// # Example
///
/// ```
/// use cropkit_core::geometry::{CropArea, DisplaySize, ImageOffset};
/// use cropkit_core::transform::constrain;
///
/// let crop = CropArea::new(100.0, 100.0, 200.0, 200.0);
/// let offset = constrain(ImageOffset::new(200.0, 100.0), DisplaySize::new(400.0, 400.0), &crop);
/// assert_eq!(offset, ImageOffset::new(100.0, 100.0));
/// ```
#[inline]
pub fn constrain(offset: ImageOffset, display: DisplaySize, crop: &CropArea) -> ImageOffset {
    ImageOffset {
        offset_x: clamp_axis(offset.offset_x, crop.x, crop.width, display.width),
        offset_y: clamp_axis(offset.offset_y, crop.y, crop.height, display.height),
    }
}

#[inline]
fn clamp_axis(value: f64, crop_start: f64, crop_len: f64, display_len: f64) -> f64 {
    let min = crop_start + crop_len - display_len;
    let max = crop_start;
    // `f64::clamp` panics on min > max; this form collapses to `min` instead.
    value.min(max).max(min)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a crop rectangle inside a 1000x1000 canvas.
    fn crop_strategy() -> impl Strategy<Value = CropArea> {
        (0.0f64..=500.0, 0.0f64..=500.0, 1.0f64..=500.0, 1.0f64..=500.0)
            .prop_map(|(x, y, w, h)| CropArea::new(x, y, w, h))
    }

    proptest! {
        /// Property: whenever the image is at least as large as the crop,
        /// the constrained image fully covers the crop.
        #[test]
        fn prop_coverage_invariant(
            crop in crop_strategy(),
            (extra_w, extra_h) in (0.0f64..=1000.0, 0.0f64..=1000.0),
            (ox, oy) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
        ) {
            let display = DisplaySize::new(crop.width + extra_w, crop.height + extra_h);
            let offset = constrain(ImageOffset::new(ox, oy), display, &crop);

            prop_assert!(offset.offset_x <= crop.x + 1e-9);
            prop_assert!(offset.offset_x + display.width >= crop.right() - 1e-9);
            prop_assert!(offset.offset_y <= crop.y + 1e-9);
            prop_assert!(offset.offset_y + display.height >= crop.bottom() - 1e-9);
        }

        /// Property: constrain is a pure function.
        #[test]
        fn prop_deterministic(
            crop in crop_strategy(),
            (dw, dh) in (1.0f64..=2000.0, 1.0f64..=2000.0),
            (ox, oy) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
        ) {
            let display = DisplaySize::new(dw, dh);
            let a = constrain(ImageOffset::new(ox, oy), display, &crop);
            let b = constrain(ImageOffset::new(ox, oy), display, &crop);
            prop_assert_eq!(a, b);
        }

        /// Property: an already-constrained offset is a fixed point.
        #[test]
        fn prop_fixed_point(
            crop in crop_strategy(),
            (dw, dh) in (1.0f64..=2000.0, 1.0f64..=2000.0),
            (ox, oy) in (-3000.0f64..=3000.0, -3000.0f64..=3000.0),
        ) {
            let display = DisplaySize::new(dw, dh);
            let once = constrain(ImageOffset::new(ox, oy), display, &crop);
            prop_assert_eq!(constrain(once, display, &crop), once);
        }
    }
}
