//! Fitting the source image to the viewport.

use crate::geometry::{DisplaySize, ImageDimensions, ViewportRect};

/// Image pixels per display pixel at scale 1.0.
///
/// The image is always fitted to the viewport height. A zero-height viewport
/// (hidden or unmeasured container) yields `1.0` instead of dividing by zero.
#[inline]
pub fn base_scale(viewport: ViewportRect, image: ImageDimensions) -> f64 {
    if viewport.height <= 0.0 {
        return 1.0;
    }
    image.height as f64 / viewport.height
}

/// Display size of the image at scale 1.0.
///
/// Whenever the viewport height is non-zero, the returned height equals it.
///
/// # Example
///
/// ```
/// use cropkit_core::geometry::{ImageDimensions, ViewportRect};
/// use cropkit_core::transform::base_display_size;
///
/// let size = base_display_size(ViewportRect::new(400.0, 300.0), ImageDimensions::new(800, 600));
/// assert_eq!(size.width, 400.0);
/// assert_eq!(size.height, 300.0);
/// ```
#[inline]
pub fn base_display_size(viewport: ViewportRect, image: ImageDimensions) -> DisplaySize {
    let scale = base_scale(viewport, image);
    if scale <= 0.0 {
        // Zero-height image: nothing sensible to draw.
        return DisplaySize::default();
    }
    DisplaySize::new(image.width as f64 / scale, image.height as f64 / scale)
}

/// Display size at an arbitrary zoom factor.
#[inline]
pub fn display_size(base: DisplaySize, scale: f64) -> DisplaySize {
    base.scaled(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_scale_fits_height() {
        let scale = base_scale(ViewportRect::new(400.0, 300.0), ImageDimensions::new(800, 600));
        assert_eq!(scale, 2.0);
    }

    #[test]
    fn test_base_scale_zero_viewport() {
        let scale = base_scale(ViewportRect::new(400.0, 0.0), ImageDimensions::new(800, 600));
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_base_display_size_matches_viewport_height() {
        let size = base_display_size(ViewportRect::new(500.0, 250.0), ImageDimensions::new(1600, 900));
        assert!((size.height - 250.0).abs() < 1e-9);
        assert!((size.width - 444.444_444_444).abs() < 1e-6);
    }

    #[test]
    fn test_base_display_size_zero_viewport_is_native() {
        let size = base_display_size(ViewportRect::new(0.0, 0.0), ImageDimensions::new(640, 480));
        assert_eq!(size, DisplaySize::new(640.0, 480.0));
    }

    #[test]
    fn test_base_display_size_zero_image() {
        let size = base_display_size(ViewportRect::new(400.0, 300.0), ImageDimensions::new(0, 0));
        assert!(size.is_empty());
    }

    #[test]
    fn test_display_size_scales() {
        let size = display_size(DisplaySize::new(400.0, 300.0), 1.5);
        assert_eq!(size, DisplaySize::new(600.0, 450.0));
    }
}
