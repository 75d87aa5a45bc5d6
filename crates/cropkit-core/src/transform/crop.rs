//! Cutting the exported crop area out of a decoded image.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel of the source image
//! - The area is in whole image pixels, as produced by
//!   [`to_image_space`](super::to_image_space)
//!
//! # Example
//!
//! ```ignore
//! let area = ExportedCropArea::new(25, 25, 50, 50);
//! let cropped = apply_crop(&image, &area);
//! ```

use crate::decode::DecodedImage;
use crate::geometry::{ExportedCropArea, ImageDimensions};

/// Copy the pixels of `area` out of `image`.
///
/// # Arguments
///
/// * `image` - Source image
/// * `area` - Region to keep, in image pixels
///
/// # Returns
///
/// A new `DecodedImage` containing only the cropped region.
///
/// # Behavior
///
/// - The area is clamped into the image (size first, then position)
/// - Minimum output dimension is 1x1 pixels
/// - A full-image area returns a copy of the original image
pub fn apply_crop(image: &DecodedImage, area: &ExportedCropArea) -> DecodedImage {
    let dims = ImageDimensions::new(image.width, image.height);
    let area = area.clamped_to(dims);

    // Fast path: full crop returns a clone
    if area == ExportedCropArea::full(dims) {
        return image.clone();
    }

    let out_width = area.width.max(1).min(image.width.max(1));
    let out_height = area.height.max(1).min(image.height.max(1));
    let left = area.x.min(image.width.saturating_sub(out_width));
    let top = area.y.min(image.height.saturating_sub(out_height));

    let row_bytes = (out_width * 3) as usize;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Rows are contiguous in both buffers, so copy a slice per row
    for y in 0..out_height {
        let src_start = (((top + y) * image.width + left) * 3) as usize;
        output.extend_from_slice(&image.pixels[src_start..src_start + row_bytes]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
