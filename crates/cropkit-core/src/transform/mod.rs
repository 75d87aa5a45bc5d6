//! Coordinate transforms between image space and display space.
//!
//! This module holds the pure math the interactive cropper is built on:
//! fitting the image to the viewport, keeping the image under the crop window,
//! zooming about the crop centre, and mapping the crop back to source pixels.
//!
//! # Coordinate System
//!
//! - Display space is `f64` pixels relative to the viewport's top-left corner
//! - Image space is whole pixels of the decoded source image
//! - At scale 1.0 the image height is fitted exactly to the viewport height

mod constrain;
mod coords;
mod crop;
mod image_space;
mod zoom;

pub use constrain::constrain;
pub use coords::{base_display_size, base_scale, display_size};
pub use crop::apply_crop;
pub use image_space::{to_display_space, to_image_space};
pub use zoom::{set_scale, shrink_to_cover, ScaleLimits, ZoomResult};
