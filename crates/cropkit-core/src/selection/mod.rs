//! Crop rectangle geometry.
//!
//! Computes where the crop starts after a load, how each drag handle reshapes
//! it, and keeps it inside the region covered by both the viewport and the
//! displayed image.

mod handle;
mod initial;
mod resize;

pub use handle::{handle_at, Edge, HandleError, ResizeHandle};
pub use initial::{initial_crop, InitialLayout};
pub use resize::{clamp_crop, clamp_position, conform_to_ratio, crop_bounds, resize_crop, ResizeLimits};
