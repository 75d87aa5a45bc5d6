//! Cropkit Core - interactive image crop engine
//!
//! This crate holds everything behind an interactive crop widget: fitting an
//! image to a viewport, keeping the image under the crop window while the
//! user pans and zooms, resizing the crop by its handles, and mapping the
//! result back to source pixels for export.
//!
//! # Modules
//!
//! - [`geometry`]: display-space and image-space primitives
//! - [`transform`]: coordinate math, constraint solver, zoom, export mapping
//! - [`selection`]: initial crop, resize handles and boundary clamping
//! - [`gesture`]: pointer/wheel/slider state machine and redraw coalescing
//! - [`cropper`]: the session tying it all together
//! - [`decode`], [`encode`], [`export`]: raster pipeline for the final file

pub mod config;
pub mod cropper;
pub mod decode;
pub mod encode;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod loader;
pub mod selection;
pub mod state;
pub mod transform;

pub use config::{ConfigError, CropperConfig};
pub use cropper::{CropListener, Cropper};
pub use export::{
    export_bytes, export_crop, export_data_url, export_decoded, export_file, ExportError,
    ExportOutput, ExportRequest, ExportedFile, ImageSource, SourceFetcher,
};
pub use geometry::{
    CropArea, DisplaySize, ExportedCropArea, ImageDimensions, ImageOffset, Point, ViewportRect,
};
pub use gesture::Interaction;
pub use loader::{LoadError, LoadToken};
pub use selection::ResizeHandle;
pub use state::CropState;
