//! Cropper configuration.
//!
//! Every field has a default, so a host can pass a partial object (for example
//! `{ "aspect_ratio": 1.7778 }`) and get the stock behaviour for the rest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transform::ScaleLimits;

/// Default minimum crop size in display pixels.
pub const DEFAULT_MIN_SIZE: f64 = 50.0;
/// Default lower zoom bound.
pub const DEFAULT_MIN_SCALE: f64 = 1.0;
/// Default upper zoom bound.
pub const DEFAULT_MAX_SCALE: f64 = 2.0;
/// Default zoom slider quantisation.
pub const DEFAULT_SLIDER_STEP: f64 = 0.01;
/// Default zoom change per wheel notch.
pub const DEFAULT_WHEEL_STEP: f64 = 0.05;
/// Default threshold below which a pan update is considered a no-op.
pub const DEFAULT_PAN_EPSILON: f64 = 0.01;
/// Default hit radius for resize handles.
pub const DEFAULT_HANDLE_TOLERANCE: f64 = 12.0;

/// Errors reported by [`CropperConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// `min_scale` must be positive and not above `max_scale`.
    #[error("Invalid scale range: min ({min}) must be > 0 and <= max ({max})")]
    InvalidScaleRange { min: f64, max: f64 },

    /// Minimum crop sizes must be finite and non-negative.
    #[error("Invalid minimum crop size: {width}x{height}")]
    InvalidMinimumSize { width: f64, height: f64 },

    /// Zoom steps must be finite and positive.
    #[error("Invalid zoom step: {0}")]
    InvalidStep(f64),

    /// Aspect ratio must be finite and positive.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),
}

/// Tunables for a [`Cropper`](crate::Cropper) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropperConfig {
    /// Minimum crop width in display pixels.
    pub min_width: f64,
    /// Minimum crop height in display pixels.
    pub min_height: f64,
    /// Lowest zoom factor.
    pub min_scale: f64,
    /// Highest zoom factor.
    pub max_scale: f64,
    /// Slider values are snapped to multiples of this step.
    pub slider_step: f64,
    /// Zoom change applied per wheel notch.
    pub wheel_step: f64,
    /// Fixed width / height ratio, if any.
    pub aspect_ratio: Option<f64>,
    /// Pan updates smaller than this (in display pixels) are dropped.
    pub pan_epsilon: f64,
    /// Distance from a corner or edge that still grabs the resize handle.
    pub handle_tolerance: f64,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            slider_step: DEFAULT_SLIDER_STEP,
            wheel_step: DEFAULT_WHEEL_STEP,
            aspect_ratio: None,
            pan_epsilon: DEFAULT_PAN_EPSILON,
            handle_tolerance: DEFAULT_HANDLE_TOLERANCE,
        }
    }
}

impl CropperConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Builder-style setter for the minimum crop size.
    pub fn with_min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Check that the values describe a usable configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite())
        {
            return Err(ConfigError::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        let size_ok = |v: f64| v.is_finite() && v >= 0.0;
        if !size_ok(self.min_width) || !size_ok(self.min_height) {
            return Err(ConfigError::InvalidMinimumSize {
                width: self.min_width,
                height: self.min_height,
            });
        }

        for step in [self.slider_step, self.wheel_step] {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::InvalidStep(step));
            }
        }

        if let Some(ratio) = self.aspect_ratio {
            validate_aspect_ratio(ratio)?;
        }

        Ok(())
    }

    /// Clamp a zoom factor into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// The zoom range as used by the zoom math.
    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.min_scale, self.max_scale)
    }

    /// Snap a slider value to the configured step, then clamp it.
    pub fn snap_slider(&self, value: f64) -> f64 {
        let snapped = (value / self.slider_step).round() * self.slider_step;
        self.clamp_scale(snapped)
    }
}

/// Reject non-finite or non-positive ratios.
pub fn validate_aspect_ratio(ratio: f64) -> Result<(), ConfigError> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidAspectRatio(ratio))
    }
}
