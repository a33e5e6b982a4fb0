//! User-facing preferences that drive the transform and its display.
//!
//! The struct serializes with camelCase keys so the host's settings object
//! maps onto it directly.

use crate::fft::Normalization;
use crate::origin::OriginConvention;
use crate::pipeline::TransformRequest;
use crate::render::MagScale;
use crate::spectrum::TransformOptions;
use serde::{Deserialize, Serialize};

/// Theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayColoring {
    /// Follow the operating system preference.
    #[default]
    System,
    Dark,
    Light,
}

impl DisplayColoring {
    /// Whether the effective theme is dark, given the system preference.
    pub fn resolve(self, system_dark: bool) -> bool {
        match self {
            DisplayColoring::System => system_dark,
            DisplayColoring::Dark => true,
            DisplayColoring::Light => false,
        }
    }
}

/// Whether spectra are displayed with DC at the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShiftConvention {
    #[default]
    Shifted,
    Unshifted,
}

impl ShiftConvention {
    #[inline]
    pub fn is_shifted(self) -> bool {
        self == ShiftConvention::Shifted
    }
}

/// Transform and display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Theme selection.
    pub coloring: DisplayColoring,
    /// Spatial origin convention.
    pub center: OriginConvention,
    /// Display shift.
    pub shift: ShiftConvention,
    /// Magnitude view scale.
    pub mag_scale: MagScale,
    /// Output scaling.
    pub normalization: Normalization,
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// The transform conventions these settings select.
    pub fn transform_options(&self) -> TransformOptions {
        TransformOptions {
            apply_display_shift: self.shift.is_shifted(),
            normalization: self.normalization,
            origin_convention: self.center,
        }
    }

    /// Build a request for a `width × height` grid of samples.
    pub fn request_for(&self, width: u32, height: u32, samples: Vec<u8>) -> TransformRequest {
        let options = self.transform_options();
        TransformRequest {
            width,
            height,
            samples,
            apply_display_shift: options.apply_display_shift,
            normalization: options.normalization,
            origin_convention: options.origin_convention,
        }
    }
}
