//! Spectrum display bindings.
//!
//! Produce RGBA pixel buffers (4 bytes per pixel) suitable for
//! `new ImageData(new Uint8ClampedArray(rgba), width, height)`.

use crate::types::to_js_error;
use spectra_core::render::{self, MagNorm, MagScale, PHASE_NULL_RGB};
use wasm_bindgen::prelude::*;

/// Magnitude rendering result accessible from JavaScript.
#[wasm_bindgen]
pub struct JsMagnitudeImage {
    rgba: Vec<u8>,
    max_value: f32,
}

#[wasm_bindgen]
impl JsMagnitudeImage {
    /// RGBA pixel data (copy).
    pub fn rgba(&self) -> Vec<u8> {
        self.rgba.clone()
    }

    /// Largest display-space value, for the magnitude legend.
    #[wasm_bindgen(getter)]
    pub fn max_value(&self) -> f32 {
        self.max_value
    }
}

/// Render spectrum magnitude as grayscale.
///
/// # Arguments
///
/// * `real`, `imag` - Spectrum buffers
/// * `width`, `height` - Field dimensions
/// * `log_scale` - Use `ln(1 + |z|)` instead of `|z|`
/// * `normalize_max` - Divide by the maximum (otherwise clip to [0, 1])
/// * `is_dark` - Effective theme; light theme inverts gray levels
#[wasm_bindgen]
pub fn render_magnitude(
    real: &[f32],
    imag: &[f32],
    width: u32,
    height: u32,
    log_scale: bool,
    normalize_max: bool,
    is_dark: bool,
) -> Result<JsMagnitudeImage, JsValue> {
    let scale = if log_scale { MagScale::Log } else { MagScale::Linear };
    let normalize = if normalize_max { MagNorm::Max } else { MagNorm::None };

    let (rgba, stats) = render::render_magnitude(real, imag, width, height, scale, normalize, is_dark)
        .map_err(to_js_error)?;
    Ok(JsMagnitudeImage {
        rgba,
        max_value: stats.max_value,
    })
}

/// Render spectrum phase (red positive, blue negative, gray for zero bins).
#[wasm_bindgen]
pub fn render_phase(real: &[f32], imag: &[f32], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    render::render_phase(real, imag, width, height, PHASE_NULL_RGB).map_err(to_js_error)
}
