//! Spectrum computation bindings.
//!
//! These functions are the body of the host's FFT Web Worker: the worker
//! receives a request message, calls one of them synchronously, and posts
//! the resulting buffers back to the page. Staleness filtering stays on the
//! page side (compare `width`/`height` with the current grid size).
//!
//! # Example
//!
//! ```typescript
//! import { compute_spectrum_request } from '@spectra/wasm';
//!
//! self.onmessage = (e) => {
//!   const spectrum = compute_spectrum_request(e.data);
//!   const real = new Float32Array(spectrum.take_real());
//!   const imag = new Float32Array(spectrum.take_imag());
//!   self.postMessage(
//!     { width: spectrum.width, height: spectrum.height, real, imag },
//!     [real.buffer, imag.buffer],
//!   );
//! };
//! ```

use crate::types::{to_js_error, JsSpectrum};
use spectra_core::image::canonicalize_for_theme;
use spectra_core::{
    compute, inverse_spectrum, FftError, Normalization, OriginConvention, Settings,
    TransformOptions, TransformRequest,
};
use tracing::debug;
use wasm_bindgen::prelude::*;

/// Compute a spectrum from grayscale samples.
///
/// # Arguments
///
/// * `width` - Grid width (power of two)
/// * `height` - Grid height (power of two)
/// * `samples` - Grayscale samples 0-255, row-major (moved into WASM memory)
/// * `shift` - Move DC to the center
/// * `normalization` - 0 = none, 1 = forward, 2 = inverse, 3 = unitary
/// * `center` - 0 = top-left, 1 = center pixel, 2 = center between
///
/// # Errors
///
/// Returns an error if a dimension is not a power of two or the sample
/// count does not match.
#[wasm_bindgen]
pub fn compute_spectrum(
    width: u32,
    height: u32,
    samples: Vec<u8>,
    shift: bool,
    normalization: u8,
    center: u8,
) -> Result<JsSpectrum, JsValue> {
    let request = TransformRequest {
        width,
        height,
        samples,
        apply_display_shift: shift,
        normalization: Normalization::from(normalization),
        origin_convention: OriginConvention::from(center),
    };
    run(request).map_err(to_js_error)
}

/// Compute a spectrum from a request object.
///
/// The object has the shape
/// `{ width, height, samples, applyDisplayShift, normalization, originConvention }`
/// with string enum values (`"forward"`, `"centerPixel"`, ...).
#[wasm_bindgen]
pub fn compute_spectrum_request(request: JsValue) -> Result<JsSpectrum, JsValue> {
    let request: TransformRequest = serde_wasm_bindgen::from_value(request)
        .map_err(|e| JsValue::from_str(&format!("Invalid transform request: {}", e)))?;
    run(request).map_err(to_js_error)
}

/// Compute a spectrum using a settings object.
///
/// Samples are taken as drawn on the canvas and canonicalized for the
/// effective theme before transforming.
///
/// # Arguments
///
/// * `size` - Square grid size (power of two)
/// * `samples` - Grayscale canvas samples
/// * `settings` - Settings object (`{ center, shift, normalization, ... }`)
/// * `is_dark` - Effective theme
#[wasm_bindgen]
pub fn compute_spectrum_with_settings(
    size: u32,
    samples: Vec<u8>,
    settings: JsValue,
    is_dark: bool,
) -> Result<JsSpectrum, JsValue> {
    let settings: Settings = serde_wasm_bindgen::from_value(settings)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    run(request_from_settings(&settings, size, samples, is_dark)).map_err(to_js_error)
}

/// Reconstruct the spatial field from a spectrum.
///
/// The conventions must match those used to compute the spectrum. Returns
/// the real part of the reconstruction (row-major, `width * height`).
#[wasm_bindgen]
pub fn reconstruct_samples(
    spectrum: &JsSpectrum,
    shift: bool,
    normalization: u8,
    center: u8,
) -> Result<Vec<f32>, JsValue> {
    let options = TransformOptions {
        apply_display_shift: shift,
        normalization: Normalization::from(normalization),
        origin_convention: OriginConvention::from(center),
    };
    reconstruct(spectrum, &options).map_err(to_js_error)
}

fn run(request: TransformRequest) -> Result<JsSpectrum, FftError> {
    debug!(width = request.width, height = request.height, "compute_spectrum");
    compute(request).map(JsSpectrum::from_response)
}

fn request_from_settings(
    settings: &Settings,
    size: u32,
    samples: Vec<u8>,
    is_dark: bool,
) -> TransformRequest {
    settings.request_for(size, size, canonicalize_for_theme(samples, is_dark))
}

fn reconstruct(spectrum: &JsSpectrum, options: &TransformOptions) -> Result<Vec<f32>, FftError> {
    let mut field = spectrum.to_field()?;
    inverse_spectrum(&mut field, options)?;
    Ok(field.into_parts().0)
}
