//! WASM-compatible wrapper types for spectrum data.
//!
//! This module provides JavaScript-friendly types that wrap the core Spectra types,
//! handling the conversion between Rust and JavaScript data representations.

use spectra_core::{ComplexField, FftError, TransformResponse};
use wasm_bindgen::prelude::*;

/// A computed spectrum for JavaScript.
///
/// Mirrors the worker response message: the dimensions the request was made
/// for, plus row-major real and imaginary parts.
///
/// # Memory Management
///
/// The buffers live in WASM memory. `real()` and `imag()` copy them out as
/// `Float32Array`s. Use `take_real()`/`take_imag()` to move a buffer out
/// without keeping a second copy.
#[wasm_bindgen]
pub struct JsSpectrum {
    width: u32,
    height: u32,
    real: Vec<f32>,
    imag: Vec<f32>,
}

#[wasm_bindgen]
impl JsSpectrum {
    /// Create a spectrum from dimensions and buffers.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, real: Vec<f32>, imag: Vec<f32>) -> JsSpectrum {
        JsSpectrum {
            width,
            height,
            real,
            imag,
        }
    }

    /// Width echoed from the request
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height echoed from the request
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the real parts as Float32Array (copy).
    pub fn real(&self) -> Vec<f32> {
        self.real.clone()
    }

    /// Returns the imaginary parts as Float32Array (copy).
    pub fn imag(&self) -> Vec<f32> {
        self.imag.clone()
    }

    /// Move the real parts out, leaving an empty buffer behind.
    pub fn take_real(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.real)
    }

    /// Move the imaginary parts out, leaving an empty buffer behind.
    pub fn take_imag(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.imag)
    }

    /// Whether this spectrum was computed for a `width × height` grid.
    ///
    /// Hosts use this to drop results that arrive after the grid size changed.
    pub fn matches_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

impl JsSpectrum {
    pub(crate) fn from_response(response: TransformResponse) -> Self {
        Self {
            width: response.width,
            height: response.height,
            real: response.real,
            imag: response.imag,
        }
    }

    /// Copy into a core field for the inverse path.
    pub(crate) fn to_field(&self) -> Result<ComplexField, FftError> {
        ComplexField::from_parts(
            self.width as usize,
            self.height as usize,
            self.real.clone(),
            self.imag.clone(),
        )
    }
}

/// Convert an error for the JavaScript side, reporting it on the console.
pub(crate) fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    let message = error.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
