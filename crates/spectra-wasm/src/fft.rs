//! Low-level transform bindings on caller-owned buffers.
//!
//! The slices are copied into WASM memory, transformed in place, and copied
//! back into the caller's `Float32Array`s.

use crate::types::to_js_error;
use spectra_core::fft::{self, Direction, Normalization};
use wasm_bindgen::prelude::*;

/// In-place 2D FFT of a row-major field.
///
/// # Arguments
///
/// * `real` - Real parts (modified in place)
/// * `imag` - Imaginary parts (modified in place)
/// * `width` - Field width (power of two)
/// * `height` - Field height (power of two)
/// * `inverse` - Run the inverse transform instead of the forward one
/// * `normalization` - 0 = none, 1 = forward, 2 = inverse, 3 = unitary
///
/// # Example (TypeScript)
///
/// ```typescript
/// const real = Float32Array.from(pixels, (p) => p / 255);
/// const imag = new Float32Array(real.length);
/// fft2d(real, imag, 64, 64, false, 1);
/// ```
#[wasm_bindgen]
pub fn fft2d(
    real: &mut [f32],
    imag: &mut [f32],
    width: u32,
    height: u32,
    inverse: bool,
    normalization: u8,
) -> Result<(), JsValue> {
    let direction = if inverse {
        Direction::Inverse
    } else {
        Direction::Forward
    };
    fft::fft2d_in_place(
        real,
        imag,
        width as usize,
        height as usize,
        direction,
        Normalization::from(normalization),
    )
    .map_err(to_js_error)
}

/// Swap quadrants so DC moves to the center (or back again).
#[wasm_bindgen]
pub fn fftshift2d(real: &mut [f32], imag: &mut [f32], width: u32, height: u32) -> Result<(), JsValue> {
    fft::fftshift2d_in_place(real, imag, width as usize, height as usize).map_err(to_js_error)
}
