//! Spectra WASM - WebAssembly bindings for Spectra
//!
//! This crate provides WASM bindings to expose the spectra-core transform
//! engine to JavaScript/TypeScript applications.
//!
//! In the browser the host's dedicated Web Worker is the isolated
//! computation context: it calls [`compute_spectrum_request`] (or one of
//! its siblings) synchronously and transfers the resulting buffers back to
//! the page, which discards responses whose size no longer matches the
//! current grid.
//!
//! # Module Structure
//!
//! - `spectrum` - Forward spectrum computation and reconstruction
//! - `fft` - Raw 2D FFT and quadrant shift on caller buffers
//! - `render` - Magnitude and phase display mapping
//! - `settings` - Settings defaults and theme resolution
//! - `types` - WASM-compatible wrapper types for spectrum data
//!
//! # Usage
//!
//! ```typescript
//! import init, { compute_spectrum } from '@spectra/wasm';
//!
//! await init();
//!
//! const spectrum = compute_spectrum(64, 64, pixels, true, 1, 1);
//! console.log(`Spectrum ${spectrum.width}x${spectrum.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod fft;
mod render;
mod settings;
mod spectrum;
mod types;

// Re-export public types
pub use fft::{fft2d, fftshift2d};
pub use render::{render_magnitude, render_phase, JsMagnitudeImage};
pub use settings::{default_settings, effective_dark};
pub use spectrum::{
    compute_spectrum, compute_spectrum_request, compute_spectrum_with_settings,
    reconstruct_samples,
};
pub use types::JsSpectrum;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: panic hook so kernel panics reach the browser console
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
