//! Quadrant swap that moves the zero-frequency bin to the field center.
//!
//! For even dimensions the swap is an involution, so the same routine both
//! centers a spectrum and undoes the centering.

use super::fft2d::validate_field;
use super::types::FftError;
use tracing::trace;

/// Move the DC component from `(0, 0)` to `(width/2, height/2)`.
///
/// Swaps quadrant `(0,0) ↔ (w/2,h/2)` and quadrant `(w/2,0) ↔ (0,h/2)`.
///
/// # Errors
///
/// Same size contract as [`fft2d_in_place`](super::fft2d_in_place).
pub fn fftshift2d_in_place(
    real: &mut [f32],
    imag: &mut [f32],
    width: usize,
    height: usize,
) -> Result<(), FftError> {
    validate_field(real.len(), imag.len(), width, height)?;
    trace!(width, height, "fftshift2d");
    swap_quadrants(real, imag, width, height);
    Ok(())
}

/// Inverse of [`fftshift2d_in_place`]. Identical for even dimensions.
pub fn ifftshift2d_in_place(
    real: &mut [f32],
    imag: &mut [f32],
    width: usize,
    height: usize,
) -> Result<(), FftError> {
    fftshift2d_in_place(real, imag, width, height)
}

pub(crate) fn swap_quadrants(real: &mut [f32], imag: &mut [f32], width: usize, height: usize) {
    let half_w = width >> 1;
    let half_h = height >> 1;

    for y in 0..half_h {
        for x in 0..half_w {
            let i00 = y * width + x;
            let i11 = (y + half_h) * width + (x + half_w);
            real.swap(i00, i11);
            imag.swap(i00, i11);

            let i10 = y * width + (x + half_w);
            let i01 = (y + half_h) * width + x;
            real.swap(i10, i01);
            imag.swap(i10, i01);
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
