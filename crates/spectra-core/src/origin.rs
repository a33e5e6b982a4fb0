//! Spatial-origin conventions and the frequency-domain phase correction.
//!
//! The kernel natively treats the top-left sample as coordinate `(0, 0)`.
//! Two other conventions are supported:
//!
//! - **Center pixel**: the origin is the sample at `(floor(w/2), floor(h/2))`.
//!   Realized by quadrant-swapping the *spatial* field before the transform,
//!   which relabels that sample as index `(0, 0)`.
//! - **Center between**: the origin sits half a sample up and left of the
//!   center pixel, between the four middle samples. Realized by the same
//!   pre-shift plus a per-bin phase factor applied after the transform:
//!   ```text
//!   X'(u, v) = X(u, v) · e^{-2πi (0.5·u/w + 0.5·v/h)}
//!   ```
//!
//! The convention changes the phase of the spectrum, never its magnitude.
//! The correction is defined in un-shifted frequency coordinates, so it must
//! run before any display shift.

use crate::fft::{validate_field, Direction, FftError};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::trace;

/// Which sample position is treated as spatial coordinate `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OriginConvention {
    /// Top-left corner (the kernel's native indexing).
    TopLeft,
    /// The single center pixel at integer position `n/2`.
    #[default]
    CenterPixel,
    /// The point between the middle pixels, at half-integer position.
    CenterBetween,
}

impl OriginConvention {
    /// Whether the spatial field is quadrant-swapped before the transform.
    #[inline]
    pub fn needs_pre_shift(self) -> bool {
        matches!(
            self,
            OriginConvention::CenterPixel | OriginConvention::CenterBetween
        )
    }

    /// Whether the half-sample phase correction follows the transform.
    #[inline]
    pub fn needs_half_sample_correction(self) -> bool {
        self == OriginConvention::CenterBetween
    }
}

impl From<u8> for OriginConvention {
    /// Values: 0 = TopLeft, 1 = CenterPixel, 2 = CenterBetween.
    /// Any other value defaults to CenterPixel.
    fn from(value: u8) -> Self {
        match value {
            0 => OriginConvention::TopLeft,
            2 => OriginConvention::CenterBetween,
            _ => OriginConvention::CenterPixel,
        }
    }
}

/// Relabel the center sample of a spatial field as index `(0, 0)`.
///
/// This is the quadrant swap applied to spatial data. It is its own inverse
/// for even dimensions.
pub fn pre_shift(
    real: &mut [f32],
    imag: &mut [f32],
    width: usize,
    height: usize,
) -> Result<(), FftError> {
    crate::fft::fftshift2d_in_place(real, imag, width, height)
}

/// Multiply every bin `(u, v)` by `e^{-2πi (0.5·u/w + 0.5·v/h)}`.
///
/// With [`Direction::Inverse`] the conjugate factor is applied instead,
/// which exactly undoes a previous forward correction.
///
/// The factor separates into a per-column and a per-row term, so both are
/// tabulated once in `f64` and combined per bin.
pub fn apply_half_sample_correction(
    real: &mut [f32],
    imag: &mut [f32],
    width: usize,
    height: usize,
    direction: Direction,
) -> Result<(), FftError> {
    validate_field(real.len(), imag.len(), width, height)?;
    trace!(width, height, ?direction, "half_sample_correction");

    let sign = -direction.sign();
    let column_phase = phase_table(width, sign);
    let row_phase = phase_table(height, sign);

    for (v, &(row_re, row_im)) in row_phase.iter().enumerate() {
        let base = v * width;
        for (u, &(col_re, col_im)) in column_phase.iter().enumerate() {
            let w_re = row_re * col_re - row_im * col_im;
            let w_im = row_re * col_im + row_im * col_re;

            let i = base + u;
            let re = real[i] as f64;
            let im = imag[i] as f64;
            real[i] = (re * w_re - im * w_im) as f32;
            imag[i] = (re * w_im + im * w_re) as f32;
        }
    }

    Ok(())
}

/// `e^{sign · 2πi · 0.5k / n}` as `(cos, sin)` for `k in 0..n`.
fn phase_table(n: usize, sign: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|k| {
            let (s, c) = (sign * PI * k as f64 / n as f64).sin_cos();
            (c, s)
        })
        .collect()
}
