//! Radix-2 fast Fourier transform in one and two dimensions.
//!
//! This module provides the numeric kernel of the engine:
//! - An in-place iterative Cooley–Tukey transform on a single axis
//! - Its separable extension to row-major two-dimensional fields
//! - The quadrant swap that moves the zero-frequency bin to the center
//!
//! # Layout
//!
//! Complex data is stored as two parallel `f32` slices (`real`, `imag`)
//! rather than an array of complex structs, so that buffers can be handed
//! to and from a JavaScript host as `Float32Array`s without repacking.
//! Two-dimensional fields are row-major: index `i = y * width + x`.
//!
//! # Size Contract
//!
//! Every axis length must be a power of two and both slices must have the
//! same length. Violations are reported as [`FftError`] before any element
//! is written.

mod fft1d;
mod fft2d;
mod shift;
mod types;

pub use fft1d::{bit_reverse_permute, fft1d_in_place};
pub use fft2d::fft2d_in_place;
pub(crate) use fft2d::validate_field;
pub use shift::{fftshift2d_in_place, ifftshift2d_in_place};
pub use types::{Direction, FftError, Normalization};

/// Returns true if `n` is a power of two. Zero is not.
#[inline]
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}
