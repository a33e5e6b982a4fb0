//! Core types for the transform kernel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for transform size-contract violations.
///
/// These indicate a caller bug rather than a runtime condition: the host is
/// responsible for only ever requesting power-of-two sizes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    /// The real and imaginary slices have different lengths.
    #[error("Real/imag length mismatch: real has {real} elements, imag has {imag}")]
    LengthMismatch { real: usize, imag: usize },

    /// An axis length is not a power of two.
    #[error("FFT length must be a power of two, got {len}")]
    NotPowerOfTwo { len: usize },

    /// The slices do not hold exactly `width * height` elements.
    #[error("Array size mismatch: expected {expected} elements (width * height), got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: usize, height: usize },

    /// The grayscale sample buffer does not match the requested dimensions.
    #[error("Invalid sample data: expected {expected} bytes (width * height), got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
}

/// Transform direction.
///
/// Controls the sign of the twiddle-factor exponent. The forward transform
/// uses `e^{-2πi/len}`, the inverse `e^{+2πi/len}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Spatial domain to frequency domain.
    #[default]
    Forward,
    /// Frequency domain back to spatial domain (un-normalized).
    Inverse,
}

impl Direction {
    /// Sign multiplier applied to the twiddle angle (+1 forward, -1 inverse).
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Inverse => -1.0,
        }
    }
}

/// Scaling convention applied once after a two-dimensional transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Normalization {
    /// No scaling in either direction.
    None,
    /// Scale by `1/(width*height)` on the forward path only.
    #[default]
    Forward,
    /// Scale by `1/(width*height)` on the inverse path only.
    Inverse,
    /// Scale by `1/sqrt(width*height)` in both directions.
    Unitary,
}

impl Normalization {
    /// Scale factor for a transform of `count` elements in `direction`,
    /// or `None` when no scaling applies.
    pub fn scale_for(self, direction: Direction, count: usize) -> Option<f64> {
        let n = count as f64;
        match (self, direction) {
            (Normalization::None, _) => None,
            (Normalization::Forward, Direction::Forward) => Some(1.0 / n),
            (Normalization::Inverse, Direction::Inverse) => Some(1.0 / n),
            (Normalization::Unitary, _) => Some(1.0 / n.sqrt()),
            _ => None,
        }
    }
}

impl From<u8> for Normalization {
    /// Values: 0 = None, 1 = Forward, 2 = Inverse, 3 = Unitary.
    /// Any other value defaults to Forward.
    fn from(value: u8) -> Self {
        match value {
            0 => Normalization::None,
            2 => Normalization::Inverse,
            3 => Normalization::Unitary,
            _ => Normalization::Forward,
        }
    }
}
