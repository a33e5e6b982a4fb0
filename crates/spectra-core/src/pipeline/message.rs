//! Messages exchanged between the caller and the computation context.

use crate::fft::{FftError, Normalization};
use crate::origin::OriginConvention;
use crate::spectrum::{ComplexField, TransformOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The computation context crashed, could not be started, or has shut
    /// down. Recovery requires creating a new context.
    #[error("Transform unavailable: {0}")]
    Unavailable(String),

    /// A single submission violated the size contract. The context is
    /// still able to accept further work.
    #[error("Transform failed: {0}")]
    Transform(#[from] FftError),
}

/// One transform request.
///
/// The sample buffer is owned by the request and moves with it into the
/// computation context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    /// Field width (power of two).
    pub width: u32,
    /// Field height (power of two).
    pub height: u32,
    /// Grayscale samples 0-255, row-major, length `width * height`.
    pub samples: Vec<u8>,
    /// Move DC to the center of the output.
    pub apply_display_shift: bool,
    /// Output scaling.
    pub normalization: Normalization,
    /// Spatial origin of the input.
    pub origin_convention: OriginConvention,
}

impl TransformRequest {
    /// The conventions of this request without its data.
    pub fn options(&self) -> TransformOptions {
        TransformOptions {
            apply_display_shift: self.apply_display_shift,
            normalization: self.normalization,
            origin_convention: self.origin_convention,
        }
    }
}

/// The spectrum produced for one request.
///
/// Carries no identity of its own beyond the echoed dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformResponse {
    /// Width echoed from the request.
    pub width: u32,
    /// Height echoed from the request.
    pub height: u32,
    /// Real parts, row-major, length `width * height`.
    pub real: Vec<f32>,
    /// Imaginary parts, row-major, length `width * height`.
    pub imag: Vec<f32>,
}

impl TransformResponse {
    /// Whether this response was computed for a `width × height` field.
    #[inline]
    pub fn matches_size(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// Convert into a [`ComplexField`], re-checking the size contract.
    pub fn into_field(self) -> Result<ComplexField, FftError> {
        ComplexField::from_parts(
            self.width as usize,
            self.height as usize,
            self.real,
            self.imag,
        )
    }
}

/// Events sent from the computation context back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// A request finished successfully.
    Completed(TransformResponse),

    /// A request was rejected. Dimensions are echoed so the consumer can
    /// apply the same staleness check as for successful responses.
    Failed {
        width: u32,
        height: u32,
        error: FftError,
    },
}

impl WorkerEvent {
    /// Dimensions of the request this event answers.
    pub fn size(&self) -> (u32, u32) {
        match self {
            WorkerEvent::Completed(response) => (response.width, response.height),
            WorkerEvent::Failed { width, height, .. } => (*width, *height),
        }
    }
}
