//! Asynchronous compute pipeline.
//!
//! This module provides:
//! - The request/response messages exchanged with the computation context
//! - [`compute`], the stateless body that turns one request into one response
//! - [`FftWorker`], a single long-lived thread that runs [`compute`] off the
//!   caller's control flow
//!
//! # Architecture
//!
//! The caller and the worker share no mutable memory. A request's sample
//! buffer is moved into the worker's channel, and the response's `real` and
//! `imag` buffers are moved back out. There is exactly one worker per
//! session, so computations never overlap and responses arrive in
//! submission order.
//!
//! The pipeline does not track request identity or cancel in-flight work.
//! Filtering out responses that no longer match the caller's current size
//! is the consumer's job; see [`crate::session::SpectrumSession`].

mod message;
mod worker;

pub use message::{PipelineError, TransformRequest, TransformResponse, WorkerEvent};
pub use worker::FftWorker;
pub(crate) use worker::ComputeFn;

use crate::fft::FftError;
use crate::spectrum::{forward_spectrum, ComplexField};
use tracing::trace;

/// Run one transform request to completion.
///
/// Converts the samples to a `[0, 1]` real field, runs the forward
/// composition, and moves the resulting buffers into the response. The
/// request is validated before any buffer is allocated or written.
pub fn compute(request: TransformRequest) -> Result<TransformResponse, FftError> {
    let options = request.options();
    let TransformRequest {
        width,
        height,
        samples,
        ..
    } = request;
    trace!(width, height, "compute");

    let mut field = ComplexField::from_samples(&samples, width as usize, height as usize)?;
    drop(samples);

    forward_spectrum(&mut field, &options)?;

    let (real, imag) = field.into_parts();
    Ok(TransformResponse {
        width,
        height,
        real,
        imag,
    })
}
