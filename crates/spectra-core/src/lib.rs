//! Spectra Core - Two-dimensional Fourier transform engine
//!
//! This crate provides the numeric core of Spectra: a radix-2 FFT kernel,
//! its separable 2D extension, spectrum centering, spatial-origin phase
//! correction, and an asynchronous pipeline that runs transforms on a
//! dedicated worker and filters out stale results.
//!
//! # Module Structure
//!
//! - `fft` - 1D kernel, 2D extension, normalization, quadrant shift
//! - `origin` - Spatial-origin conventions and half-sample correction
//! - `spectrum` - Complex fields and the forward/inverse stage composition
//! - `pipeline` - Request/response messages and the worker thread
//! - `session` - Consumer-side staleness filtering and recovery
//! - `image` - Grayscale sample buffers and providers
//! - `render` - Magnitude and phase display mapping
//! - `settings` - User preferences and their defaults
//!
//! # Logging
//!
//! Operations emit `tracing` events (`trace` per heavy operation, `debug`
//! for pipeline lifecycle, `warn` for failures). Installing a subscriber is
//! left to the embedding application.

pub mod fft;
pub mod image;
pub mod origin;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod settings;
pub mod spectrum;

pub use fft::{Direction, FftError, Normalization};
pub use image::{GrayImage, SampleSource};
pub use origin::OriginConvention;
pub use pipeline::{compute, FftWorker, PipelineError, TransformRequest, TransformResponse};
pub use session::{SessionUpdate, SpectrumSession};
pub use settings::Settings;
pub use spectrum::{forward_spectrum, inverse_spectrum, ComplexField, TransformOptions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_impulse() {
        let mut samples = vec![0u8; 16];
        samples[0] = 255;
        let request = TransformRequest {
            width: 4,
            height: 4,
            samples,
            apply_display_shift: false,
            normalization: Normalization::Forward,
            origin_convention: OriginConvention::TopLeft,
        };

        let response = compute(request).unwrap();
        for (re, im) in response.real.iter().zip(&response.imag) {
            assert!((re.hypot(*im) - 1.0 / 16.0).abs() < 1e-7);
        }
    }

    #[test]
    fn test_settings_default_request_round_trips() {
        let image = GrayImage::new_filled(8, 200);
        let settings = Settings::default();
        let request = settings.request_for(8, 8, image.samples());
        let options = request.options();

        let response = compute(request).unwrap();
        let mut field = response.into_field().unwrap();

        assert_eq!(options.normalization, Normalization::Forward);
        // Forward-normalized spectrum of a constant: DC equals the sample value
        let dc = field.get(4, 4);
        assert!((dc.0 - 200.0 / 255.0).abs() < 1e-6);

        inverse_spectrum(&mut field, &options).unwrap();
        assert!(field.real().iter().all(|v| (v - 200.0 / 255.0).abs() < 1e-5));
    }
}
