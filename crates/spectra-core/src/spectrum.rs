//! Complex fields and the full forward/inverse composition.
//!
//! # Stage Order
//!
//! The forward path runs up to four stages, in this exact order:
//! 1. Pre-shift of the spatial field (center-pixel and center-between origins)
//! 2. Forward 2D FFT with the requested normalization
//! 3. Half-sample phase correction (center-between origin only)
//! 4. Display shift moving DC to the center (if requested)
//!
//! Reordering changes the result: the phase correction is defined in
//! un-shifted frequency coordinates. The inverse path undoes the stages in
//! reverse order.

use crate::fft::{
    fft2d_in_place, fftshift2d_in_place, ifftshift2d_in_place, is_power_of_two, Direction,
    FftError, Normalization,
};
use crate::origin::{apply_half_sample_correction, pre_shift, OriginConvention};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A row-major complex field of `width × height` bins.
///
/// Invariant: `real.len() == imag.len() == width * height`, and both
/// dimensions are powers of two.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexField {
    width: usize,
    height: usize,
    real: Vec<f32>,
    imag: Vec<f32>,
}

impl ComplexField {
    /// Create a zero-filled field.
    pub fn zeros(width: usize, height: usize) -> Result<Self, FftError> {
        validate_dimensions(width, height)?;
        let n = width * height;
        Ok(Self {
            width,
            height,
            real: vec![0.0; n],
            imag: vec![0.0; n],
        })
    }

    /// Wrap existing buffers after checking the size contract.
    pub fn from_parts(
        width: usize,
        height: usize,
        real: Vec<f32>,
        imag: Vec<f32>,
    ) -> Result<Self, FftError> {
        validate_dimensions(width, height)?;
        let expected = width * height;
        for actual in [real.len(), imag.len()] {
            if actual != expected {
                return Err(FftError::DimensionMismatch { expected, actual });
            }
        }
        Ok(Self {
            width,
            height,
            real,
            imag,
        })
    }

    /// Build a real-valued field from 8-bit grayscale samples mapped to [0, 1].
    pub fn from_samples(samples: &[u8], width: usize, height: usize) -> Result<Self, FftError> {
        validate_dimensions(width, height)?;
        let expected = width * height;
        if samples.len() != expected {
            return Err(FftError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }

        let real = samples.iter().map(|&s| s as f32 / 255.0).collect();
        Ok(Self {
            width,
            height,
            real,
            imag: vec![0.0; expected],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn real(&self) -> &[f32] {
        &self.real
    }

    pub fn imag(&self) -> &[f32] {
        &self.imag
    }

    /// Number of bins (`width * height`).
    pub fn len(&self) -> usize {
        self.real.len()
    }

    /// Always false for a validly constructed field.
    pub fn is_empty(&self) -> bool {
        self.real.is_empty()
    }

    /// Complex value at `(x, y)` as `(re, im)`.
    pub fn get(&self, x: usize, y: usize) -> (f32, f32) {
        let i = y * self.width + x;
        (self.real[i], self.imag[i])
    }

    /// Magnitude `|z|` at `(x, y)`.
    pub fn magnitude(&self, x: usize, y: usize) -> f32 {
        let (re, im) = self.get(x, y);
        re.hypot(im)
    }

    /// Phase `atan2(im, re)` at `(x, y)`, in `[-π, π]`.
    pub fn phase(&self, x: usize, y: usize) -> f32 {
        let (re, im) = self.get(x, y);
        im.atan2(re)
    }

    /// Mutable access to both buffers at once.
    pub fn parts_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        (&mut self.real, &mut self.imag)
    }

    /// Give up ownership of the buffers.
    pub fn into_parts(self) -> (Vec<f32>, Vec<f32>) {
        (self.real, self.imag)
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<(), FftError> {
    if width == 0 || height == 0 {
        return Err(FftError::InvalidDimensions { width, height });
    }
    for len in [width, height] {
        if !is_power_of_two(len) {
            return Err(FftError::NotPowerOfTwo { len });
        }
    }
    Ok(())
}

/// Conventions governing one spectrum computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    /// Move DC to the center of the output.
    pub apply_display_shift: bool,
    /// Output scaling.
    pub normalization: Normalization,
    /// Spatial origin of the input.
    pub origin_convention: OriginConvention,
}

/// Transform a spatial field into its spectrum in place.
///
/// Runs pre-shift, forward FFT, half-sample correction and display shift,
/// each only when `options` calls for it.
pub fn forward_spectrum(field: &mut ComplexField, options: &TransformOptions) -> Result<(), FftError> {
    let (width, height) = (field.width, field.height);
    trace!(width, height, ?options, "forward_spectrum");

    let (real, imag) = field.parts_mut();

    if options.origin_convention.needs_pre_shift() {
        pre_shift(real, imag, width, height)?;
    }

    fft2d_in_place(real, imag, width, height, Direction::Forward, options.normalization)?;

    if options.origin_convention.needs_half_sample_correction() {
        apply_half_sample_correction(real, imag, width, height, Direction::Forward)?;
    }

    if options.apply_display_shift {
        fftshift2d_in_place(real, imag, width, height)?;
    }

    Ok(())
}

/// Reconstruct the spatial field from a spectrum produced by
/// [`forward_spectrum`] with the same `options`.
///
/// Undoes the display shift, conjugates the half-sample correction, runs the
/// inverse FFT and finally undoes the pre-shift.
pub fn inverse_spectrum(field: &mut ComplexField, options: &TransformOptions) -> Result<(), FftError> {
    let (width, height) = (field.width, field.height);
    trace!(width, height, ?options, "inverse_spectrum");

    let (real, imag) = field.parts_mut();

    if options.apply_display_shift {
        ifftshift2d_in_place(real, imag, width, height)?;
    }

    if options.origin_convention.needs_half_sample_correction() {
        apply_half_sample_correction(real, imag, width, height, Direction::Inverse)?;
    }

    fft2d_in_place(real, imag, width, height, Direction::Inverse, options.normalization)?;

    if options.origin_convention.needs_pre_shift() {
        ifftshift2d_in_place(real, imag, width, height)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn impulse(width: usize, height: usize, x: usize, y: usize) -> ComplexField {
        let mut field = ComplexField::zeros(width, height).unwrap();
        field.parts_mut().0[y * width + x] = 1.0;
        field
    }

    fn options(
        shift: bool,
        normalization: Normalization,
        origin: OriginConvention,
    ) -> TransformOptions {
        TransformOptions {
            apply_display_shift: shift,
            normalization,
            origin_convention: origin,
        }
    }

    #[test]
    fn test_from_samples_maps_to_unit_range() {
        let field = ComplexField::from_samples(&[0, 51, 255, 102], 2, 2).unwrap();
        assert_eq!(field.real(), &[0.0, 0.2, 1.0, 0.4]);
        assert!(field.imag().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_from_samples_rejects_wrong_length() {
        let err = ComplexField::from_samples(&[0; 15], 4, 4).unwrap_err();
        assert_eq!(err, FftError::SampleCountMismatch { expected: 16, actual: 15 });
    }

    #[test]
    fn test_from_parts_rejects_bad_shapes() {
        assert_eq!(
            ComplexField::from_parts(4, 4, vec![0.0; 16], vec![0.0; 8]).unwrap_err(),
            FftError::DimensionMismatch { expected: 16, actual: 8 }
        );
        assert_eq!(
            ComplexField::from_parts(6, 4, vec![0.0; 24], vec![0.0; 24]).unwrap_err(),
            FftError::NotPowerOfTwo { len: 6 }
        );
        assert_eq!(
            ComplexField::zeros(0, 8).unwrap_err(),
            FftError::InvalidDimensions { width: 0, height: 8 }
        );
    }

    #[test]
    fn test_impulse_top_left_known_transform() {
        let mut field = impulse(4, 4, 0, 0);
        let opts = options(false, Normalization::Forward, OriginConvention::TopLeft);
        forward_spectrum(&mut field, &opts).unwrap();

        for y in 0..4 {
            for x in 0..4 {
                assert!((field.magnitude(x, y) - 1.0 / 16.0).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn test_constant_field_known_transform() {
        let mut field = ComplexField::from_parts(4, 4, vec![1.0; 16], vec![0.0; 16]).unwrap();
        let opts = options(false, Normalization::Forward, OriginConvention::TopLeft);
        forward_spectrum(&mut field, &opts).unwrap();

        assert_eq!(field.get(0, 0), (1.0, 0.0));
        for i in 1..16 {
            assert_eq!(field.real()[i], 0.0);
            assert_eq!(field.imag()[i], 0.0);
        }
    }

    #[test]
    fn test_display_shift_centers_dc() {
        let mut field = ComplexField::from_parts(4, 4, vec![1.0; 16], vec![0.0; 16]).unwrap();
        let opts = options(true, Normalization::Forward, OriginConvention::TopLeft);
        forward_spectrum(&mut field, &opts).unwrap();
        assert_eq!(field.get(2, 2), (1.0, 0.0));
        assert_eq!(field.get(0, 0), (0.0, 0.0));
    }

    #[test]
    fn test_center_pixel_impulse_has_zero_phase() {
        // An impulse exactly at the center pixel is the origin under this
        // convention, so its spectrum is real and flat.
        let mut field = impulse(8, 8, 4, 4);
        let opts = options(false, Normalization::Forward, OriginConvention::CenterPixel);
        forward_spectrum(&mut field, &opts).unwrap();

        for i in 0..64 {
            assert!((field.real()[i] - 1.0 / 64.0).abs() < 1e-7);
            assert!(field.imag()[i].abs() < 1e-7);
        }
    }

    #[test]
    fn test_conventions_change_phase_not_magnitude() {
        let samples: Vec<u8> = (0..64).map(|i| ((i * 29) % 256) as u8).collect();
        let mut reference = ComplexField::from_samples(&samples, 8, 8).unwrap();
        forward_spectrum(
            &mut reference,
            &options(false, Normalization::Forward, OriginConvention::TopLeft),
        )
        .unwrap();

        for origin in [OriginConvention::CenterPixel, OriginConvention::CenterBetween] {
            let mut field = ComplexField::from_samples(&samples, 8, 8).unwrap();
            forward_spectrum(&mut field, &options(false, Normalization::Forward, origin)).unwrap();
            for y in 0..8 {
                for x in 0..8 {
                    assert!((field.magnitude(x, y) - reference.magnitude(x, y)).abs() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_center_between_differs_from_center_pixel_by_correction() {
        let samples: Vec<u8> = (0..16).map(|i| (i * 16) as u8).collect();

        let mut pixel = ComplexField::from_samples(&samples, 4, 4).unwrap();
        forward_spectrum(
            &mut pixel,
            &options(false, Normalization::Forward, OriginConvention::CenterPixel),
        )
        .unwrap();

        let mut between = ComplexField::from_samples(&samples, 4, 4).unwrap();
        forward_spectrum(
            &mut between,
            &options(false, Normalization::Forward, OriginConvention::CenterBetween),
        )
        .unwrap();

        let (re, im) = pixel.get(1, 0);
        let angle = -2.0 * PI * 0.5 / 4.0;
        let (s, c) = angle.sin_cos();
        let expected = (re * c - im * s, re * s + im * c);
        let got = between.get(1, 0);
        assert!((got.0 - expected.0).abs() < 1e-6);
        assert!((got.1 - expected.1).abs() < 1e-6);
    }

    #[test]
    fn test_stage_order_matters() {
        // Correction before display shift (the defined order) versus after.
        let samples: Vec<u8> = (0..16).map(|i| ((i * 53) % 256) as u8).collect();
        let opts = options(true, Normalization::Forward, OriginConvention::CenterBetween);

        let mut ordered = ComplexField::from_samples(&samples, 4, 4).unwrap();
        forward_spectrum(&mut ordered, &opts).unwrap();

        let mut swapped = ComplexField::from_samples(&samples, 4, 4).unwrap();
        {
            let (re, im) = swapped.parts_mut();
            pre_shift(re, im, 4, 4).unwrap();
            fft2d_in_place(re, im, 4, 4, Direction::Forward, Normalization::Forward).unwrap();
            fftshift2d_in_place(re, im, 4, 4).unwrap();
            apply_half_sample_correction(re, im, 4, 4, Direction::Forward).unwrap();
        }

        let max_diff = ordered
            .real()
            .iter()
            .chain(ordered.imag())
            .zip(swapped.real().iter().chain(swapped.imag()))
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_diff > 1e-3);
    }

    #[test]
    fn test_round_trip_every_convention() {
        let samples: Vec<u8> = (0..128).map(|i| ((i * 71 + 13) % 256) as u8).collect();
        let original = ComplexField::from_samples(&samples, 16, 8).unwrap();

        for origin in [
            OriginConvention::TopLeft,
            OriginConvention::CenterPixel,
            OriginConvention::CenterBetween,
        ] {
            for shift in [false, true] {
                let opts = options(shift, Normalization::Unitary, origin);
                let mut field = original.clone();
                forward_spectrum(&mut field, &opts).unwrap();
                inverse_spectrum(&mut field, &opts).unwrap();

                for i in 0..field.len() {
                    let expected = original.real()[i];
                    assert!(
                        (field.real()[i] - expected).abs() <= 1e-4 * expected.abs().max(1.0),
                        "{:?} shift={} bin {}",
                        origin,
                        shift,
                        i
                    );
                    assert!(field.imag()[i].abs() <= 1e-4);
                }
            }
        }
    }

    #[test]
    fn test_transform_options_serde() {
        let opts = options(true, Normalization::Unitary, OriginConvention::CenterBetween);
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(
            json,
            r#"{"applyDisplayShift":true,"normalization":"unitary","originConvention":"centerBetween"}"#
        );
        let back: TransformOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
