//! Display mapping for complex spectra.
//!
//! These are the rendering collaborators of the engine: they take a
//! response's `real`/`imag` buffers and produce RGBA pixels (4 bytes per
//! pixel, row-major) ready to be put on a canvas.

use crate::fft::FftError;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use tracing::trace;

/// Gray used for bins with exactly zero magnitude in the phase view.
pub const PHASE_NULL_RGB: [u8; 3] = [128, 128, 128];

/// Below this the magnitude field is treated as constant zero.
const CONSTANT_FIELD_EPSILON: f32 = 1e-12;

/// Value space used for the magnitude view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MagScale {
    /// Plain magnitude `|z|`.
    #[default]
    Linear,
    /// `ln(1 + |z|)`.
    Log,
}

/// How display-space magnitudes are mapped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MagNorm {
    /// Divide by the largest value in the field.
    #[default]
    Max,
    /// Use values as-is and clip to [0, 1].
    None,
}

/// Summary of a magnitude rendering, used for the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeStats {
    /// Largest display-space value (`|z|` or `ln(1 + |z|)`).
    pub max_value: f32,
    pub scale: MagScale,
    pub normalize: MagNorm,
    /// Width of the rendered field.
    pub width: u32,
}

fn check_lengths(real: &[f32], imag: &[f32], width: u32, height: u32) -> Result<usize, FftError> {
    let expected = (width as usize) * (height as usize);
    for actual in [real.len(), imag.len()] {
        if actual != expected {
            return Err(FftError::DimensionMismatch { expected, actual });
        }
    }
    Ok(expected)
}

/// Render the magnitude of a spectrum as grayscale RGBA.
///
/// In the dark theme larger magnitudes are brighter; in the light theme the
/// gray levels are inverted. Alpha is always opaque.
pub fn render_magnitude(
    real: &[f32],
    imag: &[f32],
    width: u32,
    height: u32,
    scale: MagScale,
    normalize: MagNorm,
    is_dark: bool,
) -> Result<(Vec<u8>, MagnitudeStats), FftError> {
    let n = check_lengths(real, imag, width, height)?;
    trace!(width, height, ?scale, ?normalize, "render_magnitude");

    let values: Vec<f32> = real
        .iter()
        .zip(imag)
        .map(|(re, im)| {
            let mag = re.hypot(*im);
            match scale {
                MagScale::Linear => mag,
                MagScale::Log => mag.ln_1p(),
            }
        })
        .collect();

    let max_value = values.iter().copied().fold(0.0f32, f32::max);
    let constant_field = max_value <= CONSTANT_FIELD_EPSILON;

    let mut rgba = vec![0u8; n * 4];
    for (v, px) in values.iter().zip(rgba.chunks_exact_mut(4)) {
        let t = match normalize {
            MagNorm::Max if constant_field => 0.0,
            MagNorm::Max => (v / max_value).clamp(0.0, 1.0),
            MagNorm::None => v.clamp(0.0, 1.0),
        };

        let mut g = (255.0 * t).floor() as u8;
        if !is_dark {
            g = 255 - g;
        }
        px.copy_from_slice(&[g, g, g, 255]);
    }

    let stats = MagnitudeStats {
        max_value,
        scale,
        normalize,
        width,
    };
    Ok((rgba, stats))
}

/// Render the phase of a spectrum as RGBA.
///
/// Positive phase is drawn in red and negative phase in blue, with
/// intensity `|φ|/π`. Alpha fades linearly from opaque at `|φ| = π/2` to
/// transparent at `|φ| = π`. Bins with exactly zero magnitude get
/// `null_rgb`, fully opaque.
pub fn render_phase(
    real: &[f32],
    imag: &[f32],
    width: u32,
    height: u32,
    null_rgb: [u8; 3],
) -> Result<Vec<u8>, FftError> {
    let n = check_lengths(real, imag, width, height)?;
    trace!(width, height, "render_phase");

    let mut rgba = vec![0u8; n * 4];
    for ((re, im), px) in real.iter().zip(imag).zip(rgba.chunks_exact_mut(4)) {
        if re * re + im * im == 0.0 {
            px.copy_from_slice(&[null_rgb[0], null_rgb[1], null_rgb[2], 255]);
            continue;
        }

        let phi = im.atan2(*re);
        let t = phi.abs() / PI;
        let level = (255.0 * t).round() as u8;
        let (r, b) = if phi > 0.0 {
            (level, 0)
        } else if phi < 0.0 {
            (0, level)
        } else {
            (0, 0)
        };

        let a = phi.abs();
        let alpha = if a > FRAC_PI_2 {
            1.0 - ((a - FRAC_PI_2) / FRAC_PI_2).clamp(0.0, 1.0)
        } else {
            1.0
        };

        px.copy_from_slice(&[r, 0, b, (255.0 * alpha).round() as u8]);
    }

    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude_max_normalization_dark() {
        let real = vec![2.0, 1.0, 0.0, 0.0];
        let imag = vec![0.0; 4];
        let (rgba, stats) =
            render_magnitude(&real, &imag, 2, 2, MagScale::Linear, MagNorm::Max, true).unwrap();

        assert_eq!(stats.max_value, 2.0);
        assert_eq!(stats.width, 2);
        assert_eq!(&rgba[0..4], &[255, 255, 255, 255]);
        assert_eq!(&rgba[4..8], &[127, 127, 127, 255]);
        assert_eq!(&rgba[8..12], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_magnitude_light_theme_inverts() {
        let real = vec![1.0, 0.0];
        let imag = vec![0.0; 2];
        let (rgba, _) =
            render_magnitude(&real, &imag, 2, 1, MagScale::Linear, MagNorm::Max, false).unwrap();
        assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_magnitude_constant_zero_field() {
        let real = vec![0.0; 4];
        let imag = vec![0.0; 4];
        let (rgba, stats) =
            render_magnitude(&real, &imag, 2, 2, MagScale::Linear, MagNorm::Max, true).unwrap();
        assert_eq!(stats.max_value, 0.0);
        assert!(rgba.chunks(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_magnitude_none_clips() {
        let real = vec![3.0, 0.5];
        let imag = vec![0.0; 2];
        let (rgba, _) =
            render_magnitude(&real, &imag, 2, 1, MagScale::Linear, MagNorm::None, true).unwrap();
        assert_eq!(rgba[0], 255);
        assert_eq!(rgba[4], 127);
    }

    #[test]
    fn test_magnitude_log_scale() {
        let real = vec![std::f32::consts::E - 1.0];
        let imag = vec![0.0];
        let (_, stats) =
            render_magnitude(&real, &imag, 1, 1, MagScale::Log, MagNorm::Max, true).unwrap();
        assert!((stats.max_value - 1.0).abs() < 1e-6);
        assert_eq!(stats.scale, MagScale::Log);
    }

    #[test]
    fn test_magnitude_rejects_wrong_length() {
        let err = render_magnitude(&[0.0; 3], &[0.0; 3], 2, 2, MagScale::Linear, MagNorm::Max, true)
            .unwrap_err();
        assert_eq!(err, FftError::DimensionMismatch { expected: 4, actual: 3 });
    }

    #[test]
    fn test_phase_colors() {
        let real = vec![0.0, 1.0, 0.0, -1.0];
        let imag = vec![0.0, 0.0, 1.0, 0.0];
        let rgba = render_phase(&real, &imag, 4, 1, PHASE_NULL_RGB).unwrap();

        // zero magnitude
        assert_eq!(&rgba[0..4], &[128, 128, 128, 255]);
        // zero phase
        assert_eq!(&rgba[4..8], &[0, 0, 0, 255]);
        // +π/2: half red, opaque
        assert_eq!(&rgba[8..12], &[128, 0, 0, 255]);
        // +π: full red, transparent
        assert_eq!(&rgba[12..16], &[255, 0, 0, 0]);
    }

    #[test]
    fn test_phase_negative_is_blue() {
        let real = vec![0.0];
        let imag = vec![-1.0];
        let rgba = render_phase(&real, &imag, 1, 1, PHASE_NULL_RGB).unwrap();
        assert_eq!(&rgba[..], &[0, 0, 128, 255]);
    }

    #[test]
    fn test_phase_custom_null_color() {
        let rgba = render_phase(&[0.0], &[0.0], 1, 1, [1, 2, 3]).unwrap();
        assert_eq!(&rgba[..], &[1, 2, 3, 255]);
    }
}
