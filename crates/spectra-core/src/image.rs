//! Grayscale sample buffers and the provider seam used by the pipeline.

/// A grayscale image with one byte per sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    /// Image width in samples.
    pub width: u32,
    /// Image height in samples.
    pub height: u32,
    /// Intensities 0-255 in row-major order.
    /// Length should be width * height.
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Create a new GrayImage with the given dimensions and sample data.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize,
            "Sample buffer size mismatch"
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a square image filled with a single value.
    pub fn new_filled(size: u32, value: u8) -> Self {
        Self {
            width: size,
            height: size,
            data: vec![value; size as usize * size as usize],
        }
    }

    /// Get the total number of samples.
    pub fn sample_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.data.is_empty()
    }
}

/// Anything that can hand out the current grayscale grid.
///
/// The pipeline takes ownership of the returned buffer, so implementors
/// return a fresh copy of their current state.
pub trait SampleSource {
    /// Current samples, row-major, one byte per sample.
    fn samples(&self) -> Vec<u8>;
}

impl SampleSource for GrayImage {
    fn samples(&self) -> Vec<u8> {
        self.data.clone()
    }
}

/// Convert theme-dependent canvas samples to the canonical representation.
///
/// In the light theme the drawing surface shows dark ink on a white
/// background, so exact 0 and exact 255 are swapped to match the dark-theme
/// convention. Intermediate values pass through unchanged. Dark theme is
/// the identity.
pub fn canonicalize_for_theme(mut samples: Vec<u8>, is_dark: bool) -> Vec<u8> {
    if is_dark {
        return samples;
    }
    for v in samples.iter_mut() {
        *v = match *v {
            0 => 255,
            255 => 0,
            other => other,
        };
    }
    samples
}
