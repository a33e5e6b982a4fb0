//! In-place radix-2 Cooley–Tukey transform on a single axis.
//!
//! # Algorithm
//!
//! Iterative decimation-in-time:
//! 1. Reorder the input into bit-reversed index order.
//! 2. For `len = 2, 4, ..., n`, combine each pair of adjacent half-size
//!    transforms with the butterfly
//!    ```text
//!    X[k]         = E[k] + w^k * O[k]
//!    X[k + len/2] = E[k] - w^k * O[k]
//!    ```
//!    where `w = e^{-2πi·dir/len}`.
//!
//! Successive powers of `w` are produced by repeated complex multiplication
//! rather than by evaluating `sin`/`cos` for every `k`. The accumulated error
//! grows linearly with the number of stages. The recurrence runs in `f64`
//! while the data stays in `f32`.

use super::is_power_of_two;
use super::types::{Direction, FftError};
use std::f64::consts::PI;

/// Running complex root of unity for the butterfly stages.
#[derive(Debug, Clone, Copy)]
struct Twiddle {
    re: f64,
    im: f64,
}

impl Twiddle {
    const ONE: Twiddle = Twiddle { re: 1.0, im: 0.0 };

    /// Principal root `e^{dir·(-2πi)/len}` for a stage of size `len`.
    fn principal(len: usize, direction: Direction) -> Self {
        let theta = direction.sign() * -2.0 * PI / len as f64;
        let (im, re) = theta.sin_cos();
        Twiddle { re, im }
    }

    #[inline]
    fn mul(self, other: Twiddle) -> Twiddle {
        Twiddle {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }
}

/// Compute the discrete Fourier transform of one axis in place.
///
/// The forward direction yields the un-normalized DFT, the inverse
/// direction the un-normalized inverse DFT (the result is `n` times the
/// original signal). Scaling is left to the caller.
///
/// # Arguments
///
/// * `real` - Real parts, length `n`
/// * `imag` - Imaginary parts, length `n`
/// * `direction` - Sign of the exponent
///
/// # Errors
///
/// Returns an error without touching either slice if the lengths differ or
/// `n` is not a power of two.
///
/// # Example
///
/// ```ignore
/// use spectra_core::fft::{fft1d_in_place, Direction};
///
/// let mut re = vec![1.0, 0.0, 0.0, 0.0];
/// let mut im = vec![0.0; 4];
/// fft1d_in_place(&mut re, &mut im, Direction::Forward)?;
/// assert_eq!(re, vec![1.0; 4]);
/// ```
pub fn fft1d_in_place(
    real: &mut [f32],
    imag: &mut [f32],
    direction: Direction,
) -> Result<(), FftError> {
    validate_axis(real.len(), imag.len())?;
    transform_unchecked(real, imag, direction);
    Ok(())
}

/// Check the size contract for one axis.
pub(crate) fn validate_axis(real_len: usize, imag_len: usize) -> Result<(), FftError> {
    if real_len != imag_len {
        return Err(FftError::LengthMismatch {
            real: real_len,
            imag: imag_len,
        });
    }
    if !is_power_of_two(real_len) {
        return Err(FftError::NotPowerOfTwo { len: real_len });
    }
    Ok(())
}

/// Butterfly stages on already-validated slices.
pub(crate) fn transform_unchecked(real: &mut [f32], imag: &mut [f32], direction: Direction) {
    let n = real.len();

    permute_unchecked(real, imag);

    let mut len = 2;
    while len <= n {
        let half = len >> 1;
        let step = Twiddle::principal(len, direction);

        for start in (0..n).step_by(len) {
            let mut w = Twiddle::ONE;

            for k in 0..half {
                let i0 = start + k;
                let i1 = i0 + half;

                let u_re = real[i0] as f64;
                let u_im = imag[i0] as f64;

                let o_re = real[i1] as f64;
                let o_im = imag[i1] as f64;
                let v_re = o_re * w.re - o_im * w.im;
                let v_im = o_re * w.im + o_im * w.re;

                real[i0] = (u_re + v_re) as f32;
                imag[i0] = (u_im + v_im) as f32;
                real[i1] = (u_re - v_re) as f32;
                imag[i1] = (u_im - v_im) as f32;

                w = w.mul(step);
            }
        }

        len <<= 1;
    }
}

/// Reorder both slices into bit-reversed index order.
///
/// Element `i` moves to `bit_reverse(i, log2(n))`. Useful on its own for
/// inspecting the permutation; [`fft1d_in_place`] applies it internally.
///
/// # Errors
///
/// Same size contract as [`fft1d_in_place`].
pub fn bit_reverse_permute(real: &mut [f32], imag: &mut [f32]) -> Result<(), FftError> {
    validate_axis(real.len(), imag.len())?;
    permute_unchecked(real, imag);
    Ok(())
}

fn permute_unchecked(real: &mut [f32], imag: &mut [f32]) {
    let n = real.len();

    // Invariant: at the top of iteration i, j == bit_reverse(i).
    let mut j = 0usize;
    for i in 0..n {
        if i < j {
            real.swap(i, j);
            imag.swap(i, j);
        }

        // Reversed-bit increment: clear set bits from the top down, then
        // set the first clear one.
        let mut m = n >> 1;
        while m >= 1 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }
}



// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::test_util::naive_dft;
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a power-of-two length signal with values in [-1, 1].
    fn signal_strategy() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
        (0u32..=6).prop_flat_map(|log_n| {
            let n = 1usize << log_n;
            (
                prop::collection::vec(-1.0f32..=1.0, n),
                prop::collection::vec(-1.0f32..=1.0, n),
            )
        })
    }

    proptest! {
        /// Property: the fast transform agrees with the direct DFT.
        #[test]
        fn prop_matches_naive_dft((re_in, im_in) in signal_strategy()) {
            let (exp_re, exp_im) = naive_dft(&re_in, &im_in, 1.0);
            let mut re = re_in.clone();
            let mut im = im_in.clone();
            fft1d_in_place(&mut re, &mut im, Direction::Forward).unwrap();

            let tol = 1e-4 * re_in.len() as f64;
            for k in 0..re.len() {
                prop_assert!((re[k] as f64 - exp_re[k]).abs() < tol);
                prop_assert!((im[k] as f64 - exp_im[k]).abs() < tol);
            }
        }

        /// Property: forward then inverse recovers n times the input.
        #[test]
        fn prop_forward_inverse_scales_by_n((re_in, im_in) in signal_strategy()) {
            let n = re_in.len() as f32;
            let mut re = re_in.clone();
            let mut im = im_in.clone();
            fft1d_in_place(&mut re, &mut im, Direction::Forward).unwrap();
            fft1d_in_place(&mut re, &mut im, Direction::Inverse).unwrap();

            for k in 0..re.len() {
                prop_assert!((re[k] / n - re_in[k]).abs() < 1e-4);
                prop_assert!((im[k] / n - im_in[k]).abs() < 1e-4);
            }
        }
    }
}
