//! Complex-arithmetic helpers for phasor assembly.
//!
//! `Complex<f64>` supplies field arithmetic and a hypot-based magnitude;
//! this module adds degree-based polar construction and division guarded
//! against near-zero denominators.

use num_complex::Complex;

use crate::error::{Error, Result};

/// Shared numerical floor for pivots, denominators, and waveform slopes.
pub const EPS: f64 = 1e-15;

/// Construct a phasor from magnitude and phase in degrees.
pub fn from_polar_deg(mag: f64, phase_deg: f64) -> Complex<f64> {
    let phase = phase_deg.to_radians();
    Complex::new(mag * phase.cos(), mag * phase.sin())
}

/// Reciprocal of a complex value.
///
/// Fails with [`Error::ArithmeticDegenerate`] when `|z|^2 < EPS`.
pub fn checked_recip(z: Complex<f64>) -> Result<Complex<f64>> {
    if z.norm_sqr() < EPS {
        return Err(Error::ArithmeticDegenerate);
    }
    Ok(z.finv())
}

/// Division `a / b` with the same degeneracy guard as [`checked_recip`].
pub fn checked_div(a: Complex<f64>, b: Complex<f64>) -> Result<Complex<f64>> {
    if b.norm_sqr() < EPS {
        return Err(Error::ArithmeticDegenerate);
    }
    Ok(a / b)
}
