//! Dense linear system solvers.
//!
//! Gaussian elimination with partial pivoting by column absolute value,
//! implemented twice: over real and over complex entries. Both work on a
//! locally augmented copy [A | b], so the caller's matrix is never
//! mutated. A pivot whose magnitude falls below epsilon is reported as
//! [`Error::SingularMatrix`]; multipliers below epsilon skip their
//! elimination row, which is semantically a no-op.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;
use ohmic_core::EPS;

use crate::error::{Error, Result};

/// Solve a real system Ax = b.
pub fn solve_real(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    // Augmented working copy [A | b].
    let mut aug = DMatrix::from_fn(n, n + 1, |i, j| if j < n { a[(i, j)] } else { b[i] });

    for k in 0..n {
        // Partial pivot: largest |A[i][k]| for i in [k, n).
        let mut pivot_row = k;
        let mut pivot_mag = aug[(k, k)].abs();
        for i in (k + 1)..n {
            let mag = aug[(i, k)].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = i;
            }
        }
        if pivot_mag < EPS {
            return Err(Error::SingularMatrix);
        }
        if pivot_row != k {
            aug.swap_rows(k, pivot_row);
        }

        let pivot = aug[(k, k)];
        for i in (k + 1)..n {
            let factor = aug[(i, k)] / pivot;
            if factor.abs() < EPS {
                continue;
            }
            for j in k..=n {
                let sub = factor * aug[(k, j)];
                aug[(i, j)] -= sub;
            }
        }
    }

    // Back substitution.
    let mut x = DVector::zeros(n);
    for k in (0..n).rev() {
        let mut sum = aug[(k, n)];
        for j in (k + 1)..n {
            sum -= aug[(k, j)] * x[j];
        }
        x[k] = sum / aug[(k, k)];
    }

    Ok(x)
}

/// Solve a complex system Ax = b.
pub fn solve_complex(
    a: &DMatrix<Complex<f64>>,
    b: &DVector<Complex<f64>>,
) -> Result<DVector<Complex<f64>>> {
    let n = a.nrows();
    debug_assert_eq!(a.ncols(), n);
    debug_assert_eq!(b.len(), n);

    let mut aug = DMatrix::from_fn(n, n + 1, |i, j| if j < n { a[(i, j)] } else { b[i] });

    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_mag = aug[(k, k)].norm();
        for i in (k + 1)..n {
            let mag = aug[(i, k)].norm();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = i;
            }
        }
        if pivot_mag < EPS {
            return Err(Error::SingularMatrix);
        }
        if pivot_row != k {
            aug.swap_rows(k, pivot_row);
        }

        let pivot = aug[(k, k)];
        for i in (k + 1)..n {
            let factor = aug[(i, k)] / pivot;
            if factor.norm() < EPS {
                continue;
            }
            for j in k..=n {
                let sub = factor * aug[(k, j)];
                aug[(i, j)] -= sub;
            }
        }
    }

    let mut x = DVector::from_element(n, Complex::new(0.0, 0.0));
    for k in (0..n).rev() {
        let mut sum = aug[(k, n)];
        for j in (k + 1)..n {
            sum -= aug[(k, j)] * x[j];
        }
        x[k] = sum / aug[(k, k)];
    }

    Ok(x)
}
