//! Dense matrix inversion for the kriging systems.
//!
//! Symmetric systems are first inverted through a Cholesky factorization; matrices that
//! are not positive definite fall back to Gauss-Jordan elimination with full pivoting.
//! The caller learns which solver produced the inverse.

use ndarray::Array2;
use serde::Serialize;
use tracing::debug;

use crate::error::{InterpError, Result};

/// Which routine produced an inverse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    Cholesky,
    GaussJordan,
}

/// An inverted matrix and the solver that produced it
#[derive(Debug, Clone)]
pub struct Inverse {
    pub matrix: Array2<f64>,
    pub solver: Solver,
}

/// Lower-triangular factor `L` with `A = L·Lᵀ`, or `None` when a pivot is not positive
pub fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        let mut diag = a[[i, i]];
        for k in 0..i {
            diag -= l[[i, k]] * l[[i, k]];
        }
        if !diag.is_finite() || diag <= 0.0 {
            return None;
        }
        let d = diag.sqrt();
        l[[i, i]] = d;

        for j in (i + 1)..n {
            let mut s = a[[j, i]];
            for k in 0..i {
                s -= l[[j, k]] * l[[i, k]];
            }
            l[[j, i]] = s / d;
        }
    }

    Some(l)
}

/// Inverse of `L·Lᵀ` from its Cholesky factor
pub fn cholesky_inverse(l: &Array2<f64>) -> Array2<f64> {
    let n = l.nrows();

    // L⁻¹ by forward substitution
    let mut inv_l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        inv_l[[i, i]] = 1.0 / l[[i, i]];
        for j in (i + 1)..n {
            let mut sum = 0.0;
            for k in i..j {
                sum -= l[[j, k]] * inv_l[[k, i]];
            }
            inv_l[[j, i]] = sum / l[[j, j]];
        }
    }

    // A⁻¹ = L⁻ᵀ · L⁻¹
    inv_l.t().dot(&inv_l)
}

/// Gauss-Jordan inversion with full pivoting, `None` on a zero pivot
pub fn gauss_jordan_inverse(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut x = a.clone();
    let mut pivoted = vec![false; n];
    let mut index_row = vec![0usize; n];
    let mut index_col = vec![0usize; n];

    for i in 0..n {
        let mut big = 0.0;
        let (mut irow, mut icol) = (0, 0);
        for j in 0..n {
            if pivoted[j] {
                continue;
            }
            for k in 0..n {
                if !pivoted[k] && x[[j, k]].abs() >= big {
                    big = x[[j, k]].abs();
                    irow = j;
                    icol = k;
                }
            }
        }
        pivoted[icol] = true;

        if irow != icol {
            for l in 0..n {
                x.swap([irow, l], [icol, l]);
            }
        }
        index_row[i] = irow;
        index_col[i] = icol;

        let pivot = x[[icol, icol]];
        if pivot == 0.0 || !pivot.is_finite() {
            return None;
        }

        let pivot_inv = 1.0 / pivot;
        x[[icol, icol]] = 1.0;
        for l in 0..n {
            x[[icol, l]] *= pivot_inv;
        }

        for ll in 0..n {
            if ll == icol {
                continue;
            }
            let dum = x[[ll, icol]];
            x[[ll, icol]] = 0.0;
            for l in 0..n {
                x[[ll, l]] -= x[[icol, l]] * dum;
            }
        }
    }

    // Undo the column permutation
    for l in (0..n).rev() {
        if index_row[l] != index_col[l] {
            for k in 0..n {
                x.swap([k, index_row[l]], [k, index_col[l]]);
            }
        }
    }

    Some(x)
}

/// Invert a square matrix, preferring Cholesky.
pub fn invert(a: &Array2<f64>) -> Result<Inverse> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(InterpError::InvalidParameter {
            param: "matrix".to_string(),
            message: format!("expected a square matrix, got {}x{}", n, a.ncols()),
        });
    }

    if let Some(l) = cholesky(a) {
        return Ok(Inverse {
            matrix: cholesky_inverse(&l),
            solver: Solver::Cholesky,
        });
    }

    debug!(size = n, "Matrix is not positive definite, falling back to Gauss-Jordan");
    gauss_jordan_inverse(a)
        .map(|matrix| Inverse {
            matrix,
            solver: Solver::GaussJordan,
        })
        .ok_or(InterpError::SingularMatrix { size: n })
}
