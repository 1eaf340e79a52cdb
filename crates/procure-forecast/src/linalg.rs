//! Dense linear system solve for the model fitters' normal equations.
//!
//! Grounded directly on `gat_core::solver::backend::GaussSolver`: partial-
//! pivot Gauss-Jordan elimination over plain `Vec<Vec<f64>>`. The teacher
//! also offers a `faer`-backed solver for larger systems; the regressions
//! here never exceed a handful of lagged terms, so the dependency-light
//! elimination is the only backend this crate needs.

use anyhow::{anyhow, Result};

pub trait LinearSystemBackend: Send + Sync {
    fn solve(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>>;
}

#[derive(Debug, Clone, Default)]
pub struct GaussSolver;

impl LinearSystemBackend for GaussSolver {
    fn solve(&self, matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>> {
        let n = matrix.len();
        if n == 0 {
            return Ok(Vec::new());
        }
        if rhs.len() != n {
            return Err(anyhow!(
                "rhs length ({}) does not match matrix dimension {}",
                rhs.len(),
                n
            ));
        }
        if matrix.iter().any(|row| row.len() != n) {
            return Err(anyhow!("matrix must be square"));
        }

        let mut a = matrix.to_vec();
        let mut b = rhs.to_vec();

        for i in 0..n {
            let mut pivot = i;
            for row in i + 1..n {
                if a[row][i].abs() > a[pivot][i].abs() {
                    pivot = row;
                }
            }
            if pivot != i {
                a.swap(i, pivot);
                b.swap(i, pivot);
            }

            let diag = a[i][i];
            if diag.abs() < 1e-10 {
                return Err(anyhow!("singular matrix"));
            }

            for value in a[i][i..].iter_mut() {
                *value /= diag;
            }
            b[i] /= diag;

            let pivot_segment = a[i][i..].to_vec();
            for row in 0..n {
                if row == i {
                    continue;
                }
                let factor = a[row][i];
                for (target, &pivot) in a[row][i..].iter_mut().zip(pivot_segment.iter()) {
                    *target -= factor * pivot;
                }
                b[row] -= factor * b[i];
            }
        }

        Ok(b)
    }
}

/// Ordinary least squares for `y = X beta`, solved via the normal equations
/// `(X^T X) beta = X^T y`. `rows` is row-major: one `Vec<f64>` per
/// observation, including any intercept column the caller wants.
pub fn ols_fit(rows: &[Vec<f64>], y: &[f64]) -> Result<Vec<f64>> {
    let k = rows.first().map(|r| r.len()).unwrap_or(0);
    if k == 0 || rows.len() < k {
        return Err(anyhow!("not enough observations ({}) for {} regressors", rows.len(), k));
    }

    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];
    for (row, &target) in rows.iter().zip(y.iter()) {
        for i in 0..k {
            xty[i] += row[i] * target;
            for j in 0..k {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }

    // Ridge regularisation keeps near-collinear lag designs (common with
    // short series and high-order AR/MA candidates) from producing a
    // singular normal-equations matrix.
    for i in 0..k {
        xtx[i][i] += 1e-6;
    }

    GaussSolver.solve(&xtx, &xty)
}
