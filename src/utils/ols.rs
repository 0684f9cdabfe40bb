//! Ordinary Least Squares (OLS) regression with a minimum-norm fallback.
//!
//! Features and target are centered, so the intercept drops out of the
//! normal equations. The centered normal matrix `X'X` is pseudo-inverted
//! through a symmetric eigendecomposition: directions whose eigenvalue is
//! numerically zero (constant or collinear columns) get no weight, which
//! yields the minimum-norm slope vector instead of a singular-matrix failure.

use crate::error::{AnalyticsError, Result};

/// Eigenvalues below `RANK_TOLERANCE * largest` are treated as zero.
const RANK_TOLERANCE: f64 = 1e-10;
const MAX_SWEEPS: usize = 64;

/// OLS regression coefficients and intercept.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    /// Regression coefficients (one per regressor column).
    pub coefficients: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
    /// Numerical rank of the centered design matrix.
    pub rank: usize,
}

/// Fit OLS regression: `y = intercept + X @ coefficients`.
///
/// # Arguments
/// * `y` - Target values (length n)
/// * `columns` - Regressor columns, each of length n
pub fn ols_fit(y: &[f64], columns: &[&[f64]]) -> Result<OlsFit> {
    let n = y.len();
    if n == 0 {
        return Err(AnalyticsError::InsufficientData { needed: 1, got: 0 });
    }

    for column in columns {
        if column.len() != n {
            return Err(AnalyticsError::Validation(format!(
                "regressor column has {} rows, target has {n}",
                column.len()
            )));
        }
    }

    if y.iter().any(|v| !v.is_finite())
        || columns.iter().any(|c| c.iter().any(|v| !v.is_finite()))
    {
        return Err(AnalyticsError::Computation(
            "non-finite value in regression input".to_string(),
        ));
    }

    let k = columns.len();
    let y_mean = y.iter().sum::<f64>() / n as f64;
    let x_means: Vec<f64> = columns
        .iter()
        .map(|c| c.iter().sum::<f64>() / n as f64)
        .collect();

    // Centered X'X and X'y
    let mut xtx = vec![vec![0.0; k]; k];
    let mut xty = vec![0.0; k];

    for obs in 0..n {
        let dy = y[obs] - y_mean;
        for i in 0..k {
            let xi = columns[i][obs] - x_means[i];
            xty[i] += xi * dy;
            for j in i..k {
                xtx[i][j] += xi * (columns[j][obs] - x_means[j]);
            }
        }
    }
    for i in 0..k {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
    }

    let (coefficients, rank) = solve_min_norm(xtx, &xty);

    let intercept = y_mean
        - coefficients
            .iter()
            .zip(x_means.iter())
            .map(|(c, m)| c * m)
            .sum::<f64>();

    if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
        return Err(AnalyticsError::Computation(
            "regression produced non-finite coefficients".to_string(),
        ));
    }

    Ok(OlsFit {
        coefficients,
        intercept,
        rank,
    })
}

/// Solve `A x = b` for symmetric positive semi-definite `A` with the
/// pseudo-inverse. Returns the solution and the numerical rank.
fn solve_min_norm(a: Vec<Vec<f64>>, b: &[f64]) -> (Vec<f64>, usize) {
    let n = b.len();
    if n == 0 {
        return (Vec::new(), 0);
    }

    let (eigenvalues, vectors) = symmetric_eigen(a);
    let largest = eigenvalues.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = largest * RANK_TOLERANCE;

    let mut x = vec![0.0; n];
    let mut rank = 0;
    for (m, &lambda) in eigenvalues.iter().enumerate() {
        if lambda <= cutoff || lambda <= f64::MIN_POSITIVE {
            continue;
        }
        rank += 1;
        let projection: f64 = (0..n).map(|i| vectors[i][m] * b[i]).sum::<f64>() / lambda;
        for i in 0..n {
            x[i] += vectors[i][m] * projection;
        }
    }

    (x, rank)
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns eigenvalues and the matrix whose columns are the matching
/// eigenvectors.
fn symmetric_eigen(mut a: Vec<Vec<f64>>) -> (Vec<f64>, Vec<Vec<f64>>) {
    let n = a.len();
    let mut v = vec![vec![0.0; n]; n];
    for (i, row) in v.iter_mut().enumerate() {
        row[i] = 1.0;
    }

    let scale: f64 = a.iter().flatten().map(|x| x * x).sum();
    if scale == 0.0 {
        return (vec![0.0; n], v);
    }

    for _ in 0..MAX_SWEEPS {
        let off: f64 = (0..n)
            .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
            .map(|(p, q)| a[p][q] * a[p][q])
            .sum();
        if off <= scale * 1e-30 {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                if a[p][q] == 0.0 {
                    continue;
                }
                let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
                let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
                let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[k][p];
                    let akq = a[k][q];
                    a[k][p] = c * akp - s * akq;
                    a[k][q] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[p][k];
                    let aqk = a[q][k];
                    a[p][k] = c * apk - s * aqk;
                    a[q][k] = s * apk + c * aqk;
                }
                for row in v.iter_mut() {
                    let vkp = row[p];
                    let vkq = row[q];
                    row[p] = c * vkp - s * vkq;
                    row[q] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = (0..n).map(|i| a[i][i]).collect();
    (eigenvalues, v)
}
