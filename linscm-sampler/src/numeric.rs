//! Numeric counterparts of the symbolic covariance.

use linscm_core::errors::{ScmError, ScmResult};
use nalgebra::{DMatrix, DVector};

/// `(I - A)^-1 diag(sigma^2) (I - A)^-T`.
pub fn numeric_cov_mat(alpha: &DMatrix<f64>, sigma_eps: &[f64]) -> ScmResult<DMatrix<f64>> {
    let dim = sigma_eps.len();
    for actual in [alpha.nrows(), alpha.ncols()] {
        if actual != dim {
            return Err(ScmError::DimensionMismatch {
                expected: dim,
                actual,
            });
        }
    }
    let one_minus_a = DMatrix::<f64>::identity(dim, dim) - alpha;
    let m = one_minus_a.try_inverse().ok_or_else(|| ScmError::SingularModel {
        reason: "I - A is not invertible".to_string(),
    })?;
    let d = DMatrix::from_diagonal(&DVector::from_iterator(dim, sigma_eps.iter().map(|s| s * s)));
    Ok(&m * d * m.transpose())
}

/// Unbiased sample covariance of the columns of `data` (one row per sample).
pub fn sample_cov_mat(data: &DMatrix<f64>) -> ScmResult<DMatrix<f64>> {
    let n = data.nrows();
    if n < 2 {
        return Err(ScmError::InvalidParameter {
            name: "data".to_string(),
            reason: format!("need at least 2 rows, got {n}"),
        });
    }
    let means = data.row_mean();
    let mut centered = data.clone();
    for mut row in centered.row_iter_mut() {
        row -= &means;
    }
    Ok(centered.transpose() * &centered / (n as f64 - 1.0))
}
