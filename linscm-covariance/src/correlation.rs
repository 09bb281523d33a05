//! Correlation matrix from a covariance matrix.

use std::collections::HashMap;

use linscm_core::errors::ScmResult;
use linscm_symbolic::{Polynomial, QuotientMatrix, SymMatrix, Symbol};

/// `rho[r,c] = cov[r,c] / (sigma_r sigma_c)`, with ones on the diagonal.
///
/// The node sigmas stay symbolic; bind them with [`node_sigma_bindings`]
/// to evaluate.
pub fn correlation_mat(cov: &SymMatrix) -> ScmResult<QuotientMatrix> {
    let dim = cov.dim();
    let num = cov.map(|r, c, p| if r == c { Polynomial::one() } else { p.clone() });
    let den = SymMatrix::try_from_fn(dim, |r, c| {
        if r == c {
            return Ok(Polynomial::one());
        }
        Polynomial::symbol(Symbol::node_sigma(r))
            .checked_mul(&Polynomial::symbol(Symbol::node_sigma(c)))
    })?;
    QuotientMatrix::new(num, den)
}

/// `sigma_i = sqrt(cov[i,i])` for a numeric covariance matrix, row-major.
pub fn node_sigma_bindings(cov_values: &[f64], dim: usize) -> HashMap<Symbol, f64> {
    (0..dim)
        .filter_map(|i| {
            let var = *cov_values.get(i * dim + i)?;
            Some((Symbol::node_sigma(i), var.sqrt()))
        })
        .collect()
}
