//! Conditional covariance by Schur complement.
//!
//! Conditioning on node `z` replaces `Cov` with
//! `Cov[i,j] - Cov[i,z] Cov[z,j] / Cov[z,z]`. Conditioned nodes are
//! eliminated one at a time in node order with fraction-free (Bareiss)
//! steps, dividing each step by the previous pivot:
//!
//! ```text
//! N'[i,j] = (N[i,j] N[z,z] - N[i,z] N[z,j]) / p
//! ```
//!
//! The division is exact, so every entry stays a minor of `Cov`. After the
//! last step the conditional covariance is `N[i,j] / p` with the final
//! pivot `p = det Cov[Z,Z]`. Each kept entry is then reduced on its own
//! once the conditioned rows and columns are dropped.

use linscm_core::errors::{ScmError, ScmResult};
use linscm_symbolic::{Polynomial, QuotientMatrix, SymMatrix};
use tracing::debug;

/// Covariance of the unconditioned nodes given the conditioned ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalCovariance {
    /// Graph positions conditioned on, ascending.
    pub conditioned: Vec<usize>,
    /// Graph positions of the result's rows and columns, ascending.
    pub kept: Vec<usize>,
    pub cov: QuotientMatrix,
}

/// Condition `cov` on the nodes at `conditioned` (graph positions).
pub fn condition_on(cov: &SymMatrix, conditioned: &[usize]) -> ScmResult<ConditionalCovariance> {
    let dim = cov.dim();
    let mut conditioned: Vec<usize> = conditioned.to_vec();
    conditioned.sort_unstable();
    conditioned.dedup();
    if let Some(&bad) = conditioned.iter().find(|&&z| z >= dim) {
        return Err(ScmError::DimensionMismatch {
            expected: dim,
            actual: bad + 1,
        });
    }

    let mut num = cov.clone();
    let mut prev_pivot = Polynomial::one();
    let mut eliminated = vec![false; dim];
    for &z in &conditioned {
        let pivot = num[(z, z)].clone();
        if pivot.is_zero() {
            return Err(ScmError::SingularModel {
                reason: format!("conditioned node at position {z} has zero variance"),
            });
        }
        eliminated[z] = true;
        num = bareiss_step(&num, z, &pivot, &prev_pivot, &eliminated)?;
        debug!(position = z, pivot_terms = pivot.num_terms(), "eliminated conditioned node");
        prev_pivot = pivot;
    }

    let kept: Vec<usize> = (0..dim).filter(|&p| !eliminated[p]).collect();
    let cov = QuotientMatrix::with_common_denominator(num.submatrix(&kept), prev_pivot)?;
    Ok(ConditionalCovariance {
        conditioned,
        kept,
        cov: cov.reduced()?,
    })
}

/// One elimination on pivot `(z, z)`. Rows and columns already eliminated
/// are zero afterwards; only the upper triangle is computed.
fn bareiss_step(
    num: &SymMatrix,
    z: usize,
    pivot: &Polynomial,
    prev_pivot: &Polynomial,
    eliminated: &[bool],
) -> ScmResult<SymMatrix> {
    let dim = num.dim();
    let mut next = SymMatrix::zeros(dim);
    for i in (0..dim).filter(|&i| !eliminated[i]) {
        for j in (i..dim).filter(|&j| !eliminated[j]) {
            let cross = num[(i, z)].checked_mul(&num[(z, j)])?;
            let full = num[(i, j)].checked_mul(pivot)?.checked_sub(&cross)?;
            let entry = full.exact_div(prev_pivot)?.ok_or_else(|| ScmError::SingularModel {
                reason: format!("elimination on position {z} left a non-polynomial entry"),
            })?;
            next.set(j, i, entry.clone());
            next.set(i, j, entry);
        }
    }
    Ok(next)
}
