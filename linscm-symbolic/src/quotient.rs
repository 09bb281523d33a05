//! Matrices of polynomial fractions.
//!
//! Conditioning divides by covariance entries, which leaves the polynomial
//! ring. Rather than introduce rational functions everywhere, the result is
//! kept as numerator and denominator matrices of polynomials.

use std::collections::HashMap;

use linscm_core::errors::{ScmError, ScmResult};

use crate::matrix::SymMatrix;
use crate::poly::Polynomial;
use crate::symbol::Symbol;

/// Entry `(r, c)` is `numerators[(r, c)] / denominators[(r, c)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotientMatrix {
    numerators: SymMatrix,
    denominators: SymMatrix,
}

impl QuotientMatrix {
    pub fn new(numerators: SymMatrix, denominators: SymMatrix) -> ScmResult<Self> {
        if numerators.dim() != denominators.dim() {
            return Err(ScmError::DimensionMismatch {
                expected: numerators.dim(),
                actual: denominators.dim(),
            });
        }
        if let Some((r, c, _)) = denominators.iter().find(|(_, _, d)| d.is_zero()) {
            return Err(ScmError::SingularModel {
                reason: format!("zero denominator at ({r}, {c})"),
            });
        }
        Ok(Self {
            numerators,
            denominators,
        })
    }

    /// Every entry shares `denominator`.
    pub fn with_common_denominator(
        numerators: SymMatrix,
        denominator: Polynomial,
    ) -> ScmResult<Self> {
        let dim = numerators.dim();
        Self::new(numerators, SymMatrix::from_fn(dim, |_, _| denominator.clone()))
    }

    /// A plain polynomial matrix, all denominators one.
    pub fn from_polynomials(matrix: SymMatrix) -> Self {
        let dim = matrix.dim();
        Self {
            numerators: matrix,
            denominators: SymMatrix::from_fn(dim, |_, _| Polynomial::one()),
        }
    }

    pub fn dim(&self) -> usize {
        self.numerators.dim()
    }

    pub fn numerators(&self) -> &SymMatrix {
        &self.numerators
    }

    pub fn denominators(&self) -> &SymMatrix {
        &self.denominators
    }

    pub fn numerator(&self, row: usize, col: usize) -> Option<&Polynomial> {
        self.numerators.get(row, col)
    }

    pub fn denominator(&self, row: usize, col: usize) -> Option<&Polynomial> {
        self.denominators.get(row, col)
    }

    pub fn is_symmetric(&self) -> bool {
        self.numerators.is_symmetric() && self.denominators.is_symmetric()
    }

    pub fn substitute_all(&self, bindings: &HashMap<Symbol, Polynomial>) -> ScmResult<Self> {
        Self::new(
            self.numerators.substitute_all(bindings)?,
            self.denominators.substitute_all(bindings)?,
        )
    }

    /// Apply [`reduce_fraction`] to every entry.
    pub fn reduced(&self) -> ScmResult<Self> {
        let dim = self.dim();
        let mut numerators = SymMatrix::zeros(dim);
        let mut denominators = SymMatrix::zeros(dim);
        for r in 0..dim {
            for c in 0..dim {
                let (num, den) =
                    reduce_fraction(&self.numerators[(r, c)], &self.denominators[(r, c)])?;
                numerators.set(r, c, num);
                denominators.set(r, c, den);
            }
        }
        Self::new(numerators, denominators)
    }

    /// Row-major numeric values.
    pub fn evaluate(&self, values: &HashMap<Symbol, f64>) -> ScmResult<Vec<f64>> {
        let num = self.numerators.evaluate(values)?;
        let den = self.denominators.evaluate(values)?;
        Ok(num.into_iter().zip(den).map(|(n, d)| n / d).collect())
    }
}

/// Cancel what can be cancelled without a polynomial gcd.
///
/// A denominator that divides the numerator exactly disappears; otherwise
/// the common monomial factor and integer content are divided out of both.
pub fn reduce_fraction(num: &Polynomial, den: &Polynomial) -> ScmResult<(Polynomial, Polynomial)> {
    if num.is_zero() {
        return Ok((Polynomial::zero(), Polynomial::one()));
    }
    if let Some(quotient) = num.exact_div(den)? {
        return Ok((quotient, Polynomial::one()));
    }
    let common = num.common_content(den);
    if common.is_one() || common.is_zero() {
        return Ok((num.clone(), den.clone()));
    }
    match (num.exact_div(&common)?, den.exact_div(&common)?) {
        (Some(n), Some(d)) => Ok((n, d)),
        _ => Ok((num.clone(), den.clone())),
    }
}
