//! Square matrices of polynomials.

use std::collections::HashMap;
use std::ops::Index;

use linscm_core::errors::{ScmError, ScmResult};

use crate::poly::Polynomial;
use crate::symbol::Symbol;

/// A dense `dim x dim` matrix of polynomials, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymMatrix {
    dim: usize,
    entries: Vec<Polynomial>,
}

impl SymMatrix {
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: vec![Polynomial::zero(); dim * dim],
        }
    }

    pub fn identity(dim: usize) -> Self {
        Self::from_fn(dim, |r, c| {
            if r == c {
                Polynomial::one()
            } else {
                Polynomial::zero()
            }
        })
    }

    pub fn from_fn(dim: usize, mut f: impl FnMut(usize, usize) -> Polynomial) -> Self {
        let mut entries = Vec::with_capacity(dim * dim);
        for r in 0..dim {
            for c in 0..dim {
                entries.push(f(r, c));
            }
        }
        Self { dim, entries }
    }

    /// Like [`SymMatrix::from_fn`], stopping at the first failing entry.
    pub fn try_from_fn(
        dim: usize,
        mut f: impl FnMut(usize, usize) -> ScmResult<Polynomial>,
    ) -> ScmResult<Self> {
        let mut entries = Vec::with_capacity(dim * dim);
        for r in 0..dim {
            for c in 0..dim {
                entries.push(f(r, c)?);
            }
        }
        Ok(Self { dim, entries })
    }

    pub fn diagonal(values: Vec<Polynomial>) -> Self {
        let dim = values.len();
        let mut m = Self::zeros(dim);
        for (i, v) in values.into_iter().enumerate() {
            m.set(i, i, v);
        }
        m
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Polynomial> {
        if row < self.dim && col < self.dim {
            self.entries.get(row * self.dim + col)
        } else {
            None
        }
    }

    /// # Panics
    /// If `row` or `col` is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Polynomial) {
        assert!(row < self.dim && col < self.dim, "({row}, {col}) outside {0}x{0}", self.dim);
        self.entries[row * self.dim + col] = value;
    }

    /// Entries as `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Polynomial)> {
        let dim = self.dim;
        self.entries
            .iter()
            .enumerate()
            .map(move |(i, p)| (i / dim, i % dim, p))
    }

    pub fn transpose(&self) -> SymMatrix {
        SymMatrix::from_fn(self.dim, |r, c| self[(c, r)].clone())
    }

    fn check_dim(&self, other: &SymMatrix) -> ScmResult<()> {
        if self.dim != other.dim {
            return Err(ScmError::DimensionMismatch {
                expected: self.dim,
                actual: other.dim,
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &SymMatrix) -> ScmResult<SymMatrix> {
        self.check_dim(other)?;
        SymMatrix::try_from_fn(self.dim, |r, c| self[(r, c)].checked_add(&other[(r, c)]))
    }

    pub fn sub(&self, other: &SymMatrix) -> ScmResult<SymMatrix> {
        self.check_dim(other)?;
        SymMatrix::try_from_fn(self.dim, |r, c| self[(r, c)].checked_sub(&other[(r, c)]))
    }

    pub fn mul(&self, other: &SymMatrix) -> ScmResult<SymMatrix> {
        self.check_dim(other)?;
        SymMatrix::try_from_fn(self.dim, |r, c| {
            let mut acc = Polynomial::zero();
            for k in 0..self.dim {
                let (a, b) = (&self[(r, k)], &other[(k, c)]);
                if !a.is_zero() && !b.is_zero() {
                    acc = acc.checked_add(&a.checked_mul(b)?)?;
                }
            }
            Ok(acc)
        })
    }

    pub fn map(&self, mut f: impl FnMut(usize, usize, &Polynomial) -> Polynomial) -> SymMatrix {
        SymMatrix::from_fn(self.dim, |r, c| f(r, c, &self[(r, c)]))
    }

    pub fn substitute_all(&self, bindings: &HashMap<Symbol, Polynomial>) -> ScmResult<SymMatrix> {
        SymMatrix::try_from_fn(self.dim, |r, c| self[(r, c)].substitute_all(bindings))
    }

    pub fn evaluate(&self, values: &HashMap<Symbol, f64>) -> ScmResult<Vec<f64>> {
        self.entries.iter().map(|p| p.evaluate(values)).collect()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(Polynomial::is_zero)
    }

    pub fn count_nonzero(&self) -> usize {
        self.entries.iter().filter(|p| !p.is_zero()).count()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.dim).all(|r| (0..r).all(|c| self[(r, c)] == self[(c, r)]))
    }

    /// Zero on and above the diagonal.
    pub fn is_strictly_lower_triangular(&self) -> bool {
        self.iter().all(|(r, c, p)| c < r || p.is_zero())
    }

    /// Keep only the listed rows and columns, in the given order.
    pub fn submatrix(&self, keep: &[usize]) -> SymMatrix {
        SymMatrix::from_fn(keep.len(), |r, c| self[(keep[r], keep[c])].clone())
    }

    /// Inverse of a unit lower-triangular matrix by forward substitution.
    ///
    /// Stays within polynomials because no division is needed. Any other
    /// shape is refused with [`ScmError::SingularModel`].
    pub fn unit_lower_triangular_inverse(&self) -> ScmResult<SymMatrix> {
        for (r, c, p) in self.iter() {
            let ok = match r.cmp(&c) {
                std::cmp::Ordering::Equal => p.is_one(),
                std::cmp::Ordering::Less => p.is_zero(),
                std::cmp::Ordering::Greater => true,
            };
            if !ok {
                return Err(ScmError::SingularModel {
                    reason: format!("entry ({r}, {c}) = {p} is not unit lower-triangular"),
                });
            }
        }

        let n = self.dim;
        let mut inv = SymMatrix::zeros(n);
        for r in 0..n {
            for c in 0..=r {
                let mut value = if r == c {
                    Polynomial::one()
                } else {
                    Polynomial::zero()
                };
                for k in c..r {
                    let (l, m) = (&self[(r, k)], &inv[(k, c)]);
                    if !l.is_zero() && !m.is_zero() {
                        value = value.checked_sub(&l.checked_mul(m)?)?;
                    }
                }
                inv.set(r, c, value);
            }
        }
        Ok(inv)
    }
}

impl Index<(usize, usize)> for SymMatrix {
    type Output = Polynomial;

    fn index(&self, (row, col): (usize, usize)) -> &Polynomial {
        &self.entries[row * self.dim + col]
    }
}
