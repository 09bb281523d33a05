//! Numeric substitution into symbolic matrices.

use std::collections::HashMap;

use linscm_core::errors::{ScmError, ScmResult};
use linscm_graph::Graph;
use linscm_symbolic::{Polynomial, SymMatrix, Symbol};
use nalgebra::DMatrix;

use crate::masking::{dag_keeps, fback_keeps};

/// Replace every noise sigma by 1.
pub fn set_to_one_sigma_eps(graph: &Graph, matrix: &SymMatrix) -> ScmResult<SymMatrix> {
    let bindings: HashMap<Symbol, Polynomial> = (0..graph.num_nodes())
        .map(|i| (Symbol::noise_sigma(i), Polynomial::one()))
        .collect();
    matrix.substitute_all(&bindings)
}

/// Replace `alp_r_L_c` by 0 for every `r > c` with no arrow `node(c) -> node(r)`.
pub fn set_to_zero_gains_without_arrows(
    graph: &Graph,
    matrix: &SymMatrix,
) -> ScmResult<SymMatrix> {
    let n = graph.num_nodes();
    let bindings: HashMap<Symbol, Polynomial> = (0..n)
        .flat_map(|r| (0..r).map(move |c| (r, c)))
        .filter(|&(r, c)| !dag_keeps(graph, r, c))
        .map(|(r, c)| (Symbol::gain(r, c), Polynomial::zero()))
        .collect();
    matrix.substitute_all(&bindings)
}

/// Replace `beta_r_L_c` by 0 wherever there is no feedback arrow `node(c) -> node(r)`.
pub fn set_to_zero_fback_gains_without_arrows(
    graph: &Graph,
    matrix: &SymMatrix,
) -> ScmResult<SymMatrix> {
    let n = graph.num_nodes();
    let bindings: HashMap<Symbol, Polynomial> = (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .filter(|&(r, c)| !fback_keeps(graph, r, c))
        .map(|(r, c)| (Symbol::fback_gain(r, c), Polynomial::zero()))
        .collect();
    matrix.substitute_all(&bindings)
}

/// Numeric values for the symbols of a `dim`-node model.
#[derive(Debug, Clone, Default)]
pub struct NumericBindings {
    dim: usize,
    values: HashMap<Symbol, f64>,
}

impl NumericBindings {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            values: HashMap::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn values(&self) -> &HashMap<Symbol, f64> {
        &self.values
    }

    pub fn bind(mut self, symbol: Symbol, value: f64) -> Self {
        self.values.insert(symbol, value);
        self
    }

    fn check_shape(&self, rows: usize, cols: usize) -> ScmResult<()> {
        for actual in [rows, cols] {
            if actual != self.dim {
                return Err(ScmError::DimensionMismatch {
                    expected: self.dim,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Bind `alp_r_L_c = gains[(r, c)]` below the diagonal.
    pub fn with_gains(mut self, gains: &DMatrix<f64>) -> ScmResult<Self> {
        self.check_shape(gains.nrows(), gains.ncols())?;
        for r in 0..self.dim {
            for c in 0..r {
                self.values.insert(Symbol::gain(r, c), gains[(r, c)]);
            }
        }
        Ok(self)
    }

    /// Bind every `beta_r_L_c = fback_gains[(r, c)]`.
    pub fn with_fback_gains(mut self, fback_gains: &DMatrix<f64>) -> ScmResult<Self> {
        self.check_shape(fback_gains.nrows(), fback_gains.ncols())?;
        for r in 0..self.dim {
            for c in 0..self.dim {
                self.values.insert(Symbol::fback_gain(r, c), fback_gains[(r, c)]);
            }
        }
        Ok(self)
    }

    pub fn with_noise_sigmas(mut self, sigmas: &[f64]) -> ScmResult<Self> {
        if sigmas.len() != self.dim {
            return Err(ScmError::DimensionMismatch {
                expected: self.dim,
                actual: sigmas.len(),
            });
        }
        for (i, &sigma) in sigmas.iter().enumerate() {
            self.values.insert(Symbol::noise_sigma(i), sigma);
        }
        Ok(self)
    }
}

/// Evaluate every entry. All symbols must be bound.
pub fn evaluate_matrix(matrix: &SymMatrix, bindings: &NumericBindings) -> ScmResult<DMatrix<f64>> {
    if matrix.dim() != bindings.dim() {
        return Err(ScmError::DimensionMismatch {
            expected: bindings.dim(),
            actual: matrix.dim(),
        });
    }
    let values = matrix.evaluate(bindings.values())?;
    Ok(DMatrix::from_row_slice(matrix.dim(), matrix.dim(), &values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use linscm_symbolic::generator::{fback_gain_mat, gain_mat, noise_variance_mat};

    fn four_node() -> Graph {
        Graph::from_dot("digraph G {\na->b;\na->s;\nn->s,a,b;\n}").unwrap()
    }

    #[test]
    fn unit_sigmas_turn_noise_variance_into_identity() {
        let g = four_node();
        let m = set_to_one_sigma_eps(&g, &noise_variance_mat(4)).unwrap();
        assert_eq!(m, SymMatrix::identity(4));
    }

    #[test]
    fn missing_arrow_gain_becomes_zero() {
        let g = four_node();
        let m = set_to_zero_gains_without_arrows(&g, &gain_mat(4)).unwrap();
        assert!(m[(3, 2)].is_zero());
        assert_eq!(m[(3, 1)], Polynomial::from(Symbol::gain(3, 1)));
        // Upper triangle is untouched by substitution.
        assert_eq!(m[(0, 3)], Polynomial::from(Symbol::gain(0, 3)));
    }

    #[test]
    fn missing_feedback_arrow_gain_becomes_zero() {
        let g = Graph::from_dot("digraph G {\na->b;\nb->c;\nc->a [color=green];\n}").unwrap();
        let m = set_to_zero_fback_gains_without_arrows(&g, &fback_gain_mat(3)).unwrap();
        assert_eq!(m.count_nonzero(), 1);
        assert_eq!(m[(0, 2)], Polynomial::from(Symbol::fback_gain(0, 2)));
        assert!(m[(2, 0)].is_zero());
        assert!(m[(1, 1)].is_zero());
    }

    #[test]
    fn feedback_substitution_leaves_dag_gains_alone() {
        let g = Graph::from_dot("digraph G {\na->b;\nb->a [color=green];\n}").unwrap();
        let m = set_to_zero_fback_gains_without_arrows(&g, &gain_mat(2)).unwrap();
        assert_eq!(m, gain_mat(2));
    }

    #[test]
    fn wrong_shape_is_dimension_mismatch() {
        let err = NumericBindings::new(3).with_gains(&DMatrix::zeros(2, 2)).unwrap_err();
        assert!(matches!(err, ScmError::DimensionMismatch { expected: 3, actual: 2 }));
        assert!(NumericBindings::new(2).with_noise_sigmas(&[1.0]).is_err());
        assert!(evaluate_matrix(&SymMatrix::identity(2), &NumericBindings::new(3)).is_err());
    }

    #[test]
    fn evaluates_bound_matrix() {
        let bindings = NumericBindings::new(2).with_noise_sigmas(&[2.0, 0.5]).unwrap();
        let m = evaluate_matrix(&noise_variance_mat(2), &bindings).unwrap();
        assert_eq!(m[(0, 0)], 4.0);
        assert_eq!(m[(1, 1)], 0.25);
        assert_eq!(m[(0, 1)], 0.0);
    }
}
