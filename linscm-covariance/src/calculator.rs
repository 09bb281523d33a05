//! Covariance of a linear SCM over its DAG arrows.

use std::sync::Arc;

use linscm_core::errors::{ScmError, ScmResult};
use linscm_core::models::{CalcStage, RenderMode};
use linscm_core::traits::ICovarianceCalculator;
use linscm_graph::Graph;
use linscm_observability::covariance_span;
use linscm_observability::tracing_setup::events;
use linscm_symbolic::generator::{gain_mat, noise_variance_mat};
use linscm_symbolic::{QuotientMatrix, SymMatrix};
use tracing::debug;

use crate::conditioning::{condition_on, ConditionalCovariance};
use crate::correlation::correlation_mat;
use crate::masking::mask_dag_gains;
use crate::presentation::{render_entries, render_quotient_entries, MatrixKind};

/// Immutable output of one covariance computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CovarianceResult {
    /// Masked same-slice gain matrix `A`.
    pub gains: SymMatrix,
    /// `(I - A)^-1`. Entry `[r, c]` is the total effect of node `c` on node
    /// `r`, so this doubles as the Jacobian.
    pub one_minus_a_inv: SymMatrix,
    /// `M D M^T` over all nodes, before any conditioning.
    pub cov_mat: SymMatrix,
    pub conditional: Option<ConditionalCovariance>,
}

/// Build the covariance of `graph`, optionally conditioned on some nodes.
pub fn compute_covariance(graph: &Graph, conditioned: &[usize]) -> ScmResult<CovarianceResult> {
    let dim = graph.num_nodes();
    let _span = covariance_span!(dim, conditioned.len()).entered();

    let gains = mask_dag_gains(graph, &gain_mat(dim));
    let one_minus_a = SymMatrix::identity(dim).sub(&gains)?;
    let one_minus_a_inv = one_minus_a.unit_lower_triangular_inverse()?;
    let cov_mat = one_minus_a_inv
        .mul(&noise_variance_mat(dim))?
        .mul(&one_minus_a_inv.transpose())?;
    debug!(dim, nonzero = cov_mat.count_nonzero(), "covariance matrix derived");

    let conditional = if conditioned.is_empty() {
        None
    } else {
        Some(condition_on(&cov_mat, conditioned)?)
    };
    events::covariance_computed(dim, cov_mat.count_nonzero(), conditional.is_some());

    Ok(CovarianceResult {
        gains,
        one_minus_a_inv,
        cov_mat,
        conditional,
    })
}

/// Computes and renders the covariance matrix of one graph.
///
/// Not thread-safe: use one instance for one computation at a time. The
/// graph itself is shared read-only.
#[derive(Debug, Clone)]
pub struct CovMatCalculator {
    graph: Arc<Graph>,
    conditioned: Vec<String>,
    conditioned_positions: Vec<usize>,
    result: Option<Arc<CovarianceResult>>,
}

impl CovMatCalculator {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self {
            graph,
            conditioned: Vec::new(),
            conditioned_positions: Vec::new(),
            result: None,
        }
    }

    /// Calculator whose covariance is conditioned on the named nodes.
    pub fn with_conditioned<I, S>(graph: Arc<Graph>, conditioned: I) -> ScmResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        let mut positions = Vec::new();
        for name in conditioned {
            let name = name.into();
            let pos = graph.require_position(&name)?;
            if !positions.contains(&pos) {
                positions.push(pos);
                names.push(name);
            }
        }
        Ok(Self {
            graph,
            conditioned: names,
            conditioned_positions: positions,
            result: None,
        })
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn conditioned(&self) -> &[String] {
        &self.conditioned
    }

    /// Compute and keep the result. Running it again recomputes the same matrices.
    pub fn calculate_cov_mat(&mut self) -> ScmResult<()> {
        let result = compute_covariance(&self.graph, &self.conditioned_positions)?;
        self.result = Some(Arc::new(result));
        debug!(stage = %CalcStage::CovarianceComputed, "calculator stage");
        Ok(())
    }

    pub fn result(&self) -> ScmResult<&Arc<CovarianceResult>> {
        self.require("result")
    }

    fn require(&self, operation: &'static str) -> ScmResult<&Arc<CovarianceResult>> {
        self.result.as_ref().ok_or_else(|| {
            events::stage_out_of_order(operation, "calculate_cov_mat");
            ScmError::UninitializedState {
                operation,
                required: "calculate_cov_mat",
            }
        })
    }

    /// Unconditioned covariance matrix.
    pub fn cov_mat(&self) -> ScmResult<&SymMatrix> {
        Ok(&self.require("cov_mat")?.cov_mat)
    }

    /// `(I - A)^-1`, kept for the feedback calculator's growth matrix.
    pub fn one_minus_a_inv(&self) -> ScmResult<&SymMatrix> {
        Ok(&self.require("one_minus_a_inv")?.one_minus_a_inv)
    }

    pub fn conditional_cov(&self) -> ScmResult<Option<&ConditionalCovariance>> {
        Ok(self.require("conditional_cov")?.conditional.as_ref())
    }

    /// Correlations of the unconditioned covariance.
    pub fn correlation_mat(&self) -> ScmResult<QuotientMatrix> {
        correlation_mat(&self.require("correlation_mat")?.cov_mat)
    }

    /// Covariance lines; the conditional covariance when nodes are conditioned.
    pub fn render_cov_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        let result = self.require("render_cov_mat_entries")?;
        match &result.conditional {
            Some(cond) => render_quotient_entries(
                &cond.cov,
                &cond.kept,
                &MatrixKind::Covariance,
                &self.graph,
                mode,
            ),
            None => render_entries(&result.cov_mat, &MatrixKind::Covariance, &self.graph, mode),
        }
    }

    pub fn render_jacobian_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        let result = self.require("render_jacobian_entries")?;
        render_entries(&result.one_minus_a_inv, &MatrixKind::Jacobian, &self.graph, mode)
    }

    pub fn render_gain_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        let result = self.require("render_gain_entries")?;
        render_entries(&result.gains, &MatrixKind::Gains, &self.graph, mode)
    }
}

impl ICovarianceCalculator for CovMatCalculator {
    fn stage(&self) -> CalcStage {
        match self.result {
            Some(_) => CalcStage::CovarianceComputed,
            None => CalcStage::Uninitialized,
        }
    }

    fn calculate_cov_mat(&mut self) -> ScmResult<()> {
        CovMatCalculator::calculate_cov_mat(self)
    }

    fn render_cov_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        CovMatCalculator::render_cov_mat_entries(self, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Arc<Graph> {
        Arc::new(Graph::from_dot("digraph G {\na->b;\n}").unwrap())
    }

    #[test]
    fn starts_uninitialized() {
        let calc = CovMatCalculator::new(chain());
        assert_eq!(calc.stage(), CalcStage::Uninitialized);
        assert!(matches!(
            calc.cov_mat(),
            Err(ScmError::UninitializedState { .. })
        ));
    }

    #[test]
    fn unknown_conditioned_node_is_rejected() {
        let err = CovMatCalculator::with_conditioned(chain(), ["zz"]).unwrap_err();
        assert!(matches!(err, ScmError::GraphError(_)));
    }

    #[test]
    fn duplicate_conditioned_names_collapse() {
        let calc = CovMatCalculator::with_conditioned(chain(), ["a", "a"]).unwrap();
        assert_eq!(calc.conditioned(), ["a"]);
    }

    #[test]
    fn gains_render_after_compute() {
        let mut calc = CovMatCalculator::new(chain());
        calc.calculate_cov_mat().unwrap();
        assert_eq!(
            calc.render_gain_entries(RenderMode::Plain).unwrap(),
            vec!["gains[1:b, 0:a]=alp_1_L_0"]
        );
    }
}
