//! Feedback models: covariance of one slice plus the growth matrix that
//! carries one slice into the next.

use std::sync::Arc;

use linscm_core::constants::GROWTH_MATRIX_NAME;
use linscm_core::errors::{ScmError, ScmResult};
use linscm_core::models::{CalcStage, RenderMode};
use linscm_core::traits::{ICovarianceCalculator, IGrowthCalculator};
use linscm_graph::Graph;
use linscm_observability::growth_span;
use linscm_observability::tracing_setup::events;
use linscm_symbolic::generator::fback_gain_mat;
use linscm_symbolic::SymMatrix;
use tracing::debug;

use crate::calculator::{CovMatCalculator, CovarianceResult};
use crate::masking::mask_fback_gains;
use crate::presentation::{render_entries, MatrixKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthResult {
    /// Masked cross-slice gain matrix `B`.
    pub fback_gains: SymMatrix,
    /// `(I - A)^-1 B`.
    pub growth_mat: SymMatrix,
}

/// Growth matrix of `graph` from an already computed covariance result.
pub fn compute_growth_matrix(graph: &Graph, cov: &CovarianceResult) -> ScmResult<GrowthResult> {
    let dim = graph.num_nodes();
    if cov.one_minus_a_inv.dim() != dim {
        return Err(ScmError::DimensionMismatch {
            expected: dim,
            actual: cov.one_minus_a_inv.dim(),
        });
    }
    let _span = growth_span!(dim, graph.fback_arrows().len()).entered();

    let fback_gains = mask_fback_gains(graph, &fback_gain_mat(dim));
    let growth_mat = cov.one_minus_a_inv.mul(&fback_gains)?;
    events::growth_computed(dim, growth_mat.count_nonzero());
    Ok(GrowthResult {
        fback_gains,
        growth_mat,
    })
}

/// Covariance calculator for graphs with feedback arrows.
///
/// Wraps a [`CovMatCalculator`] and adds the growth step. Stages advance
/// `Uninitialized -> CovarianceComputed -> GrowthComputed`; each step
/// refuses to run before the previous one.
#[derive(Debug, Clone)]
pub struct FBackCovMatCalculator {
    base: CovMatCalculator,
    growth: Option<Arc<GrowthResult>>,
}

impl FBackCovMatCalculator {
    pub fn new(graph: Arc<Graph>) -> Self {
        Self {
            base: CovMatCalculator::new(graph),
            growth: None,
        }
    }

    pub fn with_conditioned<I, S>(graph: Arc<Graph>, conditioned: I) -> ScmResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            base: CovMatCalculator::with_conditioned(graph, conditioned)?,
            growth: None,
        })
    }

    pub fn base(&self) -> &CovMatCalculator {
        &self.base
    }

    pub fn graph(&self) -> &Arc<Graph> {
        self.base.graph()
    }

    pub fn stage(&self) -> CalcStage {
        if self.growth.is_some() {
            CalcStage::GrowthComputed
        } else {
            self.base.stage()
        }
    }

    /// Recompute the covariance. Any earlier growth matrix is dropped.
    pub fn calculate_cov_mat(&mut self) -> ScmResult<()> {
        self.growth = None;
        self.base.calculate_cov_mat()
    }

    pub fn calculate_growth_mat(&mut self) -> ScmResult<()> {
        if !self.base.stage().has_covariance() {
            events::stage_out_of_order("calculate_growth_mat", "calculate_cov_mat");
            return Err(ScmError::UninitializedState {
                operation: "calculate_growth_mat",
                required: "calculate_cov_mat",
            });
        }
        let cov = Arc::clone(self.base.result()?);
        let growth = compute_growth_matrix(self.base.graph(), &cov)?;
        self.growth = Some(Arc::new(growth));
        debug!(stage = %CalcStage::GrowthComputed, "calculator stage");
        Ok(())
    }

    /// Covariance and growth matrix in one call.
    pub fn calculate_cov_mat_sb(&mut self) -> ScmResult<()> {
        self.calculate_cov_mat()?;
        self.calculate_growth_mat()
    }

    fn require_growth(&self, operation: &'static str) -> ScmResult<&Arc<GrowthResult>> {
        self.growth.as_ref().ok_or_else(|| {
            events::stage_out_of_order(operation, "calculate_growth_mat");
            ScmError::UninitializedState {
                operation,
                required: "calculate_growth_mat",
            }
        })
    }

    pub fn growth_result(&self) -> ScmResult<&Arc<GrowthResult>> {
        self.require_growth("growth_result")
    }

    pub fn growth_mat(&self) -> ScmResult<&SymMatrix> {
        Ok(&self.require_growth("growth_mat")?.growth_mat)
    }

    /// Covariance of the first slice.
    pub fn render_initial_cov_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        self.base.render_cov_mat_entries(mode)
    }

    pub fn render_growth_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        let growth = self.require_growth("render_growth_mat_entries")?;
        render_entries(
            &growth.growth_mat,
            &MatrixKind::Named(GROWTH_MATRIX_NAME.to_string()),
            self.base.graph(),
            mode,
        )
    }
}

impl ICovarianceCalculator for FBackCovMatCalculator {
    fn stage(&self) -> CalcStage {
        FBackCovMatCalculator::stage(self)
    }

    fn calculate_cov_mat(&mut self) -> ScmResult<()> {
        FBackCovMatCalculator::calculate_cov_mat(self)
    }

    fn render_cov_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        self.render_initial_cov_mat_entries(mode)
    }
}

impl IGrowthCalculator for FBackCovMatCalculator {
    fn calculate_growth_mat(&mut self) -> ScmResult<()> {
        FBackCovMatCalculator::calculate_growth_mat(self)
    }

    fn render_growth_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>> {
        FBackCovMatCalculator::render_growth_mat_entries(self, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fback_pair() -> Arc<Graph> {
        Arc::new(Graph::from_dot("digraph G {\na->b [color=green];\n}").unwrap())
    }

    #[test]
    fn growth_before_covariance_fails_fast() {
        let mut calc = FBackCovMatCalculator::new(fback_pair());
        let err = calc.calculate_growth_mat().unwrap_err();
        assert!(matches!(
            err,
            ScmError::UninitializedState {
                operation: "calculate_growth_mat",
                required: "calculate_cov_mat"
            }
        ));
        assert_eq!(calc.stage(), CalcStage::Uninitialized);
    }

    #[test]
    fn rendering_growth_needs_growth_stage() {
        let mut calc = FBackCovMatCalculator::new(fback_pair());
        calc.calculate_cov_mat().unwrap();
        assert!(matches!(
            calc.render_growth_mat_entries(RenderMode::Plain),
            Err(ScmError::UninitializedState { .. })
        ));
    }

    #[test]
    fn stages_advance_in_order() {
        let mut calc = FBackCovMatCalculator::new(fback_pair());
        calc.calculate_cov_mat().unwrap();
        assert_eq!(calc.stage(), CalcStage::CovarianceComputed);
        calc.calculate_growth_mat().unwrap();
        assert_eq!(calc.stage(), CalcStage::GrowthComputed);
        calc.calculate_cov_mat().unwrap();
        assert_eq!(calc.stage(), CalcStage::CovarianceComputed);
    }
}
