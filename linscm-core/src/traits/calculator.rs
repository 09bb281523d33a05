use crate::errors::ScmResult;
use crate::models::{CalcStage, RenderMode};

/// Symbolic covariance computation over one graph.
///
/// Not thread-safe: one instance serves at most one logical computation
/// at a time.
pub trait ICovarianceCalculator {
    /// Current lifecycle stage.
    fn stage(&self) -> CalcStage;

    /// Build, mask, and invert the gain matrix, then derive the covariance matrix.
    fn calculate_cov_mat(&mut self) -> ScmResult<()>;

    /// One line per covariance entry. Fails before `calculate_cov_mat` has run.
    fn render_cov_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>>;
}

/// Feedback models additionally evolve across time slices.
pub trait IGrowthCalculator: ICovarianceCalculator {
    /// Derive the one-slice growth matrix. Requires the covariance stage.
    fn calculate_growth_mat(&mut self) -> ScmResult<()>;

    /// One line per growth-matrix entry. Fails before `calculate_growth_mat` has run.
    fn render_growth_mat_entries(&self, mode: RenderMode) -> ScmResult<Vec<String>>;
}
