//! # linscm-covariance
//!
//! Symbolic covariance engine for linear structural causal models.
//!
//! Pipeline: fully symbolic gain matrix, masked by the graph's DAG arrows,
//! inverted as `M = (I - A)^-1`, then `Cov = M D M^T` with `D` the noise
//! variances. Feedback graphs additionally mask a cross-slice gain matrix `B`
//! and derive the growth matrix `M B`.
//!
//! Calculators own their results; a [`linscm_graph::Graph`] is shared
//! read-only behind an `Arc`.

pub mod calculator;
pub mod conditioning;
pub mod correlation;
pub mod fback;
pub mod masking;
pub mod numeric_subs;
pub mod presentation;

pub use calculator::{compute_covariance, CovMatCalculator, CovarianceResult};
pub use conditioning::ConditionalCovariance;
pub use fback::{compute_growth_matrix, FBackCovMatCalculator, GrowthResult};
pub use presentation::{render_entries, MatrixKind};
