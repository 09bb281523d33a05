//! # linscm-sampler
//!
//! Forward simulation of a linear SCM with numeric gains, for producing
//! synthetic datasets whose covariance can be checked against the symbolic
//! engine.

pub mod maker;
pub mod numeric;

pub use maker::RandomDataMaker;
pub use numeric::{numeric_cov_mat, sample_cov_mat};
