//! # linscm-core
//!
//! Foundation crate for the linear SCM covariance engine.
//! Defines errors, config, constants, shared models, and the calculator
//! capability traits. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ScmConfig;
pub use errors::{ScmError, ScmResult};
pub use models::{CalcStage, RenderMode};
