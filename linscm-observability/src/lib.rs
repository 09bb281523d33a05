//! # linscm-observability
//!
//! Tracing subscriber setup, one span per computation stage, and the
//! structured events emitted when a stage finishes.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_with_config};
