//! # linscm-graph
//!
//! The graph model consumed by the covariance engine: an ordered node list
//! plus a set of DAG (same time-slice) arrows and, for feedback models, a
//! disjoint set of feedback (cross time-slice) arrows.
//!
//! Node positions come from a topological sort of the DAG arrows and fix
//! every symbol index downstream. A [`Graph`] is immutable once built and
//! can be shared read-only across calculators.

pub mod arrow;
pub mod builder;
pub mod graph;
pub mod ordering;
pub mod parser;

pub use arrow::Arrow;
pub use builder::GraphBuilder;
pub use graph::Graph;
