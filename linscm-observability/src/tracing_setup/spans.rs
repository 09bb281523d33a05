//! One span per computation stage.

/// Span around building the covariance matrix of a graph.
#[macro_export]
macro_rules! covariance_span {
    ($num_nodes:expr, $num_conditioned:expr) => {
        tracing::info_span!(
            "linscm.covariance",
            num_nodes = $num_nodes,
            num_conditioned = $num_conditioned
        )
    };
}

/// Span around building the one-slice growth matrix.
#[macro_export]
macro_rules! growth_span {
    ($num_nodes:expr, $num_fback_arrows:expr) => {
        tracing::info_span!(
            "linscm.growth",
            num_nodes = $num_nodes,
            num_fback_arrows = $num_fback_arrows
        )
    };
}

/// Span around drawing a synthetic dataset.
#[macro_export]
macro_rules! sampling_span {
    ($num_nodes:expr, $num_rows:expr) => {
        tracing::info_span!("linscm.sampling", num_nodes = $num_nodes, num_rows = $num_rows)
    };
}

pub mod names {
    pub const COVARIANCE: &str = "linscm.covariance";
    pub const GROWTH: &str = "linscm.growth";
    pub const SAMPLING: &str = "linscm.sampling";
}
