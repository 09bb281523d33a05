use serde::{Deserialize, Serialize};

use super::defaults;

/// Numeric sampler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Random gains are drawn uniformly from `[-alpha_bound, alpha_bound]`. Must be > 0.
    pub alpha_bound: f64,
    /// Mean of every exogenous noise draw.
    pub noise_mean: f64,
    /// Seed for reproducible sampling. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Default number of rows in a generated dataset.
    pub num_rows: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            alpha_bound: defaults::DEFAULT_ALPHA_BOUND,
            noise_mean: defaults::DEFAULT_NOISE_MEAN,
            seed: None,
            num_rows: defaults::DEFAULT_NUM_ROWS,
        }
    }
}
