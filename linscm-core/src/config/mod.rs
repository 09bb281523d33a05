//! TOML configuration. Every section defaults, so an empty document is valid.

pub mod defaults;
mod observability_config;
mod render_config;
mod sampler_config;

pub use observability_config::ObservabilityConfig;
pub use render_config::RenderConfig;
pub use sampler_config::SamplerConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ScmResult};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScmConfig {
    pub sampler: SamplerConfig,
    pub render: RenderConfig,
    pub observability: ObservabilityConfig,
}

impl ScmConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> ScmResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> ScmResult<()> {
        let bound = self.sampler.alpha_bound;
        if !(bound.is_finite() && bound > 0.0) {
            return Err(ConfigError::ValidationFailed {
                field: "sampler.alpha_bound".to_string(),
                message: format!("must be a positive number, got {bound}"),
            }
            .into());
        }
        if !self.sampler.noise_mean.is_finite() {
            return Err(ConfigError::ValidationFailed {
                field: "sampler.noise_mean".to_string(),
                message: "must be finite".to_string(),
            }
            .into());
        }
        if self.observability.log_level.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "observability.log_level".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
