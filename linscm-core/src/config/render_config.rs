use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::RenderMode;

/// Presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: RenderMode,
    /// Also log the plain form when rendering markup.
    pub verbose: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            verbose: defaults::DEFAULT_RENDER_VERBOSE,
        }
    }
}
