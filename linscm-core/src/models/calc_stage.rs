use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of a calculator instance.
///
/// `Uninitialized -> CovarianceComputed -> GrowthComputed`. Only feedback
/// calculators reach `GrowthComputed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CalcStage {
    Uninitialized,
    CovarianceComputed,
    GrowthComputed,
}

impl CalcStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::CovarianceComputed => "covariance_computed",
            Self::GrowthComputed => "growth_computed",
        }
    }

    /// True once the covariance matrix is available.
    pub fn has_covariance(&self) -> bool {
        *self >= Self::CovarianceComputed
    }
}

impl fmt::Display for CalcStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
