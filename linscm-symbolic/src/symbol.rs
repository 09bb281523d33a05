//! Tagged symbolic atoms.
//!
//! Each symbol carries its family and the node positions it refers to as
//! structured data. The flat names (`alp_3_L_2`, `sigma_eps_0`, ...) are
//! only a rendering, and [`Symbol::parse`] reads them back.

use std::fmt;

use linscm_core::errors::{ScmError, ScmResult};
use serde::{Deserialize, Serialize};

/// Symbol family. Order matters: it fixes the factor order inside a monomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Direct same-slice gain of node `col` on node `row`.
    Gain,
    /// Cross-slice gain of node `col` (slice t) on node `row` (slice t+1).
    FeedbackGain,
    /// Covariance of two nodes.
    Covariance,
    /// Standard deviation of a node.
    NodeSigma,
    /// Standard deviation of a node's exogenous noise.
    NoiseSigma,
    /// Covariance of two noise terms.
    NoiseCovariance,
    /// Correlation of two nodes.
    Correlation,
    /// Partial derivative of node `row` with respect to node `col`.
    Jacobian,
}

impl Family {
    pub const ALL: [Family; 8] = [
        Family::Gain,
        Family::FeedbackGain,
        Family::Covariance,
        Family::NodeSigma,
        Family::NoiseSigma,
        Family::NoiseCovariance,
        Family::Correlation,
        Family::Jacobian,
    ];

    /// Families indexed by a single node rather than a node pair.
    pub fn is_per_node(&self) -> bool {
        matches!(self, Family::NodeSigma | Family::NoiseSigma)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Gain => "gain",
            Family::FeedbackGain => "feedback_gain",
            Family::Covariance => "covariance",
            Family::NodeSigma => "node_sigma",
            Family::NoiseSigma => "noise_sigma",
            Family::NoiseCovariance => "noise_covariance",
            Family::Correlation => "correlation",
            Family::Jacobian => "jacobian",
        }
    }
}

/// `(prefix, separator, family)` of every pair-indexed flat name.
const PAIR_FORMS: [(&str, &str, Family); 6] = [
    ("alp_", "_L_", Family::Gain),
    ("beta_", "_L_", Family::FeedbackGain),
    ("cov_", "_", Family::Covariance),
    ("eps_", "_", Family::NoiseCovariance),
    ("rho_", "_", Family::Correlation),
    ("pder_", "_wrt_", Family::Jacobian),
];

/// A symbolic scalar identified by `(family, row, col)`.
///
/// Per-node families always have `col == row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    pub family: Family,
    pub row: usize,
    pub col: usize,
}

impl Symbol {
    pub fn new(family: Family, row: usize, col: usize) -> Self {
        let col = if family.is_per_node() { row } else { col };
        Self { family, row, col }
    }

    pub fn gain(row: usize, col: usize) -> Self {
        Self::new(Family::Gain, row, col)
    }

    pub fn fback_gain(row: usize, col: usize) -> Self {
        Self::new(Family::FeedbackGain, row, col)
    }

    pub fn cov(row: usize, col: usize) -> Self {
        Self::new(Family::Covariance, row, col)
    }

    pub fn node_sigma(node: usize) -> Self {
        Self::new(Family::NodeSigma, node, node)
    }

    pub fn noise_sigma(node: usize) -> Self {
        Self::new(Family::NoiseSigma, node, node)
    }

    pub fn noise_cov(row: usize, col: usize) -> Self {
        Self::new(Family::NoiseCovariance, row, col)
    }

    pub fn correlation(row: usize, col: usize) -> Self {
        Self::new(Family::Correlation, row, col)
    }

    pub fn jacobian(row: usize, col: usize) -> Self {
        Self::new(Family::Jacobian, row, col)
    }

    /// Largest node position this symbol refers to.
    pub fn max_index(&self) -> usize {
        self.row.max(self.col)
    }

    /// Read a flat name back into a symbol.
    pub fn parse(name: &str) -> ScmResult<Symbol> {
        let unknown = || ScmError::UnknownSymbol {
            symbol: name.to_string(),
        };

        // `sigma_eps_` must be tried before `sigma_`.
        if let Some(rest) = name.strip_prefix("sigma_eps_") {
            return parse_index(rest).map(Symbol::noise_sigma).ok_or_else(unknown);
        }
        if let Some(rest) = name.strip_prefix("sigma_") {
            return parse_index(rest).map(Symbol::node_sigma).ok_or_else(unknown);
        }

        for (prefix, sep, family) in PAIR_FORMS {
            if let Some(rest) = name.strip_prefix(prefix) {
                let (row, col) = rest.split_once(sep).ok_or_else(unknown)?;
                let row = parse_index(row).ok_or_else(unknown)?;
                let col = parse_index(col).ok_or_else(unknown)?;
                return Ok(Symbol::new(family, row, col));
            }
        }
        Err(unknown())
    }
}

fn parse_index(digits: &str) -> Option<usize> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, c) = (self.row, self.col);
        match self.family {
            Family::Gain => write!(f, "alp_{r}_L_{c}"),
            Family::FeedbackGain => write!(f, "beta_{r}_L_{c}"),
            Family::Covariance => write!(f, "cov_{r}_{c}"),
            Family::NodeSigma => write!(f, "sigma_{r}"),
            Family::NoiseSigma => write!(f, "sigma_eps_{r}"),
            Family::NoiseCovariance => write!(f, "eps_{r}_{c}"),
            Family::Correlation => write!(f, "rho_{r}_{c}"),
            Family::Jacobian => write!(f, "pder_{r}_wrt_{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_names_follow_family_conventions() {
        assert_eq!(Symbol::gain(3, 2).to_string(), "alp_3_L_2");
        assert_eq!(Symbol::fback_gain(0, 1).to_string(), "beta_0_L_1");
        assert_eq!(Symbol::cov(1, 0).to_string(), "cov_1_0");
        assert_eq!(Symbol::node_sigma(4).to_string(), "sigma_4");
        assert_eq!(Symbol::noise_sigma(0).to_string(), "sigma_eps_0");
        assert_eq!(Symbol::noise_cov(2, 2).to_string(), "eps_2_2");
        assert_eq!(Symbol::correlation(0, 3).to_string(), "rho_0_3");
        assert_eq!(Symbol::jacobian(1, 0).to_string(), "pder_1_wrt_0");
    }

    #[test]
    fn parse_reads_back_every_family() {
        for family in Family::ALL {
            let sym = Symbol::new(family, 12, 3);
            assert_eq!(Symbol::parse(&sym.to_string()).unwrap(), sym);
        }
    }

    #[test]
    fn per_node_symbols_ignore_col() {
        assert_eq!(Symbol::new(Family::NoiseSigma, 2, 5), Symbol::noise_sigma(2));
    }

    #[test]
    fn parse_rejects_unrecognised_names() {
        for bad in ["", "alpha_1_L_0", "alp_1_0", "cov_x_1", "sigma_", "beta_1_L_", "pder_1_2"] {
            let err = Symbol::parse(bad).unwrap_err();
            assert!(matches!(err, ScmError::UnknownSymbol { .. }), "{bad}");
        }
    }

    #[test]
    fn symbols_are_distinct_per_position() {
        let mut seen = std::collections::HashSet::new();
        for r in 0..4 {
            for c in 0..4 {
                assert!(seen.insert(Symbol::gain(r, c)));
            }
        }
    }
}
