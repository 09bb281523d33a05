//! Node-name forms of every symbol family.
//!
//! Positions are looked up in the graph, so a symbol pointing past the last
//! node is an [`ScmError::UnknownSymbol`] rather than a silently unrendered
//! name.

use linscm_core::errors::{ScmError, ScmResult};
use linscm_graph::Graph;
use linscm_symbolic::{Family, Symbol};

fn node_names<'g>(graph: &'g Graph, symbol: &Symbol) -> ScmResult<(&'g str, &'g str)> {
    let unknown = || ScmError::UnknownSymbol {
        symbol: symbol.to_string(),
    };
    let row = graph.node(symbol.row).ok_or_else(unknown)?;
    let col = graph.node(symbol.col).ok_or_else(unknown)?;
    Ok((row, col))
}

/// Flat name, after checking it refers to nodes of `graph`.
pub fn plain_symbol(graph: &Graph, symbol: &Symbol) -> ScmResult<String> {
    node_names(graph, symbol)?;
    Ok(symbol.to_string())
}

pub fn latex_symbol(graph: &Graph, symbol: &Symbol) -> ScmResult<String> {
    let (row, col) = node_names(graph, symbol)?;
    let text = match symbol.family {
        Family::NoiseSigma => format!(r"\sigma_{{\underline{{\epsilon}}_{{\underline{{{row}}}}}}}"),
        Family::NodeSigma => format!(r"\sigma_{{\underline{{{row}}}}}"),
        Family::Gain => format!(r"\alpha_{{\underline{{{row}}}|\underline{{{col}}}}}"),
        Family::FeedbackGain => format!(r"\beta_{{\underline{{{row}}}|\underline{{{col}}}}}"),
        Family::Covariance => {
            format!(r"\left\langle\underline{{{row}}},\underline{{{col}}}\right\rangle")
        }
        Family::NoiseCovariance if symbol.row == symbol.col => {
            format!(r"\sigma^2_{{\underline{{\epsilon}}_{{\underline{{{row}}}}}}}")
        }
        Family::NoiseCovariance => format!(concat!(
            r"\left\langle\underline{{\epsilon}}_\underline{{{row}}},",
            r"\underline{{\epsilon}}_\underline{{{col}}}\right\rangle"
        ), row = row, col = col),
        Family::Correlation => format!(r"\rho_{{\underline{{{row}}},\underline{{{col}}}}}"),
        Family::Jacobian => format!(r"\partial_{{\underline{{{row}}}}}\underline{{{col}}}"),
    };
    Ok(text)
}
