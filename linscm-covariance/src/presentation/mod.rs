//! One text line per matrix entry, in plain or LaTeX markup form.
//!
//! Rendering reads the matrices it is given and never changes them.

pub mod latex;

use linscm_core::config::RenderConfig;
use linscm_core::errors::{ScmError, ScmResult};
use linscm_core::models::RenderMode;
use linscm_graph::Graph;
use linscm_symbolic::{Polynomial, QuotientMatrix, SymMatrix, TermStyle};
use tracing::info;

pub use latex::{latex_symbol, plain_symbol};

/// What a matrix holds. Decides the left-hand side of each line and which
/// cells are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixKind {
    Covariance,
    Jacobian,
    /// Strictly lower-triangular; the diagonal and upper triangle are skipped.
    Gains,
    Named(String),
}

impl MatrixKind {
    pub fn name(&self) -> &str {
        match self {
            MatrixKind::Covariance => "cov",
            MatrixKind::Jacobian => "jacobian",
            MatrixKind::Gains => "gains",
            MatrixKind::Named(name) => name,
        }
    }

    pub fn skips(&self, row: usize, col: usize) -> bool {
        matches!(self, MatrixKind::Gains) && col >= row
    }

    fn lhs(
        &self,
        mode: RenderMode,
        (row, row_nd): (usize, &str),
        (col, col_nd): (usize, &str),
    ) -> String {
        match (mode, self) {
            (RenderMode::Markup, MatrixKind::Covariance) => format!(
                r"\left\langle\underline{{{row_nd}}}, \underline{{{col_nd}}}\right\rangle="
            ),
            (RenderMode::Markup, MatrixKind::Jacobian) => format!(
                r"\frac{{\partial\underline{{{row_nd}}}}}{{\partial\underline{{{col_nd}}}}}="
            ),
            (RenderMode::Markup, MatrixKind::Gains) => {
                format!(r"\alpha_{{\underline{{{row_nd}}}| \underline{{{col_nd}}}}}=")
            }
            _ => format!("{}[{row}:{row_nd}, {col}:{col_nd}]=", self.name()),
        }
    }
}

fn render_poly(p: &Polynomial, graph: &Graph, mode: RenderMode) -> ScmResult<String> {
    match mode {
        RenderMode::Plain => p.render(&TermStyle::PLAIN, |s| plain_symbol(graph, s)),
        RenderMode::Markup => p.render(&TermStyle::LATEX, |s| latex_symbol(graph, s)),
    }
}

fn render_fraction(
    num: &Polynomial,
    den: &Polynomial,
    graph: &Graph,
    mode: RenderMode,
) -> ScmResult<String> {
    let top = render_poly(num, graph, mode)?;
    if den.is_one() {
        return Ok(top);
    }
    let bottom = render_poly(den, graph, mode)?;
    Ok(match mode {
        RenderMode::Markup => format!(r"\frac{{{top}}}{{{bottom}}}"),
        RenderMode::Plain => {
            let group = |text: String, p: &Polynomial| {
                if p.num_terms() > 1 {
                    format!("({text})")
                } else {
                    text
                }
            };
            format!("{}/{}", group(top, num), group(bottom, den))
        }
    })
}

/// Lines for the cells of a `dim x dim` matrix whose index `i` stands for
/// graph position `positions[i]`.
fn render_cells(
    dim: usize,
    positions: &[usize],
    kind: &MatrixKind,
    graph: &Graph,
    mode: RenderMode,
    mut expr: impl FnMut(usize, usize) -> ScmResult<String>,
) -> ScmResult<Vec<String>> {
    if positions.len() != dim {
        return Err(ScmError::DimensionMismatch {
            expected: dim,
            actual: positions.len(),
        });
    }
    let mut names = Vec::with_capacity(dim);
    for &pos in positions {
        let name = graph.node(pos).ok_or(ScmError::DimensionMismatch {
            expected: graph.num_nodes(),
            actual: pos + 1,
        })?;
        names.push((pos, name));
    }

    let mut lines = Vec::with_capacity(dim * dim);
    for r in 0..dim {
        for c in 0..dim {
            if kind.skips(r, c) {
                continue;
            }
            lines.push(format!("{}{}", kind.lhs(mode, names[r], names[c]), expr(r, c)?));
        }
    }
    Ok(lines)
}

/// One line per cell of a matrix indexed by node position.
///
/// Plain lines look like `cov[1:b, 0:a]=alp_1_L_0*sigma_eps_0**2`.
pub fn render_entries(
    matrix: &SymMatrix,
    kind: &MatrixKind,
    graph: &Graph,
    mode: RenderMode,
) -> ScmResult<Vec<String>> {
    if matrix.dim() != graph.num_nodes() {
        return Err(ScmError::DimensionMismatch {
            expected: graph.num_nodes(),
            actual: matrix.dim(),
        });
    }
    let positions: Vec<usize> = (0..matrix.dim()).collect();
    render_cells(matrix.dim(), &positions, kind, graph, mode, |r, c| {
        render_poly(&matrix[(r, c)], graph, mode)
    })
}

/// Like [`render_entries`] for a fraction matrix over a subset of nodes.
pub fn render_quotient_entries(
    matrix: &QuotientMatrix,
    positions: &[usize],
    kind: &MatrixKind,
    graph: &Graph,
    mode: RenderMode,
) -> ScmResult<Vec<String>> {
    render_cells(matrix.dim(), positions, kind, graph, mode, |r, c| {
        render_fraction(
            &matrix.numerators()[(r, c)],
            &matrix.denominators()[(r, c)],
            graph,
            mode,
        )
    })
}

/// Render in the configured mode. With `verbose`, markup output is
/// accompanied by the plain form in the log.
pub fn render_entries_with_config(
    matrix: &SymMatrix,
    kind: &MatrixKind,
    graph: &Graph,
    config: &RenderConfig,
) -> ScmResult<Vec<String>> {
    if config.verbose && config.mode == RenderMode::Markup {
        for line in render_entries(matrix, kind, graph, RenderMode::Plain)? {
            info!(matrix = kind.name(), "{line}");
        }
    }
    render_entries(matrix, kind, graph, config.mode)
}

/// Wrap markup lines into one single-column LaTeX array.
pub fn render_block(lines: &[String]) -> String {
    let mut out = String::from(r"\begin{array}{l}");
    out.push('\n');
    if !lines.is_empty() {
        out.push_str(&lines.join("\n\\\\\n"));
        out.push('\n');
    }
    out.push_str(r"\end{array}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use linscm_symbolic::generator::gain_mat;
    use linscm_symbolic::Symbol;

    fn graph() -> Graph {
        Graph::from_dot("digraph G {\na->b;\n}").unwrap()
    }

    #[test]
    fn gains_kind_skips_diagonal_and_upper() {
        let lines =
            render_entries(&gain_mat(2), &MatrixKind::Gains, &graph(), RenderMode::Plain).unwrap();
        assert_eq!(lines, vec!["gains[1:b, 0:a]=alp_1_L_0"]);
    }

    #[test]
    fn markup_lhs_per_kind() {
        let g = graph();
        let m = SymMatrix::identity(2);
        let cov = render_entries(&m, &MatrixKind::Covariance, &g, RenderMode::Markup).unwrap();
        assert_eq!(cov[1], r"\left\langle\underline{a}, \underline{b}\right\rangle=0");
        let jac = render_entries(&m, &MatrixKind::Jacobian, &g, RenderMode::Markup).unwrap();
        assert_eq!(jac[0], r"\frac{\partial\underline{a}}{\partial\underline{a}}=1");
        let named =
            render_entries(&m, &MatrixKind::Named("G".into()), &g, RenderMode::Markup).unwrap();
        assert_eq!(named[3], "G[1:b, 1:b]=1");
        let gains =
            render_entries(&gain_mat(2), &MatrixKind::Gains, &g, RenderMode::Markup).unwrap();
        assert_eq!(
            gains,
            vec![r"\alpha_{\underline{b}| \underline{a}}=\alpha_{\underline{b}|\underline{a}}"]
        );
    }

    #[test]
    fn wrong_dimension_is_rejected() {
        let m = SymMatrix::identity(3);
        let err =
            render_entries(&m, &MatrixKind::Covariance, &graph(), RenderMode::Plain).unwrap_err();
        assert!(matches!(err, ScmError::DimensionMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn symbol_outside_graph_is_unknown() {
        let mut m = SymMatrix::zeros(2);
        m.set(0, 0, Symbol::gain(5, 0).into());
        let err =
            render_entries(&m, &MatrixKind::Covariance, &graph(), RenderMode::Plain).unwrap_err();
        assert!(matches!(err, ScmError::UnknownSymbol { .. }));
    }

    #[test]
    fn block_wraps_lines() {
        let block = render_block(&["x=1".to_string(), "y=2".to_string()]);
        assert_eq!(block, "\\begin{array}{l}\nx=1\n\\\\\ny=2\n\\end{array}");
        assert_eq!(render_block(&[]), "\\begin{array}{l}\n\\end{array}");
    }

    #[test]
    fn fractions_render_per_mode() {
        let g = graph();
        let num: Polynomial = Symbol::noise_sigma(1).into();
        let den = &Polynomial::symbol(Symbol::noise_sigma(0)) + &Polynomial::one();
        let plain = render_fraction(&num, &den, &g, RenderMode::Plain).unwrap();
        assert_eq!(plain, "sigma_eps_1/(sigma_eps_0 + 1)");
        let markup = render_fraction(&num, &den, &g, RenderMode::Markup).unwrap();
        assert!(markup.starts_with(r"\frac{"));
        let whole = render_fraction(&num, &Polynomial::one(), &g, RenderMode::Plain).unwrap();
        assert_eq!(whole, "sigma_eps_1");
    }
}
