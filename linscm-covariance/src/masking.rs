//! Structural zeros: gains with no arrow behind them are forced to zero.

use linscm_graph::Graph;
use linscm_symbolic::{Polynomial, SymMatrix};
use tracing::debug;

/// Copy of `matrix` with every entry where `keep(row, col)` is false set to zero.
///
/// Only tests the predicate; the arrow sets behind it may be cyclic.
pub fn mask(matrix: &SymMatrix, keep: impl Fn(usize, usize) -> bool) -> SymMatrix {
    matrix.map(|r, c, p| if keep(r, c) { p.clone() } else { Polynomial::zero() })
}

/// A same-slice gain survives only below the diagonal and only with an arrow
/// `node(col) -> node(row)`.
pub fn dag_keeps(graph: &Graph, row: usize, col: usize) -> bool {
    row > col && graph.has_dag_arrow(col, row)
}

/// A feedback gain survives with an arrow `node(col) -> node(row)` across
/// slices. There is no ordering restriction, and `a -> a` is allowed.
pub fn fback_keeps(graph: &Graph, row: usize, col: usize) -> bool {
    graph.has_fback_arrow(col, row)
}

pub fn mask_dag_gains(graph: &Graph, gains: &SymMatrix) -> SymMatrix {
    let masked = mask(gains, |r, c| dag_keeps(graph, r, c));
    debug!(
        dim = gains.dim(),
        kept = masked.count_nonzero(),
        zeroed = gains.count_nonzero() - masked.count_nonzero(),
        "masked DAG gains"
    );
    masked
}

pub fn mask_fback_gains(graph: &Graph, gains: &SymMatrix) -> SymMatrix {
    let masked = mask(gains, |r, c| fback_keeps(graph, r, c));
    debug!(
        dim = gains.dim(),
        kept = masked.count_nonzero(),
        "masked feedback gains"
    );
    masked
}

#[cfg(test)]
mod tests {
    use super::*;
    use linscm_symbolic::generator::{fback_gain_mat, gain_mat};
    use linscm_symbolic::Symbol;

    fn four_node() -> Graph {
        Graph::from_dot("digraph G {\na->b;\na->s;\nn->s,a,b;\n}").unwrap()
    }

    #[test]
    fn missing_arrow_zeroes_its_gain() {
        let graph = four_node();
        let masked = mask_dag_gains(&graph, &gain_mat(4));
        assert!(masked[(3, 2)].is_zero());
        for (r, c) in [(1, 0), (2, 0), (2, 1), (3, 0), (3, 1)] {
            assert_eq!(masked[(r, c)], Polynomial::from(Symbol::gain(r, c)));
        }
        assert_eq!(masked.count_nonzero(), 5);
    }

    #[test]
    fn diagonal_and_upper_triangle_never_survive() {
        let graph = four_node();
        let masked = mask_dag_gains(&graph, &gain_mat(4));
        assert!(masked.is_strictly_lower_triangular());
    }

    #[test]
    fn masking_twice_changes_nothing() {
        let graph = four_node();
        let once = mask_dag_gains(&graph, &gain_mat(4));
        assert_eq!(mask_dag_gains(&graph, &once), once);
    }

    #[test]
    fn feedback_mask_has_no_ordering_restriction() {
        let dot = "digraph G {\na->b;\nb->a [color=green];\na->a [color=green];\n}";
        let graph = Graph::from_dot(dot).unwrap();
        let masked = mask_fback_gains(&graph, &fback_gain_mat(2));
        assert_eq!(masked[(0, 1)], Polynomial::from(Symbol::fback_gain(0, 1)));
        assert_eq!(masked[(0, 0)], Polynomial::from(Symbol::fback_gain(0, 0)));
        assert!(masked[(1, 0)].is_zero());
        assert!(!dag_keeps(&graph, 0, 0));
    }
}
