//! Property tests for graph ordering.

use proptest::prelude::*;

use linscm_graph::Graph;

/// Arrows always go from the lower to the higher label, so the graph is a DAG,
/// but nodes are declared in reverse so the sort has work to do.
fn build_random_dag(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut builder = Graph::builder();
    for i in (0..n).rev() {
        builder = builder.node(format!("n{i}"));
    }
    for &(x, y) in edges {
        let (lo, hi) = (x.min(y), x.max(y));
        if lo != hi && hi < n {
            builder = builder.arrow(format!("n{lo}"), format!("n{hi}"));
        }
    }
    builder.build().unwrap()
}

fn edge_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..n * 2)
}

proptest! {
    #[test]
    fn dag_arrows_point_forward_in_node_order(edges in edge_strategy(8)) {
        let graph = build_random_dag(8, &edges);
        for arrow in graph.dag_arrows() {
            let parent = graph.position(&arrow.parent).unwrap();
            let child = graph.position(&arrow.child).unwrap();
            prop_assert!(parent < child, "{} is not forward", arrow);
        }
    }

    #[test]
    fn ordering_is_a_permutation_of_declared_nodes(edges in edge_strategy(8)) {
        let graph = build_random_dag(8, &edges);
        let mut names: Vec<String> = graph.ord_nodes().to_vec();
        names.sort();
        let mut expected: Vec<String> = (0..8).map(|i| format!("n{i}")).collect();
        expected.sort();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn ordering_is_deterministic(edges in edge_strategy(8)) {
        let first = build_random_dag(8, &edges);
        let second = build_random_dag(8, &edges);
        prop_assert_eq!(first.ord_nodes(), second.ord_nodes());
    }
}
