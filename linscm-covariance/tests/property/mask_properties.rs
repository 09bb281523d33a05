use linscm_covariance::masking::{dag_keeps, mask_dag_gains};
use linscm_graph::Graph;
use linscm_symbolic::generator::gain_mat;
use linscm_symbolic::{Polynomial, Symbol};
use proptest::prelude::*;

/// Random DAG over `n` nodes from a bitmask over forward pairs.
pub fn random_dag(n: usize, bits: u64) -> Graph {
    let mut builder = Graph::builder();
    for i in 0..n {
        builder = builder.node(format!("x{i}"));
    }
    let mut bit = 0u32;
    for child in 0..n {
        for parent in 0..child {
            if bits >> (bit % 64) & 1 == 1 {
                builder = builder.arrow(format!("x{parent}"), format!("x{child}"));
            }
            bit += 1;
        }
    }
    builder.build().unwrap()
}

proptest! {
    #[test]
    fn masked_entry_is_zero_or_untouched(n in 2usize..=6, bits in any::<u64>()) {
        let graph = random_dag(n, bits);
        let masked = mask_dag_gains(&graph, &gain_mat(n));
        for r in 0..n {
            for c in 0..n {
                let parent = graph.node(c).unwrap();
                let child = graph.node(r).unwrap();
                let has_arrow =
                    graph.dag_arrows().iter().any(|a| a.parent == parent && a.child == child);
                if r > c && has_arrow {
                    prop_assert_eq!(&masked[(r, c)], &Polynomial::from(Symbol::gain(r, c)));
                    prop_assert!(dag_keeps(&graph, r, c));
                } else {
                    prop_assert!(masked[(r, c)].is_zero());
                }
            }
        }
    }

    #[test]
    fn masking_is_idempotent(n in 2usize..=6, bits in any::<u64>()) {
        let graph = random_dag(n, bits);
        let once = mask_dag_gains(&graph, &gain_mat(n));
        prop_assert_eq!(mask_dag_gains(&graph, &once), once);
    }
}
