use std::sync::Arc;

use linscm_core::config::SamplerConfig;
use linscm_graph::Graph;
use linscm_sampler::RandomDataMaker;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random DAG over `n` nodes from a bitmask over forward pairs.
fn random_dag(n: usize, bits: u64) -> Graph {
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
    fn random_gains_only_on_arrows_and_within_bound(
        n in 2usize..=7,
        bits in any::<u64>(),
        bound in 0.01f64..10.0,
        seed in any::<u64>(),
    ) {
        let graph = random_dag(n, bits);
        let mut rng = StdRng::seed_from_u64(seed);
        let alpha = RandomDataMaker::generate_random_gains(&graph, bound, &mut rng).unwrap();
        prop_assert_eq!(alpha.shape(), (n, n));
        for r in 0..n {
            for c in 0..n {
                prop_assert!(alpha[(r, c)].abs() <= bound);
                if !(r > c && graph.has_dag_arrow(c, r)) {
                    prop_assert_eq!(alpha[(r, c)], 0.0);
                }
            }
        }
    }

    #[test]
    fn configured_dataset_has_one_column_per_node(
        n in 1usize..=5,
        bits in any::<u64>(),
        rows in 0usize..40,
        seed in any::<u64>(),
    ) {
        let config = SamplerConfig {
            seed: Some(seed),
            num_rows: rows,
            ..SamplerConfig::default()
        };
        let graph = Arc::new(random_dag(n, bits));
        let mut maker = RandomDataMaker::new(graph, vec![1.0; n], &config).unwrap();
        let data = maker.generate_configured_dataset();
        prop_assert_eq!(data.shape(), (rows, n));
        prop_assert!(data.iter().all(|v| v.is_finite()));
    }
}
