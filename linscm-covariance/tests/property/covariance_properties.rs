use linscm_covariance::compute_covariance;
use linscm_symbolic::SymMatrix;
use proptest::prelude::*;

use super::mask_properties::random_dag;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn covariance_of_random_dag_is_symmetric(n in 2usize..=5, bits in any::<u64>()) {
        let graph = random_dag(n, bits);
        let result = compute_covariance(&graph, &[]).unwrap();
        prop_assert!(result.cov_mat.is_symmetric());
    }

    #[test]
    fn one_minus_a_is_always_invertible(n in 2usize..=6, bits in any::<u64>()) {
        let graph = random_dag(n, bits);
        let result = compute_covariance(&graph, &[]).unwrap();
        let one_minus_a = SymMatrix::identity(n).sub(&result.gains).unwrap();
        prop_assert_eq!(one_minus_a.mul(&result.one_minus_a_inv).unwrap(), SymMatrix::identity(n));
    }
}
