use linscm_symbolic::generator::gain_mat;
use linscm_symbolic::{Polynomial, SymMatrix};
use proptest::prelude::*;

/// Strictly lower-triangular gain matrix keeping the entries whose bit is set.
fn masked_gains(dim: usize, bits: u64) -> SymMatrix {
    let mut bit = 0u32;
    gain_mat(dim).map(|r, c, p| {
        if r <= c {
            return Polynomial::zero();
        }
        let keep = bits >> (bit % 64) & 1 == 1;
        bit += 1;
        if keep {
            p.clone()
        } else {
            Polynomial::zero()
        }
    })
}

proptest! {
    #[test]
    fn inverse_of_unit_lower_triangular_is_two_sided(dim in 2usize..=6, bits in any::<u64>()) {
        let a = masked_gains(dim, bits);
        prop_assert!(a.is_strictly_lower_triangular());
        let l = SymMatrix::identity(dim).sub(&a).unwrap();
        let inv = l.unit_lower_triangular_inverse().unwrap();
        prop_assert_eq!(l.mul(&inv).unwrap(), SymMatrix::identity(dim));
        prop_assert_eq!(inv.mul(&l).unwrap(), SymMatrix::identity(dim));
    }

    #[test]
    fn inverse_is_unit_lower_triangular(dim in 2usize..=6, bits in any::<u64>()) {
        let l = SymMatrix::identity(dim).sub(&masked_gains(dim, bits)).unwrap();
        let inv = l.unit_lower_triangular_inverse().unwrap();
        let strict = inv.sub(&SymMatrix::identity(dim)).unwrap();
        prop_assert!(strict.is_strictly_lower_triangular());
    }
}
