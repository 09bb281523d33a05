//! Fully symbolic matrices, one fresh symbol per entry.

use crate::matrix::SymMatrix;
use crate::poly::Polynomial;
use crate::symbol::{Family, Symbol};

/// `dim x dim` matrix of `family` symbols.
///
/// Per-node families only make sense on the diagonal, so their
/// off-diagonal entries are zero.
pub fn family_mat(family: Family, dim: usize) -> SymMatrix {
    if family.is_per_node() {
        return SymMatrix::diagonal(
            (0..dim)
                .map(|i| Polynomial::from(Symbol::new(family, i, i)))
                .collect(),
        );
    }
    SymMatrix::from_fn(dim, |r, c| Polynomial::from(Symbol::new(family, r, c)))
}

pub fn gain_mat(dim: usize) -> SymMatrix {
    family_mat(Family::Gain, dim)
}

pub fn fback_gain_mat(dim: usize) -> SymMatrix {
    family_mat(Family::FeedbackGain, dim)
}

pub fn jacobian_mat(dim: usize) -> SymMatrix {
    family_mat(Family::Jacobian, dim)
}

/// `diag(sigma_eps_i ** 2)`, the covariance of independent noise terms.
pub fn noise_variance_mat(dim: usize) -> SymMatrix {
    SymMatrix::diagonal(
        (0..dim)
            .map(|i| Polynomial::symbol(Symbol::noise_sigma(i)).pow(2))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_families_fill_every_entry() {
        let m = gain_mat(3);
        assert_eq!(m.count_nonzero(), 9);
        assert_eq!(m[(2, 1)], Polynomial::from(Symbol::gain(2, 1)));
    }

    #[test]
    fn per_node_families_are_diagonal() {
        let m = family_mat(Family::NodeSigma, 3);
        assert_eq!(m.count_nonzero(), 3);
        assert_eq!(m[(1, 1)].to_string(), "sigma_1");
    }

    #[test]
    fn noise_variances_are_squared_sigmas() {
        let m = noise_variance_mat(2);
        assert_eq!(m[(1, 1)].to_string(), "sigma_eps_1**2");
        assert!(m[(0, 1)].is_zero());
    }
}
