//! # linscm-symbolic
//!
//! The algebra the covariance engine runs on. This is deliberately not a
//! general CAS: expressions are polynomials with integer coefficients over
//! tagged [`Symbol`]s, which is closed under everything the engine needs
//! (products, sums, and inverting a unit lower-triangular matrix).
//!
//! Polynomials are kept in canonical form at all times (zero terms dropped,
//! like monomials merged), so structural equality is symbolic equality and
//! no separate simplification pass exists.

pub mod format;
pub mod generator;
pub mod matrix;
pub mod poly;
pub mod quotient;
pub mod symbol;

pub use format::{PowerStyle, TermStyle};
pub use matrix::SymMatrix;
pub use poly::{Monomial, Polynomial};
pub use quotient::QuotientMatrix;
pub use symbol::{Family, Symbol};
