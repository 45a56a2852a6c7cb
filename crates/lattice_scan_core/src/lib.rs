//! Exact enumeration of lattice points inside an axis-aligned box.
//!
//! Given an invertible rational basis `B` and per-coordinate bounds, this
//! crate finds every integer vector `z` satisfying
//! `lower[i] <= (B z)[i] <= upper[i]`. All arithmetic is exact rational
//! arithmetic over arbitrary-precision integers, so membership decisions
//! are never subject to rounding.
//!
//! The pipeline:
//!
//! - [`rational`]: canonical-form [`Rational`] numbers over `BigInt`
//! - [`vector`] / [`matrix`]: dense exact linear algebra, generic over the
//!   [`Scalar`] capability trait, including Gauss-Jordan row reduction and
//!   inversion
//! - [`simplex`]: a two-phase revised simplex solver for bounding each
//!   coordinate of the search
//! - [`enumerate`]: the standard-form rewrite and the branch-and-bound
//!   recursion that emits the lattice points
//!
//! ```
//! use lattice_scan_core::{enumerate, Matrix, Rational, Vector};
//!
//! let basis = Matrix::from_rows(vec![
//!     vec![Rational::from(2), Rational::from(0)],
//!     vec![Rational::from(0), Rational::from(1)],
//! ]);
//! let lower: Vector<Rational> = [0, 0].map(Rational::from).into_iter().collect();
//! let upper: Vector<Rational> = [5, 5].map(Rational::from).into_iter().collect();
//!
//! let points = enumerate::enumerate(&basis, &lower, &upper).unwrap();
//! assert_eq!(points.len(), 18);
//! ```

pub mod enumerate;
pub mod error;
pub mod matrix;
pub mod rational;
pub mod scalar;
pub mod simplex;
pub mod vector;

pub use enumerate::{Enumerator, StandardForm};
pub use error::{Error, Result};
pub use matrix::{random_basis, Matrix};
pub use rational::Rational;
pub use scalar::Scalar;
pub use simplex::SimplexSolver;
pub use vector::Vector;
