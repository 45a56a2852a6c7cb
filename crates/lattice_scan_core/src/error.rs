//! Error types for exact lattice enumeration

use thiserror::Error;

/// Errors produced by the rational, linear-algebra and enumeration layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A rational was constructed with a zero denominator, or a division by
    /// a zero rational was attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// Vector or matrix operands had incompatible shapes.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Inversion was attempted on a non-square or singular matrix.
    #[error("matrix is not invertible")]
    NotInvertible,

    /// Row reduction of the box constraint system did not reach full rank;
    /// the basis/bounds combination is degenerate or inconsistent.
    #[error("constraint reduction failed: rank {rank}, expected {expected}")]
    ReductionFailure { rank: usize, expected: usize },

    /// The linear program has no feasible point. A correctly constructed
    /// box system never produces this.
    #[error("linear program is infeasible")]
    Infeasible,

    /// The linear program has no finite optimum along the requested
    /// objective. Signals malformed input (e.g. a degenerate basis).
    #[error("linear program is unbounded")]
    Unbounded,

    /// The enumeration was cancelled cooperatively.
    #[error("enumeration cancelled")]
    Cancelled,

    /// A rational literal could not be parsed.
    #[error("invalid rational literal: {0:?}")]
    InvalidLiteral(String),
}

pub type Result<T> = std::result::Result<T, Error>;
