//! Error types for molecular surface construction.

use thiserror::Error;

/// Result type for molecular surface operations.
pub type MolsurfResult<T> = Result<T, MolsurfError>;

/// Errors that can occur while building a molecular surface.
#[derive(Debug, Error)]
pub enum MolsurfError {
    /// No atoms were supplied.
    #[error("structure contains no atoms")]
    EmptyStructure,

    /// An atom has a non-finite coordinate.
    #[error("atom {index} has a non-finite position")]
    NonFiniteAtom {
        /// Index of the offending atom.
        index: usize,
    },

    /// Grid spacing must be positive and finite.
    #[error("invalid grid spacing: {0}")]
    InvalidSpacing(f64),

    /// Blobbyness must be negative so each atom's density decays.
    #[error("blobbyness must be negative, got {0}")]
    InvalidBlobbyness(f64),

    /// Isovalue must be positive and finite.
    #[error("invalid isovalue: {0}")]
    InvalidIsovalue(f64),

    /// The sampling grid would exceed the configured point budget.
    #[error("density grid of {points} points exceeds limit of {limit}")]
    GridTooLarge {
        /// Points the grid would need.
        points: usize,
        /// Configured limit.
        limit: usize,
    },

    /// The density never reaches the isovalue, so there is no surface.
    #[error("density never reaches isovalue {isovalue}; no surface extracted")]
    EmptySurface {
        /// Isovalue that was used.
        isovalue: f64,
    },
}
