//! Errors for matrices over a quotient algebra.

use ncalg_core::CoreError;
use ncalg_groebner::GroebnerError;
use thiserror::Error;

/// Error raised by matrix construction and kernel computations.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Entries or operands belong to different algebras.
    #[error("matrix entries belong to different algebras")]
    AlgebraMismatch,

    /// Dimensions do not fit the operation.
    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Expected (rows, columns).
        expected: (usize, usize),
        /// Actual (rows, columns).
        found: (usize, usize),
    },

    /// A row is not homogeneous of a single degree.
    #[error("row {row} is not homogeneous of a single degree")]
    NotHomogeneous {
        /// Index of the offending row.
        row: usize,
    },

    /// An element is not homogeneous.
    #[error("element is not homogeneous")]
    InhomogeneousElement,

    /// An element has terms outside the graded piece it should lie in.
    #[error("element has terms outside degree {degree}")]
    OutsidePiece {
        /// The expected degree.
        degree: u32,
    },

    /// The bin count does not divide the codomain dimension.
    #[error("{bins} bins do not divide codomain dimension {dimension}")]
    BinCountMismatch {
        /// Dimension of the codomain piece.
        dimension: usize,
        /// Requested number of bins.
        bins: usize,
    },

    /// Degree labels do not match the shape.
    #[error("expected {expected} degree labels, found {found}")]
    DegreeCountMismatch {
        /// Expected count.
        expected: usize,
        /// Actual count.
        found: usize,
    },

    /// Building the auxiliary algebra failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Basis completion failed.
    #[error(transparent)]
    Groebner(#[from] GroebnerError),
}
