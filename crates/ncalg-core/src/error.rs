//! Errors for algebra construction and expression parsing.

use thiserror::Error;

/// Error raised while building an algebra or reading an expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A generator name is not an identifier.
    #[error("invalid generator name `{0}`")]
    InvalidGeneratorName(String),

    /// A generator name was declared twice.
    #[error("duplicate generator `{0}`")]
    DuplicateGenerator(String),

    /// The weight list does not match the generator list.
    #[error("expected {expected} weights, found {found}")]
    WeightCountMismatch {
        /// Number of generators.
        expected: usize,
        /// Number of weights given.
        found: usize,
    },

    /// A weight of zero.
    #[error("generator `{0}` must have a positive weight")]
    NonPositiveWeight(String),

    /// A name the algebra does not declare.
    #[error("unknown generator `{0}`")]
    UnknownGenerator(String),

    /// A generator index past the end.
    #[error("generator index {index} out of range for {count} generators")]
    GeneratorOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of generators.
        count: usize,
    },

    /// Malformed expression text.
    #[error("parse error at byte {position}: {message}")]
    Parse {
        /// Byte offset into the input.
        position: usize,
        /// What went wrong.
        message: String,
    },

    /// Operands belong to different algebras.
    #[error("operands belong to different algebras")]
    AlgebraMismatch,
}
