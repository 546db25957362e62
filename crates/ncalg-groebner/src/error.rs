//! Errors for basis construction and completion.

use ncalg_core::CoreError;
use thiserror::Error;

/// Boxed error from a [`BasisEngine`](crate::BasisEngine) implementation.
pub type EngineFailure = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error raised by basis construction, completion or a basis engine.
#[derive(Debug, Error)]
pub enum GroebnerError {
    /// Building or parsing an element failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Generators belong to different algebras.
    #[error("generators belong to different algebras")]
    AlgebraMismatch,

    /// A relation family needs a fixed number of generators.
    #[error("expected an algebra with {expected} generators, found {found}")]
    GeneratorCount {
        /// Generators the family needs.
        expected: usize,
        /// Generators the algebra has.
        found: usize,
    },

    /// Completion grew past the configured size.
    #[error("completion exceeded {limit} basis elements")]
    BasisSizeExceeded {
        /// The configured maximum.
        limit: usize,
    },

    /// An engine reported a failure of its own.
    #[error("basis engine `{engine}` failed: {source}")]
    Engine {
        /// Name of the engine.
        engine: &'static str,
        /// The underlying error.
        #[source]
        source: EngineFailure,
    },
}

impl GroebnerError {
    /// Wraps an error raised inside a basis engine.
    pub fn engine(engine: &'static str, source: impl Into<EngineFailure>) -> Self {
        Self::Engine {
            engine,
            source: source.into(),
        }
    }
}
