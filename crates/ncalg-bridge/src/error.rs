//! Errors raised by the solver bridge.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use ncalg_core::CoreError;
use ncalg_groebner::GroebnerError;
use ncalg_rings::FieldKind;
use thiserror::Error;

/// Error raised while talking to the external solver.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The coefficient field cannot be written in the solver's format.
    #[error("coefficient ring {kind} is not supported by the external solver")]
    UnsupportedCoefficients {
        /// The rejected ring.
        kind: FieldKind,
    },

    /// The executable could not be started.
    #[error("solver `{}` could not be started: {source}", path.display())]
    SolverUnavailable {
        /// The configured executable.
        path: PathBuf,
        /// The spawn error.
        #[source]
        source: io::Error,
    },

    /// The solver ran but reported failure.
    #[error("solver exited with code {code:?}\n{transcript}")]
    SolverFailed {
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        /// Captured stdout and stderr.
        transcript: String,
    },

    /// The solver was killed after running past its time limit.
    #[error("solver timed out after {0:?}")]
    Timeout(Duration),

    /// An output file did not have the expected structure.
    #[error("malformed solver output at line {line}: {message}")]
    MalformedOutput {
        /// One-based line number in the output file.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// Normal-form output did not match the submitted batch.
    #[error("expected {expected} normal forms, solver returned {found}")]
    ResultCountMismatch {
        /// Number of nonzero elements submitted.
        expected: usize,
        /// Number of results decoded.
        found: usize,
    },

    /// Reading or writing a solver file failed.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// An expression could not be handled by the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Basis construction rejected the input.
    #[error(transparent)]
    Groebner(#[from] GroebnerError),
}
