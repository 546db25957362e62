//! # ncalg-bridge
//!
//! Offloads basis completion and batch normal forms to an external batch
//! Gröbner-basis solver through a file protocol.
//!
//! This crate provides:
//! - [`BridgeConfig`]: executable, arguments, time limit and file policy
//! - [`SessionScript`]: the directive language the solver reads
//! - [`ExternalSolver`]: a [`BasisEngine`](ncalg_groebner::BasisEngine)
//!   with a write-once cache of serialized bases
//! - [`ReductionEngine`]: local normal forms, offloaded above thresholds
//!
//! Only the rationals and prime fields can be written in the solver's
//! format; other coefficient rings are rejected before any process is
//! spawned.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;
pub mod encode;
pub mod engine;
pub mod error;
pub mod process;
pub mod script;
pub mod solver;

pub use config::BridgeConfig;
pub use engine::{ReductionEngine, ReductionThresholds};
pub use error::BridgeError;
pub use script::{Request, SessionScript};
pub use solver::ExternalSolver;
