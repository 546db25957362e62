//! Noncommutative Gröbner bases.
//!
//! This crate provides:
//! - [`GroebnerBasis`]: generators indexed by leading word and coefficient key
//! - Normal-form reduction with a pluggable [`TieBreak`] policy
//! - [`LocalCompletion`]: degree-truncated completion by overlap pairs
//! - [`TwoSidedIdeal`] with a memoized basis, and [`QuotientAlgebra`]
//! - The [`BasisEngine`] seam implemented by external solvers

#![warn(missing_docs)]

pub mod basis;
pub mod completion;
pub mod engine;
pub mod error;
pub mod ideal;
pub mod overlap;
pub mod quotient;
pub mod reduce;
pub mod relations;

#[cfg(test)]
mod proptests;

pub use basis::{GroebnerBasis, LeadKey, Reducers};
pub use completion::{is_groebner_basis, CompletionConfig, LocalCompletion};
pub use engine::BasisEngine;
pub use error::{EngineFailure, GroebnerError};
pub use ideal::TwoSidedIdeal;
pub use overlap::CriticalPair;
pub use quotient::QuotientAlgebra;
pub use reduce::{
    normal_form, normal_form_with, reduce_with, reduces_to_zero, FirstHit, Hit,
    SmallestGenerator, TieBreak,
};
pub use relations::{sklyanin_relations, skew_polynomial_ring_relations};
