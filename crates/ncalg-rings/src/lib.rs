//! # ncalg-rings
//!
//! Coefficient rings for the ncalg noncommutative algebra engine.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `Coefficient`, `Field`
//! - Concrete fields: Q and Z_p
//! - Commutative polynomial coefficients F[t_0, t_1, ...]
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── Coefficient   (leading keys, exact division)
//!       └── Field    (inverses, Key = ())
//! ```
//!
//! Free-algebra polynomials are generic over `Coefficient`, so reduction
//! works for both fields and polynomial coefficient rings. Completion,
//! linear algebra and the external solver bridge require a `Field`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod comm_poly;
pub mod finite_field;
pub mod rationals;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use comm_poly::{CommPoly, CoeffMonomial};
pub use finite_field::{FiniteField, GF101, GF2147483647};
pub use rationals::Q;
pub use traits::{Coefficient, Field, FieldKind, Ring};
