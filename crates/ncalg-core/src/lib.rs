//! # ncalg-core
//!
//! Words, free associative algebras and noncommutative polynomials.
//!
//! This crate provides:
//! - [`Word`]: monomials as ordered letter sequences, with substring search
//! - [`FreeAlgebra`]: a scoped handle owning generator names and weights
//! - [`NcPoly`]: sparse polynomials sorted in weighted deg-lex order
//! - An expression parser for the `x*y^2 - 1/2*z` text format
//!
//! ## Monomial Order
//!
//! Words are compared by weighted degree, then lexicographically with the
//! earliest declared generator as the largest letter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algebra;
pub mod error;
pub mod ordering;
pub mod parse;
pub mod poly;
pub mod word;

#[cfg(test)]
mod proptests;

pub use algebra::FreeAlgebra;
pub use error::CoreError;
pub use ordering::cmp_deglex;
pub use parse::{parse_poly, MAX_EXPONENT, MAX_NESTING};
pub use poly::NcPoly;
pub use word::{find_substring, Factorization, Letter, MatchMode, Word};
