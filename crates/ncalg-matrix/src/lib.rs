//! # ncalg-matrix
//!
//! Matrices over noncommutative quotient algebras and their syzygies.
//!
//! This crate provides:
//! - [`NcMatrix`]: polynomial matrices with row and column degree labels
//! - [`GradedPiece`]: coordinates in a homogeneous part of a quotient
//! - [`right_kernel`]: kernels in a fixed degree, by linear algebra or by
//!   elimination in a marker algebra
//! - [`minimal_generators`]: pruning of redundant kernel generators
//! - [`central_elements`] and [`left_multiplication_map`]
//!
//! ## Example
//!
//! ```rust,ignore
//! let k = right_kernel(&quotient, &m, 1, &KernelOptions::default())?;
//! assert!(m.mul_in(&quotient, &k)?.is_zero());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod center;
pub mod coords;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod minimal;

pub use center::{central_elements, left_multiplication_map};
pub use coords::GradedPiece;
pub use error::MatrixError;
pub use kernel::{right_kernel, KernelMethod, KernelOptions};
pub use matrix::NcMatrix;
pub use minimal::minimal_generators;
