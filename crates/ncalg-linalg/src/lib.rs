//! # ncalg-linalg
//!
//! Dense linear algebra over the coefficient fields of ncalg.
//!
//! Graded pieces of a quotient algebra are finite-dimensional; kernels,
//! centers and module membership all come down to rank and null-space
//! computations on their coordinate matrices.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;

pub use dense_matrix::DenseMatrix;
