//! # ncalg
//!
//! Noncommutative algebra by term rewriting.
//!
//! ncalg computes Gröbner bases of two-sided ideals in free associative
//! algebras, reduces elements to normal form, and computes syzygies of
//! matrices over the quotient.
//!
//! ## Features
//!
//! - **Free Algebras**: scoped generator handles with weighted gradings
//! - **Normal Forms**: leftmost-first rewriting with a pluggable tie-break
//! - **Completion**: a local degree-truncated engine, or an external batch
//!   solver driven through its file protocol
//! - **Quotients**: arithmetic, Hilbert functions and central elements
//! - **Syzygies**: right kernels by linear algebra or elimination
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ncalg::prelude::*;
//!
//! let a = FreeAlgebra::<Q>::new(&["x", "y", "z"])?;
//! let relations = skew_polynomial_ring_relations(&a, &Q::from_integer(-1));
//! let ideal = TwoSidedIdeal::new(&a, relations)?;
//! let quotient = ideal.quotient(&LocalCompletion::default(), Some(6))?;
//! let f = quotient.element("x*y*z")?; // -z*y*x
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use ncalg_bridge as bridge;
pub use ncalg_core as core;
pub use ncalg_groebner as groebner;
pub use ncalg_linalg as linalg;
pub use ncalg_matrix as matrix;
pub use ncalg_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use ncalg_bridge::{BridgeConfig, BridgeError, ExternalSolver, ReductionEngine, ReductionThresholds};
    pub use ncalg_core::{CoreError, FreeAlgebra, NcPoly, Word};
    pub use ncalg_groebner::{
        normal_form, skew_polynomial_ring_relations, sklyanin_relations, BasisEngine, CompletionConfig,
        GroebnerBasis, GroebnerError, LocalCompletion, QuotientAlgebra, TwoSidedIdeal,
    };
    pub use ncalg_matrix::{
        central_elements, left_multiplication_map, right_kernel, KernelMethod, KernelOptions, MatrixError, NcMatrix,
    };
    pub use ncalg_rings::{Field, Ring, GF101, Q};
}
