//! Two-sided ideals with a memoized Gröbner basis.

use std::cell::OnceCell;

use ncalg_core::{FreeAlgebra, NcPoly};
use ncalg_rings::Field;
use tracing::debug;

use crate::basis::GroebnerBasis;
use crate::engine::BasisEngine;
use crate::error::GroebnerError;
use crate::quotient::QuotientAlgebra;
use crate::reduce::reduces_to_zero;

/// A two-sided ideal given by generators.
///
/// The Gröbner basis is computed at most once, by whichever engine asks
/// first, and reused afterwards.
#[derive(Debug)]
pub struct TwoSidedIdeal<F: Field> {
    algebra: FreeAlgebra<F>,
    generators: Vec<NcPoly<F>>,
    basis: OnceCell<GroebnerBasis<F>>,
}

impl<F: Field> TwoSidedIdeal<F> {
    /// Creates the ideal generated by `generators`.
    ///
    /// # Errors
    ///
    /// Returns [`GroebnerError::AlgebraMismatch`] if a generator belongs to
    /// a different algebra.
    pub fn new(algebra: &FreeAlgebra<F>, generators: Vec<NcPoly<F>>) -> Result<Self, GroebnerError> {
        if generators.iter().any(|g| g.algebra() != algebra) {
            return Err(GroebnerError::AlgebraMismatch);
        }
        Ok(Self {
            algebra: algebra.clone(),
            generators: generators.into_iter().filter(|g| !g.is_zero()).collect(),
            basis: OnceCell::new(),
        })
    }

    /// Creates an ideal whose generators are already a Gröbner basis.
    #[must_use]
    pub fn from_basis(basis: GroebnerBasis<F>) -> Self {
        Self {
            algebra: basis.algebra().clone(),
            generators: basis.elements().to_vec(),
            basis: OnceCell::from(basis),
        }
    }

    /// The ambient algebra.
    #[must_use]
    pub fn algebra(&self) -> &FreeAlgebra<F> {
        &self.algebra
    }

    /// The generators, with zeros removed.
    #[must_use]
    pub fn generators(&self) -> &[NcPoly<F>] {
        &self.generators
    }

    /// The memoized basis, if one has been computed.
    #[must_use]
    pub fn cached_basis(&self) -> Option<&GroebnerBasis<F>> {
        self.basis.get()
    }

    /// The Gröbner basis, computing it with `engine` on first use.
    ///
    /// Later calls return the memoized basis regardless of `engine` and
    /// `degree_limit`.
    ///
    /// # Errors
    ///
    /// Propagates the engine's error; nothing is memoized in that case.
    pub fn groebner_basis(
        &self,
        engine: &dyn BasisEngine<F>,
        degree_limit: Option<u32>,
    ) -> Result<&GroebnerBasis<F>, GroebnerError> {
        if let Some(basis) = self.basis.get() {
            return Ok(basis);
        }

        debug!(
            engine = engine.name(),
            generators = self.generators.len(),
            limit = ?degree_limit,
            "computing ideal basis"
        );
        let basis = engine.complete(&self.algebra, &self.generators, degree_limit)?;
        Ok(self.basis.get_or_init(|| basis))
    }

    /// The quotient algebra by this ideal.
    ///
    /// # Errors
    ///
    /// Propagates basis computation errors.
    pub fn quotient(
        &self,
        engine: &dyn BasisEngine<F>,
        degree_limit: Option<u32>,
    ) -> Result<QuotientAlgebra<F>, GroebnerError> {
        Ok(QuotientAlgebra::new(self.groebner_basis(engine, degree_limit)?.clone()))
    }

    /// Ideal membership test.
    ///
    /// # Errors
    ///
    /// Propagates basis computation errors.
    pub fn contains(
        &self,
        f: &NcPoly<F>,
        engine: &dyn BasisEngine<F>,
        degree_limit: Option<u32>,
    ) -> Result<bool, GroebnerError> {
        Ok(reduces_to_zero(f, self.groebner_basis(engine, degree_limit)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::LocalCompletion;
    use ncalg_rings::Q;
    use std::cell::Cell;

    /// Counts how often it is asked to complete.
    struct Counting {
        inner: LocalCompletion,
        calls: Cell<usize>,
    }

    impl BasisEngine<Q> for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn complete(
            &self,
            algebra: &FreeAlgebra<Q>,
            generators: &[NcPoly<Q>],
            degree_limit: Option<u32>,
        ) -> Result<GroebnerBasis<Q>, GroebnerError> {
            self.calls.set(self.calls.get() + 1);
            self.inner.complete(algebra, generators, degree_limit)
        }
    }

    #[test]
    fn test_basis_is_computed_once() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let ideal = TwoSidedIdeal::new(&a, vec![a.parse("x*y - y*x").unwrap()]).unwrap();
        let engine = Counting {
            inner: LocalCompletion::default(),
            calls: Cell::new(0),
        };
        assert!(ideal.cached_basis().is_none());
        let id = ideal.groebner_basis(&engine, Some(4)).unwrap().id();
        assert_eq!(ideal.groebner_basis(&engine, Some(4)).unwrap().id(), id);
        assert!(ideal.contains(&a.parse("x*x*y - y*x*x").unwrap(), &engine, Some(4)).unwrap());
        assert_eq!(engine.calls.get(), 1);
    }

    #[test]
    fn test_from_basis_skips_completion() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let basis = GroebnerBasis::from_generators(&a, vec![a.parse("x*y").unwrap()]).unwrap();
        let ideal = TwoSidedIdeal::from_basis(basis);
        let engine = Counting {
            inner: LocalCompletion::default(),
            calls: Cell::new(0),
        };
        assert!(!ideal.contains(&a.parse("y*x").unwrap(), &engine, None).unwrap());
        assert_eq!(engine.calls.get(), 0);
    }

    #[test]
    fn test_zero_generators_are_dropped() {
        let a = FreeAlgebra::<Q>::new(&["x"]).unwrap();
        let ideal = TwoSidedIdeal::new(&a, vec![a.zero(), a.generator(0)]).unwrap();
        assert_eq!(ideal.generators().len(), 1);
    }
}
