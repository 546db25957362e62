//! Coordinates in a graded piece of a quotient algebra.

use ncalg_core::{NcPoly, Word};
use ncalg_groebner::QuotientAlgebra;
use ncalg_rings::Field;
use rustc_hash::FxHashMap;

use crate::error::MatrixError;

/// The degree-`d` part of a quotient algebra with its normal-word basis.
#[derive(Clone, Debug)]
pub struct GradedPiece {
    degree: u32,
    words: Vec<Word>,
    index: FxHashMap<Word, usize>,
}

impl GradedPiece {
    /// The piece of `quotient` in degree `degree`.
    #[must_use]
    pub fn new<F: Field>(quotient: &QuotientAlgebra<F>, degree: u32) -> Self {
        let words = quotient.normal_words(degree);
        let index = words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
        Self { degree, words, index }
    }

    /// The degree.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.degree
    }

    /// The dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.words.len()
    }

    /// The basis words, largest first.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Coordinates of a reduced element.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::OutsidePiece`] if a term is not a normal
    /// word of this degree.
    pub fn coordinates<F: Field>(&self, f: &NcPoly<F>) -> Result<Vec<F>, MatrixError> {
        let mut v = vec![F::zero(); self.dim()];
        for (word, c) in f.terms() {
            let i = self
                .index
                .get(word)
                .ok_or(MatrixError::OutsidePiece { degree: self.degree })?;
            v[*i] = c.clone();
        }
        Ok(v)
    }

    /// The element with the given coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `coords` has the wrong length.
    #[must_use]
    pub fn element<F: Field>(&self, quotient: &QuotientAlgebra<F>, coords: &[F]) -> NcPoly<F> {
        assert_eq!(coords.len(), self.dim(), "coordinate vector has the wrong length");
        let terms = self
            .words
            .iter()
            .zip(coords)
            .filter(|(_, c)| !c.is_zero())
            .map(|(w, c)| (w.clone(), c.clone()))
            .collect();
        NcPoly::new(quotient.algebra(), terms).mark_reduced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_core::FreeAlgebra;
    use ncalg_groebner::GroebnerBasis;
    use ncalg_rings::{Ring, Q};

    fn commutative() -> QuotientAlgebra<Q> {
        let a = FreeAlgebra::new(&["x", "y"]).unwrap();
        let basis = GroebnerBasis::from_generators(&a, [a.parse("x*y - y*x").unwrap()]).unwrap();
        QuotientAlgebra::new(basis)
    }

    #[test]
    fn test_piece_dimension() {
        let q = commutative();
        assert_eq!(GradedPiece::new(&q, 0).dim(), 1);
        assert_eq!(GradedPiece::new(&q, 2).dim(), 3);
        assert_eq!(GradedPiece::new(&q, 4).dim(), 5);
    }

    #[test]
    fn test_coordinates() {
        let q = commutative();
        let piece = GradedPiece::new(&q, 2);
        let f = q.element("2*x*y + y^2").unwrap();
        let v = piece.coordinates(&f).unwrap();
        assert_eq!(v.iter().filter(|c| !c.is_zero()).count(), 2);
        assert_eq!(piece.element(&q, &v), f);

        let g = q.element("x").unwrap();
        assert!(matches!(
            piece.coordinates(&g),
            Err(MatrixError::OutsidePiece { degree: 2 })
        ));
    }
}
