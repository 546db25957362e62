//! Quotient algebras `A = k<X> / I`.
//!
//! Elements are represented by their normal forms; every product is
//! reduced through the basis before it is returned.

use ncalg_core::{CoreError, FreeAlgebra, NcPoly, Word};
use ncalg_rings::Field;
use tracing::warn;

use crate::basis::GroebnerBasis;
use crate::reduce::normal_form;

/// The quotient of a free algebra by an ideal with known Gröbner basis.
#[derive(Clone, Debug)]
pub struct QuotientAlgebra<F: Field> {
    basis: GroebnerBasis<F>,
}

impl<F: Field> QuotientAlgebra<F> {
    /// Creates the quotient by the ideal `basis` generates.
    #[must_use]
    pub fn new(basis: GroebnerBasis<F>) -> Self {
        Self { basis }
    }

    /// The ambient free algebra.
    #[must_use]
    pub fn algebra(&self) -> &FreeAlgebra<F> {
        self.basis.algebra()
    }

    /// The Gröbner basis of the ideal.
    #[must_use]
    pub fn basis(&self) -> &GroebnerBasis<F> {
        &self.basis
    }

    /// Normal form of `f`.
    #[must_use]
    pub fn reduce(&self, f: &NcPoly<F>) -> NcPoly<F> {
        normal_form(f, &self.basis)
    }

    /// Parses and reduces an expression.
    ///
    /// # Errors
    ///
    /// Returns the parser's error.
    pub fn element(&self, input: &str) -> Result<NcPoly<F>, CoreError> {
        Ok(self.reduce(&self.algebra().parse(input)?))
    }

    /// The image of generator `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn generator(&self, i: usize) -> NcPoly<F> {
        self.reduce(&self.algebra().generator(i))
    }

    /// Returns true if `f` is zero in the quotient.
    #[must_use]
    pub fn is_zero(&self, f: &NcPoly<F>) -> bool {
        self.reduce(f).is_zero()
    }

    /// Sum in the quotient.
    #[must_use]
    pub fn add(&self, a: &NcPoly<F>, b: &NcPoly<F>) -> NcPoly<F> {
        self.reduce(&a.add(b))
    }

    /// Difference in the quotient.
    #[must_use]
    pub fn sub(&self, a: &NcPoly<F>, b: &NcPoly<F>) -> NcPoly<F> {
        self.reduce(&a.sub(b))
    }

    /// Product in the quotient.
    #[must_use]
    pub fn mul(&self, a: &NcPoly<F>, b: &NcPoly<F>) -> NcPoly<F> {
        self.reduce(&a.mul(b))
    }

    /// `a^n`, reducing after every multiplication.
    #[must_use]
    pub fn pow(&self, a: &NcPoly<F>, n: u32) -> NcPoly<F> {
        let mut result = self.reduce(&self.algebra().one());
        let mut base = self.reduce(a);
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul(&result, &base);
            }
            exp >>= 1;
            if exp > 0 {
                base = self.mul(&base, &base);
            }
        }

        result
    }

    /// The commutator `a*b - b*a`, reduced.
    #[must_use]
    pub fn commutator(&self, a: &NcPoly<F>, b: &NcPoly<F>) -> NcPoly<F> {
        self.reduce(&a.mul(b).sub(&b.mul(a)))
    }

    /// Returns true if `f` commutes with every generator.
    #[must_use]
    pub fn is_central(&self, f: &NcPoly<F>) -> bool {
        self.algebra()
            .generators()
            .iter()
            .all(|x| self.commutator(f, x).is_zero())
    }

    /// Normal words of weighted degree exactly `d`, largest first.
    ///
    /// These form a vector-space basis of the degree-`d` part of the
    /// quotient, provided the basis is complete up to degree `d`.
    #[must_use]
    pub fn normal_words(&self, d: u32) -> Vec<Word> {
        let mut table = self.normal_word_table(d);
        table.pop().unwrap_or_default()
    }

    /// Dimensions of the homogeneous parts in degrees `0..=up_to`.
    #[must_use]
    pub fn hilbert_function(&self, up_to: u32) -> Vec<usize> {
        self.normal_word_table(up_to).iter().map(Vec::len).collect()
    }

    /// Normal words of every degree `0..=d`, each list largest first.
    fn normal_word_table(&self, d: u32) -> Vec<Vec<Word>> {
        if let Some(t) = self.basis.truncated_at() {
            if d > t {
                warn!(degree = d, truncated_at = t, "normal words above the truncation degree");
            }
        }

        let algebra = self.algebra();
        let lead_words: Vec<&Word> = self.basis.leading_words().collect();
        let n = algebra.num_generators();
        let mut table: Vec<Vec<Word>> = Vec::with_capacity(d as usize + 1);

        for e in 0..=d {
            let mut words = Vec::new();
            if e == 0 {
                if !lead_words.iter().any(|w| w.is_empty()) {
                    words.push(Word::one());
                }
            } else {
                for letter in 0..n {
                    let Ok(letter) = u32::try_from(letter) else {
                        continue;
                    };
                    let w = algebra.weight(letter);
                    if w > e {
                        continue;
                    }
                    let suffix = Word::letter(letter);
                    for u in &table[(e - w) as usize] {
                        // u is normal, so only a suffix of u*x can be a leading word
                        let candidate = u.concat(&suffix);
                        if !lead_words.iter().any(|lw| lw.is_suffix_of(&candidate)) {
                            words.push(candidate);
                        }
                    }
                }
            }
            words.sort_by(|a, b| algebra.compare(b, a));
            table.push(words);
        }

        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::LocalCompletion;
    use crate::engine::BasisEngine;
    use crate::relations::skew_polynomial_ring_relations;
    use ncalg_rings::Q;

    fn skew() -> QuotientAlgebra<Q> {
        let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
        let rels = skew_polynomial_ring_relations(&a, &Q::from_integer(-1));
        QuotientAlgebra::new(LocalCompletion::default().complete(&a, &rels, Some(6)).unwrap())
    }

    #[test]
    fn test_products_are_reduced() {
        let q = skew();
        let (x, y) = (q.generator(0), q.generator(1));
        let xy = q.mul(&x, &y);
        let yx = q.mul(&y, &x);
        assert_eq!(q.add(&xy, &yx), q.algebra().zero());
        assert!(xy.is_reduced());
    }

    #[test]
    fn test_pow_and_commutator() {
        let q = skew();
        let x = q.generator(0);
        let y = q.generator(1);
        // (x + y)^2 = x^2 + y^2 since xy = -yx
        let s = q.pow(&x.add(&y), 2);
        assert_eq!(s, q.element("x^2 + y^2").unwrap());
        assert_eq!(q.commutator(&x, &y), q.element("-2*y*x").unwrap());
        assert_eq!(q.pow(&x, 0), q.algebra().one());
    }

    #[test]
    fn test_centrality() {
        let q = skew();
        // squares of generators are central in the skew-commutative ring
        assert!(q.is_central(&q.element("x^2").unwrap()));
        assert!(!q.is_central(&q.element("x").unwrap()));
        assert!(q.is_central(&q.algebra().one()));
    }

    #[test]
    fn test_hilbert_function_of_skew_polynomial_ring() {
        let q = skew();
        // same as a commutative polynomial ring in three variables
        assert_eq!(q.hilbert_function(4), vec![1, 3, 6, 10, 15]);
        let words = q.normal_words(2);
        assert_eq!(words.len(), 6);
        for w in &words {
            assert!(!q.basis().divides_some_leading_word(w));
        }
    }

    #[test]
    fn test_free_algebra_has_all_words() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let q = QuotientAlgebra::new(GroebnerBasis::empty(&a));
        assert_eq!(q.hilbert_function(3), vec![1, 2, 4, 8]);
        let words = q.normal_words(2);
        // largest first: xx > xy > yx > yy
        assert_eq!(
            words,
            vec![
                Word::new(&[0, 0]),
                Word::new(&[0, 1]),
                Word::new(&[1, 0]),
                Word::new(&[1, 1])
            ]
        );
    }

    #[test]
    fn test_weighted_normal_words() {
        let a = FreeAlgebra::<Q>::with_weights(&["x", "y"], &[1, 2]).unwrap();
        let q = QuotientAlgebra::new(GroebnerBasis::empty(&a));
        // degree 2: x*x and y
        assert_eq!(q.normal_words(2).len(), 2);
        assert_eq!(q.hilbert_function(3), vec![1, 1, 2, 3]);
    }
}
