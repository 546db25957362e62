//! Noncommutative polynomials.
//!
//! An [`NcPoly`] is a finite linear combination of [`Word`]s with nonzero
//! coefficients, stored sorted in descending monomial order so that the
//! leading term is always first.

use std::cmp::Ordering;
use std::fmt;

use ncalg_rings::{Coefficient, Field};

use crate::algebra::FreeAlgebra;
use crate::error::CoreError;
use crate::word::{Letter, Word};

/// A polynomial in a free associative algebra.
///
/// Zero coefficients never appear in `terms`. The `reduced` flag records
/// that the element is already in normal form with respect to some basis;
/// it is a hint only and is ignored by equality.
#[derive(Clone, Debug)]
pub struct NcPoly<R: Coefficient> {
    algebra: FreeAlgebra<R>,
    terms: Vec<(Word, R)>,
    reduced: bool,
}

impl<R: Coefficient> PartialEq for NcPoly<R> {
    fn eq(&self, other: &Self) -> bool {
        self.algebra == other.algebra && self.terms == other.terms
    }
}

impl<R: Coefficient> Eq for NcPoly<R> {}

impl<R: Coefficient> NcPoly<R> {
    /// Creates a polynomial from terms.
    ///
    /// Terms are sorted, like terms are combined and zeros are dropped.
    #[must_use]
    pub fn new(algebra: &FreeAlgebra<R>, terms: Vec<(Word, R)>) -> Self {
        let mut poly = Self {
            algebra: algebra.clone(),
            terms,
            reduced: false,
        };
        poly.normalize();
        poly
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(algebra: &FreeAlgebra<R>) -> Self {
        Self {
            algebra: algebra.clone(),
            terms: Vec::new(),
            reduced: true,
        }
    }

    /// Builds from terms already sorted in strictly descending order with
    /// nonzero coefficients.
    fn from_sorted(algebra: &FreeAlgebra<R>, terms: Vec<(Word, R)>) -> Self {
        Self {
            algebra: algebra.clone(),
            terms,
            reduced: false,
        }
    }

    fn normalize(&mut self) {
        let algebra = &self.algebra;
        self.terms.sort_by(|a, b| algebra.compare(&b.0, &a.0));

        let mut out: Vec<(Word, R)> = Vec::with_capacity(self.terms.len());
        for (w, c) in self.terms.drain(..) {
            match out.last_mut() {
                Some((lw, lc)) if *lw == w => *lc = lc.clone() + c,
                _ => out.push((w, c)),
            }
        }
        out.retain(|(_, c)| !c.is_zero());
        self.terms = out;
    }

    /// The algebra this polynomial lives in.
    #[must_use]
    pub fn algebra(&self) -> &FreeAlgebra<R> {
        &self.algebra
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the terms, leading term first.
    #[must_use]
    pub fn terms(&self) -> &[(Word, R)] {
        &self.terms
    }

    /// Consumes the polynomial, returning its terms.
    #[must_use]
    pub fn into_terms(self) -> Vec<(Word, R)> {
        self.terms
    }

    /// Returns the leading term.
    #[must_use]
    pub fn leading_term(&self) -> Option<&(Word, R)> {
        self.terms.first()
    }

    /// Returns the leading word.
    #[must_use]
    pub fn leading_word(&self) -> Option<&Word> {
        self.terms.first().map(|(w, _)| w)
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&R> {
        self.terms.first().map(|(_, c)| c)
    }

    /// Weighted degree of the leading word (0 for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.leading_word()
            .map_or(0, |w| self.algebra.word_degree(w))
    }

    /// Smallest weighted degree of any term (0 for the zero polynomial).
    #[must_use]
    pub fn min_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|(w, _)| self.algebra.word_degree(w))
            .min()
            .unwrap_or(0)
    }

    /// Returns true if all terms have the same weighted degree.
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        self.degree() == self.min_degree()
    }

    /// The terms of weighted degree exactly `d`.
    #[must_use]
    pub fn homogeneous_component(&self, d: u32) -> Self {
        let terms = self
            .terms
            .iter()
            .filter(|(w, _)| self.algebra.word_degree(w) == d)
            .cloned()
            .collect();
        Self::from_sorted(&self.algebra, terms)
    }

    /// Coefficient of `word`, zero if absent.
    #[must_use]
    pub fn coefficient_of(&self, word: &Word) -> R {
        self.terms
            .binary_search_by(|(w, _)| self.algebra.compare(word, w))
            .map_or_else(|_| R::zero(), |i| self.terms[i].1.clone())
    }

    /// Returns true if the element is flagged as already reduced.
    #[must_use]
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }

    /// Sets the reduced flag.
    #[must_use]
    pub fn mark_reduced(mut self) -> Self {
        self.reduced = true;
        self
    }

    fn check_algebra(&self, other: &Self) -> Result<(), CoreError> {
        if self.algebra == other.algebra {
            Ok(())
        } else {
            Err(CoreError::AlgebraMismatch)
        }
    }

    /// Adds two polynomials.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different algebras.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        assert!(self.algebra == other.algebra, "operands belong to different algebras");
        self.merge(other, false)
    }

    /// Subtracts two polynomials.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different algebras.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        assert!(self.algebra == other.algebra, "operands belong to different algebras");
        self.merge(other, true)
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlgebraMismatch`] for foreign operands.
    pub fn try_add(&self, other: &Self) -> Result<Self, CoreError> {
        self.check_algebra(other)?;
        Ok(self.merge(other, false))
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlgebraMismatch`] for foreign operands.
    pub fn try_sub(&self, other: &Self) -> Result<Self, CoreError> {
        self.check_algebra(other)?;
        Ok(self.merge(other, true))
    }

    /// Merges two sorted term lists.
    fn merge(&self, other: &Self, negate: bool) -> Self {
        let rhs = |c: &R| if negate { -c.clone() } else { c.clone() };
        let mut terms = Vec::with_capacity(self.len() + other.len());
        let (mut i, mut j) = (0, 0);

        while i < self.terms.len() && j < other.terms.len() {
            let (wa, ca) = &self.terms[i];
            let (wb, cb) = &other.terms[j];
            match self.algebra.compare(wa, wb) {
                Ordering::Greater => {
                    terms.push((wa.clone(), ca.clone()));
                    i += 1;
                }
                Ordering::Less => {
                    terms.push((wb.clone(), rhs(cb)));
                    j += 1;
                }
                Ordering::Equal => {
                    let c = ca.clone() + rhs(cb);
                    if !c.is_zero() {
                        terms.push((wa.clone(), c));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        terms.extend(self.terms[i..].iter().cloned());
        terms.extend(other.terms[j..].iter().map(|(w, c)| (w.clone(), rhs(c))));

        Self::from_sorted(&self.algebra, terms)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::from_sorted(
            &self.algebra,
            self.terms.iter().map(|(w, c)| (w.clone(), -c.clone())).collect(),
        )
    }

    /// Multiplies two polynomials.
    ///
    /// # Panics
    ///
    /// Panics if the operands belong to different algebras.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        assert!(self.algebra == other.algebra, "operands belong to different algebras");
        self.mul_unchecked(other)
    }

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::AlgebraMismatch`] for foreign operands.
    pub fn try_mul(&self, other: &Self) -> Result<Self, CoreError> {
        self.check_algebra(other)?;
        Ok(self.mul_unchecked(other))
    }

    fn mul_unchecked(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero(&self.algebra);
        }

        let mut terms = Vec::with_capacity(self.len() * other.len());
        for (w1, c1) in &self.terms {
            for (w2, c2) in &other.terms {
                terms.push((w1.concat(w2), c1.clone() * c2.clone()));
            }
        }

        Self::new(&self.algebra, terms)
    }

    /// Computes `self^n` by repeated squaring.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = self.algebra.one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul_unchecked(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul_unchecked(&base);
            }
        }

        result
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero(&self.algebra);
        }

        let terms = self
            .terms
            .iter()
            .map(|(w, x)| (w.clone(), x.clone() * c.clone()))
            .filter(|(_, x)| !x.is_zero())
            .collect();
        Self::from_sorted(&self.algebra, terms)
    }

    /// Computes `c * prefix * self * suffix`.
    ///
    /// Wrapping every word in the same prefix and suffix preserves the
    /// term order, so no re-sort is needed.
    #[must_use]
    pub fn mul_word(&self, prefix: &Word, suffix: &Word, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero(&self.algebra);
        }

        let terms = self
            .terms
            .iter()
            .map(|(w, x)| (w.wrap(prefix, suffix), c.clone() * x.clone()))
            .filter(|(_, x)| !x.is_zero())
            .collect();
        Self::from_sorted(&self.algebra, terms)
    }

    /// Rewrites every word with `map` and moves the result into `target`.
    ///
    /// Used to embed polynomials into an extended algebra and to project
    /// them back.
    #[must_use]
    pub fn map_into(&self, target: &FreeAlgebra<R>, map: impl Fn(Letter) -> Letter) -> Self {
        let terms = self
            .terms
            .iter()
            .map(|(w, c)| (w.map_letters(&map), c.clone()))
            .collect();
        Self::new(target, terms)
    }
}

impl<F: Field> NcPoly<F> {
    /// Scales so that the leading coefficient is one.
    ///
    /// The zero polynomial is returned unchanged.
    #[must_use]
    pub fn make_monic(&self) -> Self {
        match self.leading_coeff().and_then(Field::inv) {
            Some(inv) => {
                let mut monic = self.scale(&inv);
                monic.reduced = self.reduced;
                monic
            }
            None => self.clone(),
        }
    }
}

impl<R: Coefficient> std::ops::Add for &NcPoly<R> {
    type Output = NcPoly<R>;

    fn add(self, rhs: Self) -> NcPoly<R> {
        NcPoly::add(self, rhs)
    }
}

impl<R: Coefficient> std::ops::Sub for &NcPoly<R> {
    type Output = NcPoly<R>;

    fn sub(self, rhs: Self) -> NcPoly<R> {
        NcPoly::sub(self, rhs)
    }
}

impl<R: Coefficient> std::ops::Mul for &NcPoly<R> {
    type Output = NcPoly<R>;

    fn mul(self, rhs: Self) -> NcPoly<R> {
        NcPoly::mul(self, rhs)
    }
}

impl<R: Coefficient> std::ops::Neg for &NcPoly<R> {
    type Output = NcPoly<R>;

    fn neg(self) -> NcPoly<R> {
        NcPoly::neg(self)
    }
}

impl<R: Coefficient> fmt::Display for NcPoly<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        for (i, (w, c)) in self.terms.iter().enumerate() {
            let term = if w.is_empty() {
                c.to_string()
            } else if c.is_one() {
                self.algebra.format_word(w)
            } else if (-c.clone()).is_one() {
                format!("-{}", self.algebra.format_word(w))
            } else {
                format!("{c}*{}", self.algebra.format_word(w))
            };

            if i == 0 {
                write!(f, "{term}")?;
            } else if let Some(rest) = term.strip_prefix('-') {
                write!(f, " - {rest}")?;
            } else {
                write!(f, " + {term}")?;
            }
        }
        Ok(())
    }
}
