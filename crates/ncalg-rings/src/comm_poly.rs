//! Commutative polynomial coefficients F[t_0, t_1, ...].
//!
//! These are used when a free algebra has coefficients that are not a
//! field. Reduction then matches on the leading *term* of a coefficient:
//! its commutative monomial is the [`Coefficient::Key`], and divisibility
//! is monomial divisibility.

use std::cmp::Ordering;

use dashu::integer::IBig;
use smallvec::SmallVec;

use crate::traits::{Coefficient, Field, FieldKind, Ring};

/// A commutative monomial t_0^e_0 t_1^e_1 ..., trailing zero exponents
/// trimmed so that equal monomials compare equal regardless of how many
/// variables they were built with.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct CoeffMonomial(SmallVec<[u16; 4]>);

impl CoeffMonomial {
    /// Creates a monomial from exponents.
    #[must_use]
    pub fn new(exps: &[u16]) -> Self {
        let mut exps: SmallVec<[u16; 4]> = exps.iter().copied().collect();
        while exps.last() == Some(&0) {
            exps.pop();
        }
        Self(exps)
    }

    /// The monomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self(SmallVec::new())
    }

    /// The monomial t_i.
    #[must_use]
    pub fn var(i: usize) -> Self {
        let mut exps: SmallVec<[u16; 4]> = SmallVec::from_elem(0, i + 1);
        exps[i] = 1;
        Self(exps)
    }

    /// Exponent of t_i.
    #[must_use]
    pub fn exponent(&self, i: usize) -> u16 {
        self.0.get(i).copied().unwrap_or(0)
    }

    /// The exponents, without trailing zeros.
    #[must_use]
    pub fn exponents(&self) -> &[u16] {
        &self.0
    }

    /// Total degree.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.0.iter().map(|&e| u32::from(e)).sum()
    }

    /// Returns true for the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Multiplies two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let n = self.0.len().max(other.0.len());
        let exps: SmallVec<[u16; 4]> = (0..n)
            .map(|i| self.exponent(i).saturating_add(other.exponent(i)))
            .collect();
        Self(exps)
    }

    /// Divides by `other`, if divisible.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        if !other.divides(self) {
            return None;
        }
        let exps: Vec<u16> = (0..self.0.len())
            .map(|i| self.exponent(i) - other.exponent(i))
            .collect();
        Some(Self::new(&exps))
    }

    /// Checks whether `self` divides `other`.
    #[must_use]
    pub fn divides(&self, other: &Self) -> bool {
        self.0.len() <= other.0.len()
            && self.0.iter().zip(other.0.iter()).all(|(a, b)| a <= b)
    }

    /// All divisors of `self` with total degree in `[min, max]`.
    #[must_use]
    pub fn divisors_in_range(&self, min: u32, max: u32) -> Vec<Self> {
        let mut out = Vec::new();
        let mut current = vec![0u16; self.0.len()];
        self.collect_divisors(0, 0, min, max, &mut current, &mut out);
        out
    }

    fn collect_divisors(
        &self,
        var: usize,
        degree: u32,
        min: u32,
        max: u32,
        current: &mut Vec<u16>,
        out: &mut Vec<Self>,
    ) {
        if degree > max {
            return;
        }
        if var == self.0.len() {
            if degree >= min {
                out.push(Self::new(current));
            }
            return;
        }
        for e in 0..=self.0[var] {
            current[var] = e;
            self.collect_divisors(var + 1, degree + u32::from(e), min, max, current, out);
        }
        current[var] = 0;
    }

    /// Graded lexicographic comparison (t_0 > t_1 > ...).
    #[must_use]
    pub fn cmp_grlex(&self, other: &Self) -> Ordering {
        self.degree().cmp(&other.degree()).then_with(|| {
            let n = self.0.len().max(other.0.len());
            for i in 0..n {
                match self.exponent(i).cmp(&other.exponent(i)) {
                    Ordering::Equal => continue,
                    ord => return ord,
                }
            }
            Ordering::Equal
        })
    }
}

impl std::fmt::Display for CoeffMonomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        let mut first = true;
        for (i, &e) in self.0.iter().enumerate() {
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if e == 1 {
                write!(f, "t{i}")?;
            } else {
                write!(f, "t{i}^{e}")?;
            }
        }
        Ok(())
    }
}

/// A commutative polynomial over a field, used as a coefficient ring.
///
/// Terms are stored sorted by descending graded-lex order with no zero
/// coefficients.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommPoly<F: Field> {
    terms: Vec<(CoeffMonomial, F)>,
}

impl<F: Field> CommPoly<F> {
    /// Creates a polynomial from terms, sorting and combining like terms.
    #[must_use]
    pub fn new(terms: Vec<(CoeffMonomial, F)>) -> Self {
        let mut poly = Self { terms };
        poly.normalize();
        poly
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: F) -> Self {
        Self::new(vec![(CoeffMonomial::one(), c)])
    }

    /// The variable t_i.
    #[must_use]
    pub fn var(i: usize) -> Self {
        Self {
            terms: vec![(CoeffMonomial::var(i), F::one())],
        }
    }

    /// The terms, leading term first.
    #[must_use]
    pub fn terms(&self) -> &[(CoeffMonomial, F)] {
        &self.terms
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The leading term.
    #[must_use]
    pub fn leading_term(&self) -> Option<&(CoeffMonomial, F)> {
        self.terms.first()
    }

    /// Sorts terms and combines like terms.
    fn normalize(&mut self) {
        self.terms.sort_by(|a, b| b.0.cmp_grlex(&a.0));

        let mut merged: Vec<(CoeffMonomial, F)> = Vec::with_capacity(self.terms.len());
        for (m, c) in self.terms.drain(..) {
            match merged.last_mut() {
                Some((last, acc)) if *last == m => *acc = acc.clone() + c,
                _ => merged.push((m, c)),
            }
        }
        merged.retain(|(_, c)| !c.is_zero());
        self.terms = merged;
    }

    fn mul_term(&self, m: &CoeffMonomial, c: &F) -> Self {
        Self::new(
            self.terms
                .iter()
                .map(|(m2, c2)| (m.mul(m2), c2.clone() * c.clone()))
                .collect(),
        )
    }
}

impl<F: Field> Ring for CommPoly<F> {
    fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    fn one() -> Self {
        Self::constant(F::one())
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn is_one(&self) -> bool {
        self.terms.len() == 1 && self.terms[0].0.is_one() && self.terms[0].1.is_one()
    }

    fn from_integer(n: &IBig) -> Self {
        Self::constant(F::from_integer(n))
    }
}

impl<F: Field> Coefficient for CommPoly<F> {
    type Key = CoeffMonomial;

    const IS_FIELD: bool = false;

    fn lead_key(&self) -> Self::Key {
        self.terms
            .first()
            .map_or_else(CoeffMonomial::one, |(m, _)| m.clone())
    }

    fn key_degree(key: &Self::Key) -> u32 {
        key.degree()
    }

    fn key_divisors(key: &Self::Key, min: u32, max: u32) -> Vec<Self::Key> {
        key.divisors_in_range(min, max)
    }

    fn lead_part(&self) -> Self {
        Self {
            terms: self.terms.first().cloned().into_iter().collect(),
        }
    }

    fn divide_exact(&self, divisor: &Self) -> Option<Self> {
        let (lm_d, lc_d) = divisor.leading_term()?;
        let lc_inv = lc_d.inv()?;

        let mut remainder = self.clone();
        let mut quotient = Vec::new();
        while let Some((lm_r, lc_r)) = remainder.leading_term().cloned() {
            let m = lm_r.div(lm_d)?;
            let c = lc_r * lc_inv.clone();
            remainder = remainder - divisor.mul_term(&m, &c);
            quotient.push((m, c));
        }

        Some(Self::new(quotient))
    }

    fn kind() -> FieldKind {
        FieldKind::Other("commutative polynomial coefficients")
    }
}

impl<F: Field> std::ops::Add for CommPoly<F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut terms = self.terms;
        terms.extend(rhs.terms);
        Self::new(terms)
    }
}

impl<F: Field> std::ops::Neg for CommPoly<F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            terms: self.terms.into_iter().map(|(m, c)| (m, -c)).collect(),
        }
    }
}

impl<F: Field> std::ops::Sub for CommPoly<F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<F: Field> std::ops::Mul for CommPoly<F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut terms = Vec::with_capacity(self.len() * rhs.len());
        for (m1, c1) in &self.terms {
            for (m2, c2) in &rhs.terms {
                terms.push((m1.mul(m2), c1.clone() * c2.clone()));
            }
        }
        Self::new(terms)
    }
}

impl<F: Field> std::fmt::Display for CommPoly<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms: Vec<String> = self
            .terms
            .iter()
            .map(|(m, c)| {
                if m.is_one() {
                    format!("{c}")
                } else if c.is_one() {
                    format!("{m}")
                } else {
                    format!("{c}*{m}")
                }
            })
            .collect();

        write!(f, "({})", terms.join(" + "))
    }
}
