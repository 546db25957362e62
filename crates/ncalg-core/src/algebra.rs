//! Free associative algebras.
//!
//! A [`FreeAlgebra`] is a scoped handle: it owns the generator names and
//! weights, and every polynomial built from it carries a clone of the
//! handle. Two handles compare equal only if they come from the same
//! construction, so polynomials of unrelated algebras never mix silently.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use ncalg_rings::Coefficient;

use crate::error::CoreError;
use crate::ordering::cmp_deglex;
use crate::parse::parse_poly;
use crate::poly::NcPoly;
use crate::word::{Letter, Word};

static NEXT_ALGEBRA_ID: AtomicU64 = AtomicU64::new(1);

struct AlgebraData {
    id: u64,
    names: Vec<String>,
    weights: Vec<u32>,
}

/// The free associative algebra `R<x_0, ..., x_{n-1}>` over a coefficient
/// ring `R`.
pub struct FreeAlgebra<R> {
    data: Arc<AlgebraData>,
    _coeff: PhantomData<fn() -> R>,
}

impl<R> Clone for FreeAlgebra<R> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            _coeff: PhantomData,
        }
    }
}

impl<R> PartialEq for FreeAlgebra<R> {
    fn eq(&self, other: &Self) -> bool {
        self.data.id == other.data.id
    }
}

impl<R> Eq for FreeAlgebra<R> {}

impl<R> fmt::Debug for FreeAlgebra<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FreeAlgebra")
            .field("id", &self.data.id)
            .field("names", &self.data.names)
            .field("weights", &self.data.weights)
            .finish()
    }
}

impl<R> fmt::Display for FreeAlgebra<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.data.names.join(", "))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl<R> FreeAlgebra<R> {
    /// Creates an algebra whose generators all have weight 1.
    ///
    /// # Errors
    ///
    /// Fails if a name is not an identifier or appears twice.
    pub fn new(names: &[&str]) -> Result<Self, CoreError> {
        Self::with_weights(names, &vec![1; names.len()])
    }

    /// Creates an algebra with explicit positive generator weights.
    ///
    /// # Errors
    ///
    /// Fails on invalid or duplicate names, a weight count different from
    /// the name count, or a zero weight.
    pub fn with_weights(names: &[&str], weights: &[u32]) -> Result<Self, CoreError> {
        if names.len() != weights.len() {
            return Err(CoreError::WeightCountMismatch {
                expected: names.len(),
                found: weights.len(),
            });
        }

        let mut owned: Vec<String> = Vec::with_capacity(names.len());
        for (&name, &weight) in names.iter().zip(weights) {
            if !is_identifier(name) {
                return Err(CoreError::InvalidGeneratorName(name.to_string()));
            }
            if owned.iter().any(|n| n == name) {
                return Err(CoreError::DuplicateGenerator(name.to_string()));
            }
            if weight == 0 {
                return Err(CoreError::NonPositiveWeight(name.to_string()));
            }
            owned.push(name.to_string());
        }

        Ok(Self {
            data: Arc::new(AlgebraData {
                id: NEXT_ALGEBRA_ID.fetch_add(1, AtomicOrdering::Relaxed),
                names: owned,
                weights: weights.to_vec(),
            }),
            _coeff: PhantomData,
        })
    }

    /// A new algebra whose generators are `names` followed by the
    /// generators of `self`.
    ///
    /// The generators of `self` keep their relative order and weights;
    /// letter `k` of `self` becomes letter `k + names.len()`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FreeAlgebra::with_weights`].
    pub fn extend_front(&self, names: &[&str], weights: &[u32]) -> Result<Self, CoreError> {
        if names.len() != weights.len() {
            return Err(CoreError::WeightCountMismatch {
                expected: names.len(),
                found: weights.len(),
            });
        }
        let mut all_names: Vec<&str> = names.to_vec();
        all_names.extend(self.data.names.iter().map(String::as_str));
        let mut all_weights = weights.to_vec();
        all_weights.extend_from_slice(&self.data.weights);
        Self::with_weights(&all_names, &all_weights)
    }

    /// Process-unique id of this algebra.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.data.id
    }

    /// Number of generators.
    #[must_use]
    pub fn num_generators(&self) -> usize {
        self.data.names.len()
    }

    /// Name of generator `letter`.
    #[must_use]
    pub fn name(&self, letter: Letter) -> Option<&str> {
        self.data.names.get(letter as usize).map(String::as_str)
    }

    /// All generator names, in declaration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.data.names
    }

    /// All generator weights, in declaration order.
    #[must_use]
    pub fn weights(&self) -> &[u32] {
        &self.data.weights
    }

    /// Weight of generator `letter` (1 if out of range).
    #[must_use]
    pub fn weight(&self, letter: Letter) -> u32 {
        self.data.weights.get(letter as usize).copied().unwrap_or(1)
    }

    /// Returns true if every generator has weight 1.
    #[must_use]
    pub fn is_standard_graded(&self) -> bool {
        self.data.weights.iter().all(|&w| w == 1)
    }

    /// Looks up a generator by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<Letter> {
        self.data
            .names
            .iter()
            .position(|n| n == name)
            .and_then(|i| Letter::try_from(i).ok())
    }

    /// Weighted degree of a word.
    #[must_use]
    pub fn word_degree(&self, word: &Word) -> u32 {
        word.degree(&self.data.weights)
    }

    /// Compares two words in the monomial order of this algebra.
    #[must_use]
    pub fn compare(&self, a: &Word, b: &Word) -> Ordering {
        cmp_deglex(a, b, &self.data.weights)
    }

    /// Renders a word with generator names, collapsing runs into powers:
    /// `x*y^2*x`. The empty word renders as `1`.
    #[must_use]
    pub fn format_word(&self, word: &Word) -> String {
        if word.is_empty() {
            return "1".to_string();
        }

        let mut parts: Vec<String> = Vec::new();
        let letters = word.letters();
        let mut i = 0;
        while i < letters.len() {
            let mut run = 1;
            while i + run < letters.len() && letters[i + run] == letters[i] {
                run += 1;
            }
            let name = self.name(letters[i]).map_or_else(|| format!("_{}", letters[i]), str::to_string);
            if run == 1 {
                parts.push(name);
            } else {
                parts.push(format!("{name}^{run}"));
            }
            i += run;
        }
        parts.join("*")
    }
}

impl<R: Coefficient> FreeAlgebra<R> {
    /// The generator `x_i` as a polynomial.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range; use [`FreeAlgebra::try_generator`]
    /// for a checked version.
    #[must_use]
    pub fn generator(&self, i: usize) -> NcPoly<R> {
        match self.try_generator(i) {
            Ok(g) => g,
            Err(e) => panic!("{e}"),
        }
    }

    /// The generator `x_i`, or an error if `i` is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::GeneratorOutOfRange`].
    pub fn try_generator(&self, i: usize) -> Result<NcPoly<R>, CoreError> {
        let count = self.num_generators();
        let letter = Letter::try_from(i)
            .ok()
            .filter(|_| i < count)
            .ok_or(CoreError::GeneratorOutOfRange { index: i, count })?;
        Ok(self.monomial(Word::letter(letter), R::one()))
    }

    /// All generators in declaration order.
    #[must_use]
    pub fn generators(&self) -> Vec<NcPoly<R>> {
        (0..self.num_generators()).map(|i| self.generator(i)).collect()
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero(&self) -> NcPoly<R> {
        NcPoly::zero(self)
    }

    /// The unit polynomial.
    #[must_use]
    pub fn one(&self) -> NcPoly<R> {
        self.constant(R::one())
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(&self, c: R) -> NcPoly<R> {
        self.monomial(Word::one(), c)
    }

    /// The polynomial `c * word`.
    #[must_use]
    pub fn monomial(&self, word: Word, c: R) -> NcPoly<R> {
        NcPoly::new(self, vec![(word, c)])
    }

    /// Parses an expression over this algebra's generator names.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] or [`CoreError::UnknownGenerator`].
    pub fn parse(&self, input: &str) -> Result<NcPoly<R>, CoreError> {
        parse_poly(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_rings::Q;

    #[test]
    fn test_validation() {
        assert!(FreeAlgebra::<Q>::new(&["x", "y"]).is_ok());
        assert_eq!(
            FreeAlgebra::<Q>::new(&["x", "x"]).unwrap_err(),
            CoreError::DuplicateGenerator("x".to_string())
        );
        assert_eq!(
            FreeAlgebra::<Q>::new(&["1x"]).unwrap_err(),
            CoreError::InvalidGeneratorName("1x".to_string())
        );
        assert_eq!(
            FreeAlgebra::<Q>::with_weights(&["x", "y"], &[1]).unwrap_err(),
            CoreError::WeightCountMismatch { expected: 2, found: 1 }
        );
        assert!(matches!(
            FreeAlgebra::<Q>::with_weights(&["x"], &[0]),
            Err(CoreError::NonPositiveWeight(_))
        ));
    }

    #[test]
    fn test_handles_are_scoped() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let b = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_generators() {
        let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
        assert_eq!(a.generators().len(), 3);
        assert_eq!(a.generator(1).to_string(), "y");
        assert_eq!(
            a.try_generator(3).unwrap_err(),
            CoreError::GeneratorOutOfRange { index: 3, count: 3 }
        );
        assert_eq!(a.index_of("z"), Some(2));
        assert_eq!(a.index_of("w"), None);
    }

    #[test]
    fn test_format_word() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        assert_eq!(a.format_word(&Word::new(&[0, 1, 1, 0])), "x*y^2*x");
        assert_eq!(a.format_word(&Word::one()), "1");
    }

    #[test]
    fn test_extend_front() {
        let a = FreeAlgebra::<Q>::with_weights(&["x", "y"], &[1, 2]).unwrap();
        let b = a.extend_front(&["r0", "c0"], &[3, 4]).unwrap();
        assert_eq!(b.names(), &["r0", "c0", "x", "y"]);
        assert_eq!(b.weights(), &[3, 4, 1, 2]);
        assert!(a.extend_front(&["x"], &[1]).is_err());
    }
}
