//! Gröbner bases indexed by leading key.
//!
//! A basis maps `(leading word, leading coefficient key)` to the generator
//! carrying that leading data, in the spirit of a reductor store: lookups
//! during reduction are a hash probe per factorization of the term being
//! reduced.

use std::sync::atomic::{AtomicU64, Ordering};

use ncalg_core::{FreeAlgebra, NcPoly, Word};
use ncalg_rings::Coefficient;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::error::GroebnerError;

static NEXT_BASIS_ID: AtomicU64 = AtomicU64::new(1);

/// Leading data of a nonzero polynomial.
pub type LeadKey<R> = (Word, <R as Coefficient>::Key);

/// Read access to a set of reducers, keyed by leading data.
///
/// Implemented by [`GroebnerBasis`] and by the working set of the local
/// completion, so both share one reduction routine.
pub trait Reducers<R: Coefficient> {
    /// Looks up the reducer with exactly this leading data.
    fn find(&self, word: &Word, key: &R::Key) -> Option<&NcPoly<R>>;

    /// Smallest and largest weighted degree of a leading word.
    fn degree_window(&self) -> (u32, u32);

    /// Smallest and largest degree of a leading coefficient key.
    fn coeff_degree_window(&self) -> (u32, u32);

    /// Returns true when there is nothing to reduce by.
    fn is_empty(&self) -> bool;
}

/// A (possibly truncated) Gröbner basis of a two-sided ideal.
///
/// Built once and never mutated afterwards. Every generator is stored
/// under its own leading key; the degree bounds cover all generators.
#[derive(Clone, Debug)]
pub struct GroebnerBasis<R: Coefficient> {
    id: u64,
    algebra: FreeAlgebra<R>,
    elements: Vec<NcPoly<R>>,
    index: FxHashMap<LeadKey<R>, usize>,
    lead_words: FxHashSet<Word>,
    min_degree: u32,
    max_degree: u32,
    min_coeff_degree: u32,
    max_coeff_degree: u32,
    truncated_at: Option<u32>,
}

impl<R: Coefficient> GroebnerBasis<R> {
    /// The empty basis of the zero ideal.
    #[must_use]
    pub fn empty(algebra: &FreeAlgebra<R>) -> Self {
        Self {
            id: NEXT_BASIS_ID.fetch_add(1, Ordering::Relaxed),
            algebra: algebra.clone(),
            elements: Vec::new(),
            index: FxHashMap::default(),
            lead_words: FxHashSet::default(),
            min_degree: 0,
            max_degree: 0,
            min_coeff_degree: 0,
            max_coeff_degree: 0,
            truncated_at: None,
        }
    }

    /// Builds a basis from generators that are already known to form a
    /// Gröbner basis.
    ///
    /// Zero generators are dropped. When two generators share leading
    /// data, the first one is kept.
    ///
    /// # Errors
    ///
    /// Returns [`GroebnerError::AlgebraMismatch`] if a generator belongs to
    /// a different algebra.
    pub fn from_generators(
        algebra: &FreeAlgebra<R>,
        generators: impl IntoIterator<Item = NcPoly<R>>,
    ) -> Result<Self, GroebnerError> {
        let mut basis = Self::empty(algebra);
        for g in generators {
            if g.algebra() != algebra {
                return Err(GroebnerError::AlgebraMismatch);
            }
            basis.insert(g);
        }
        basis.recompute_bounds();
        Ok(basis)
    }

    fn insert(&mut self, g: NcPoly<R>) {
        let Some((word, coeff)) = g.leading_term() else {
            return;
        };
        let key = (word.clone(), coeff.lead_key());
        if self.index.contains_key(&key) {
            trace!(word = ?key.0, "skipping generator with duplicate leading data");
            return;
        }
        self.lead_words.insert(key.0.clone());
        self.index.insert(key, self.elements.len());
        self.elements.push(g);
    }

    fn recompute_bounds(&mut self) {
        let degrees = self.index.keys().map(|(w, _)| self.algebra.word_degree(w));
        self.min_degree = degrees.clone().min().unwrap_or(0);
        self.max_degree = degrees.max().unwrap_or(0);

        let coeff_degrees = self.index.keys().map(|(_, k)| R::key_degree(k));
        self.min_coeff_degree = coeff_degrees.clone().min().unwrap_or(0);
        self.max_coeff_degree = coeff_degrees.max().unwrap_or(0);
    }

    /// Records that this basis is only complete up to weighted degree `d`.
    #[must_use]
    pub fn with_truncation(mut self, degree: Option<u32>) -> Self {
        self.truncated_at = degree;
        self
    }

    /// Process-unique id, used as the key of side-table caches.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The ambient algebra.
    #[must_use]
    pub fn algebra(&self) -> &FreeAlgebra<R> {
        &self.algebra
    }

    /// The generators, in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[NcPoly<R>] {
        &self.elements
    }

    /// Number of generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the basis has no generators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The generator stored under the given leading data.
    #[must_use]
    pub fn get(&self, word: &Word, key: &R::Key) -> Option<&NcPoly<R>> {
        self.index
            .get(&(word.clone(), key.clone()))
            .map(|&i| &self.elements[i])
    }

    /// The leading words of all generators.
    pub fn leading_words(&self) -> impl Iterator<Item = &Word> {
        self.lead_words.iter()
    }

    /// Returns true if some leading word occurs inside `word`.
    #[must_use]
    pub fn divides_some_leading_word(&self, word: &Word) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.lead_words.contains(&Word::one()) {
            return true;
        }
        word.factorizations(self.algebra.weights(), self.min_degree, self.max_degree)
            .iter()
            .any(|f| self.lead_words.contains(&f.matched))
    }

    /// Smallest weighted degree of a leading word.
    #[must_use]
    pub fn min_degree(&self) -> u32 {
        self.min_degree
    }

    /// Largest weighted degree of a leading word.
    #[must_use]
    pub fn max_degree(&self) -> u32 {
        self.max_degree
    }

    /// Smallest degree of a leading coefficient key.
    #[must_use]
    pub fn min_coeff_degree(&self) -> u32 {
        self.min_coeff_degree
    }

    /// Largest degree of a leading coefficient key.
    #[must_use]
    pub fn max_coeff_degree(&self) -> u32 {
        self.max_coeff_degree
    }

    /// The degree this basis was truncated at, if any.
    #[must_use]
    pub fn truncated_at(&self) -> Option<u32> {
        self.truncated_at
    }
}

impl<R: Coefficient> Reducers<R> for GroebnerBasis<R> {
    fn find(&self, word: &Word, key: &R::Key) -> Option<&NcPoly<R>> {
        self.get(word, key)
    }

    fn degree_window(&self) -> (u32, u32) {
        (self.min_degree, self.max_degree)
    }

    fn coeff_degree_window(&self) -> (u32, u32) {
        (self.min_coeff_degree, self.max_coeff_degree)
    }

    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
