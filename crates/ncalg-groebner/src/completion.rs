//! Local degree-truncated completion.
//!
//! A noncommutative Buchberger procedure: critical pairs are processed
//! lowest degree first, each overlap polynomial is reduced by the current
//! set, and nonzero remainders join the set. A new element whose leading
//! word occurs inside an existing leading word evicts that element, which
//! is reduced again later. Pairs above the degree limit are skipped, so
//! the result is a Gröbner basis up to that degree.
//!
//! After the pair queue drains, a verification pass recomputes every
//! overlap; the set is then interreduced.

use std::collections::BinaryHeap;

use ncalg_core::{FreeAlgebra, NcPoly, Word};
use ncalg_rings::Field;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::basis::{GroebnerBasis, Reducers};
use crate::engine::BasisEngine;
use crate::error::GroebnerError;
use crate::overlap::{overlap_polynomial, overlaps, CriticalPair};
use crate::reduce::{reduce_with, SmallestGenerator};

/// Configuration for the local completion.
#[derive(Clone, Debug)]
pub struct CompletionConfig {
    /// Default degree limit when the caller passes none (0 = no limit).
    pub max_degree: u32,
    /// Abort once the working set grows past this many elements.
    pub max_basis_size: usize,
    /// Run the final overlap verification pass.
    pub verify: bool,
    /// Interreduce the final set.
    pub interreduce: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_degree: 0,
            max_basis_size: 10_000,
            verify: true,
            interreduce: true,
        }
    }
}

impl CompletionConfig {
    /// Sets the default degree limit.
    #[must_use]
    pub fn with_max_degree(mut self, max_degree: u32) -> Self {
        self.max_degree = max_degree;
        self
    }

    /// Sets the working-set size limit.
    #[must_use]
    pub fn with_max_basis_size(mut self, max_basis_size: usize) -> Self {
        self.max_basis_size = max_basis_size;
        self
    }

    /// Enables or disables the verification pass.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Enables or disables final interreduction.
    #[must_use]
    pub fn with_interreduce(mut self, interreduce: bool) -> Self {
        self.interreduce = interreduce;
        self
    }
}

/// In-process basis engine.
#[derive(Clone, Debug, Default)]
pub struct LocalCompletion {
    config: CompletionConfig,
}

impl LocalCompletion {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

impl<F: Field> BasisEngine<F> for LocalCompletion {
    fn name(&self) -> &'static str {
        "local"
    }

    fn complete(
        &self,
        algebra: &FreeAlgebra<F>,
        generators: &[NcPoly<F>],
        degree_limit: Option<u32>,
    ) -> Result<GroebnerBasis<F>, GroebnerError> {
        if generators.iter().any(|g| g.algebra() != algebra) {
            return Err(GroebnerError::AlgebraMismatch);
        }

        let limit = degree_limit.or((self.config.max_degree > 0).then_some(self.config.max_degree));
        let mut state = Completion::new(algebra, limit, &self.config);
        state.pending.extend(generators.iter().cloned());
        state.run()?;

        if self.config.verify {
            while state.verify() {
                state.run()?;
            }
        }
        if self.config.interreduce {
            state.interreduce();
        }

        let elements = state.into_elements();
        debug!(size = elements.len(), limit = ?limit, "local completion finished");
        Ok(GroebnerBasis::from_generators(algebra, elements)?.with_truncation(limit))
    }
}

/// Mutable working set of the completion.
struct Completion<'a, F: Field> {
    algebra: FreeAlgebra<F>,
    limit: Option<u32>,
    config: &'a CompletionConfig,
    /// `None` marks an evicted element; pairs referring to it are stale.
    elements: Vec<Option<NcPoly<F>>>,
    index: FxHashMap<Word, usize>,
    pending: Vec<NcPoly<F>>,
    pairs: BinaryHeap<CriticalPair>,
    next_seq: u64,
    min_degree: u32,
    max_degree: u32,
}

impl<F: Field> Reducers<F> for Completion<'_, F> {
    fn find(&self, word: &Word, _key: &F::Key) -> Option<&NcPoly<F>> {
        self.index
            .get(word)
            .and_then(|&i| self.elements[i].as_ref())
    }

    fn degree_window(&self) -> (u32, u32) {
        (self.min_degree, self.max_degree)
    }

    fn coeff_degree_window(&self) -> (u32, u32) {
        (0, 0)
    }

    fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl<'a, F: Field> Completion<'a, F> {
    fn new(algebra: &FreeAlgebra<F>, limit: Option<u32>, config: &'a CompletionConfig) -> Self {
        Self {
            algebra: algebra.clone(),
            limit,
            config,
            elements: Vec::new(),
            index: FxHashMap::default(),
            pending: Vec::new(),
            pairs: BinaryHeap::new(),
            next_seq: 0,
            min_degree: 0,
            max_degree: 0,
        }
    }

    fn within_limit(&self, degree: u32) -> bool {
        self.limit.map_or(true, |d| degree <= d)
    }

    fn alive(&self) -> impl Iterator<Item = (usize, &NcPoly<F>)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|p| (i, p)))
    }

    fn refresh_degree_window(&mut self) {
        let degrees = self.index.keys().map(|w| self.algebra.word_degree(w));
        self.min_degree = degrees.clone().min().unwrap_or(0);
        self.max_degree = degrees.max().unwrap_or(0);
    }

    /// Drains pending elements and critical pairs.
    fn run(&mut self) -> Result<(), GroebnerError> {
        loop {
            if let Some(p) = self.pop_pending() {
                self.add(&p)?;
                continue;
            }

            let Some(pair) = self.pairs.pop() else {
                return Ok(());
            };
            let (Some(Some(ga)), Some(Some(gb))) =
                (self.elements.get(pair.left), self.elements.get(pair.right))
            else {
                trace!(left = pair.left, right = pair.right, "skipping stale pair");
                continue;
            };
            let s = overlap_polynomial(ga, gb, pair.overlap);
            if !s.is_zero() {
                self.pending.push(s);
            }
        }
    }

    /// Removes the pending element of smallest degree.
    fn pop_pending(&mut self) -> Option<NcPoly<F>> {
        let (i, _) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.degree())?;
        Some(self.pending.swap_remove(i))
    }

    fn add(&mut self, p: &NcPoly<F>) -> Result<(), GroebnerError> {
        let r = reduce_with(p, &*self, &SmallestGenerator).make_monic();
        let Some(lead) = r.leading_word().cloned() else {
            return Ok(());
        };

        // evict elements whose leading word contains the new one
        let evicted: Vec<usize> = self
            .alive()
            .filter(|(_, e)| e.leading_word().is_some_and(|w| w.contains(&lead)))
            .map(|(i, _)| i)
            .collect();
        for i in evicted {
            if let Some(e) = self.elements[i].take() {
                if let Some(w) = e.leading_word() {
                    trace!(word = %self.algebra.format_word(w), "evicting");
                    self.index.remove(w);
                }
                self.pending.push(e);
            }
        }

        let new = self.elements.len();
        self.index.insert(lead.clone(), new);
        self.elements.push(Some(r));
        self.refresh_degree_window();

        if self.index.len() > self.config.max_basis_size {
            return Err(GroebnerError::BasisSizeExceeded {
                limit: self.config.max_basis_size,
            });
        }

        let mut found = Vec::new();
        for (i, e) in self.alive() {
            let Some(w) = e.leading_word() else {
                continue;
            };
            for (k, degree) in overlaps(&self.algebra, &lead, w) {
                found.push((new, i, k, degree));
            }
            if i != new {
                for (k, degree) in overlaps(&self.algebra, w, &lead) {
                    found.push((i, new, k, degree));
                }
            }
        }
        for (left, right, overlap, degree) in found {
            if self.within_limit(degree) {
                self.push_pair(left, right, overlap, degree);
            }
        }

        trace!(
            word = %self.algebra.format_word(&lead),
            size = self.index.len(),
            pairs = self.pairs.len(),
            "added element"
        );
        Ok(())
    }

    fn push_pair(&mut self, left: usize, right: usize, overlap: usize, degree: u32) {
        self.pairs.push(CriticalPair {
            left,
            right,
            overlap,
            degree,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Recomputes every overlap within the limit; queues the ones that do
    /// not reduce to zero. Returns true if anything was queued.
    fn verify(&mut self) -> bool {
        let alive: Vec<(usize, NcPoly<F>)> =
            self.alive().map(|(i, p)| (i, p.clone())).collect();
        let mut failures = Vec::new();

        for (_, ga) in &alive {
            for (_, gb) in &alive {
                let (Some(a), Some(b)) = (ga.leading_word(), gb.leading_word()) else {
                    continue;
                };
                for (k, degree) in overlaps(&self.algebra, a, b) {
                    if !self.within_limit(degree) {
                        continue;
                    }
                    let s = overlap_polynomial(ga, gb, k);
                    let r = reduce_with(&s, &*self, &SmallestGenerator);
                    if !r.is_zero() {
                        failures.push(r);
                    }
                }
            }
        }

        if failures.is_empty() {
            return false;
        }
        debug!(count = failures.len(), "verification queued unresolved overlaps");
        self.pending.extend(failures);
        true
    }

    /// Replaces every tail by its normal form with respect to the others.
    fn interreduce(&mut self) {
        let indices: Vec<usize> = self.alive().map(|(i, _)| i).collect();
        for i in indices {
            let Some(g) = self.elements[i].take() else {
                continue;
            };
            let Some(lead) = g.leading_word().cloned() else {
                continue;
            };
            self.index.remove(&lead);
            self.refresh_degree_window();
            let r = reduce_with(&g, &*self, &SmallestGenerator).make_monic();
            self.index.insert(lead, i);
            self.elements[i] = Some(r);
        }
        self.refresh_degree_window();
    }

    fn into_elements(self) -> Vec<NcPoly<F>> {
        let mut out: Vec<NcPoly<F>> = self.elements.into_iter().flatten().collect();
        let algebra = self.algebra;
        out.sort_by(|a, b| match (a.leading_word(), b.leading_word()) {
            (Some(x), Some(y)) => algebra.compare(x, y),
            _ => std::cmp::Ordering::Equal,
        });
        out
    }
}

/// Checks that every overlap of `basis` up to `degree_limit` reduces to
/// zero and that no leading word contains another.
#[must_use]
pub fn is_groebner_basis<F: Field>(basis: &GroebnerBasis<F>, degree_limit: Option<u32>) -> bool {
    let algebra = basis.algebra();
    let elements = basis.elements();

    for (i, ga) in elements.iter().enumerate() {
        let Some(a) = ga.leading_word() else {
            continue;
        };
        for (j, gb) in elements.iter().enumerate() {
            let Some(b) = gb.leading_word() else {
                continue;
            };
            if i != j && a.contains(b) {
                return false;
            }
            for (k, degree) in overlaps(algebra, a, b) {
                if degree_limit.is_some_and(|d| degree > d) {
                    continue;
                }
                let s = overlap_polynomial(&ga.make_monic(), &gb.make_monic(), k);
                if !reduce_with(&s, basis, &SmallestGenerator).is_zero() {
                    return false;
                }
            }
        }
    }
    true
}
