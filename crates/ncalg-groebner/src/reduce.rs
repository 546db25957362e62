//! Normal-form reduction.
//!
//! Terms are rewritten from the top down. For the first term that
//! admits a rewrite, every factorization `prefix * sub * suffix` of its
//! word with `sub` a leading word is collected, a [`TieBreak`] policy
//! picks one, and `q * prefix * g * suffix` is subtracted, where `q`
//! cancels the leading part of the term's coefficient. Terms that admit
//! no rewrite are moved to the result unchanged.

use ncalg_core::{Factorization, NcPoly, Word};
use ncalg_rings::Coefficient;
use tracing::trace;

use crate::basis::{GroebnerBasis, Reducers};

/// A possible rewrite of one term.
#[derive(Debug)]
pub struct Hit<'a, R: Coefficient> {
    /// Where the generator's leading word sits inside the term's word.
    pub factorization: Factorization,
    /// The generator used for the rewrite.
    pub generator: &'a NcPoly<R>,
    /// Multiplier cancelling the leading part of the term's coefficient.
    pub quotient: R,
}

/// Picks one of several possible rewrites.
///
/// `hits` is never empty and is ordered by the start of the match, then
/// by its length.
pub trait TieBreak<R: Coefficient> {
    /// Index of the chosen hit.
    fn choose(&self, hits: &[Hit<'_, R>]) -> usize;
}

/// Prefers the generator with the fewest terms; the earliest hit wins
/// ties. Short generators keep intermediate results small.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmallestGenerator;

impl<R: Coefficient> TieBreak<R> for SmallestGenerator {
    fn choose(&self, hits: &[Hit<'_, R>]) -> usize {
        hits.iter()
            .enumerate()
            .min_by_key(|(_, h)| h.generator.len())
            .map_or(0, |(i, _)| i)
    }
}

/// Takes the first hit: leftmost match, shortest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstHit;

impl<R: Coefficient> TieBreak<R> for FirstHit {
    fn choose(&self, _hits: &[Hit<'_, R>]) -> usize {
        0
    }
}

/// Every rewrite available for the term `c * word`.
fn collect_hits<'a, R, S>(word: &Word, c: &R, weights: &[u32], reducers: &'a S) -> Vec<Hit<'a, R>>
where
    R: Coefficient,
    S: Reducers<R> + ?Sized,
{
    let (min, max) = reducers.degree_window();
    let (cmin, cmax) = reducers.coeff_degree_window();
    let lead = c.lead_part();
    let keys = R::key_divisors(&c.lead_key(), cmin, cmax);

    let mut hits = Vec::new();
    if min == 0 {
        // a constant generator divides every word
        let unit = Factorization {
            prefix: Word::one(),
            matched: Word::one(),
            suffix: word.clone(),
        };
        for key in &keys {
            if let Some(g) = reducers.find(&unit.matched, key) {
                if let Some(quotient) = g.leading_coeff().and_then(|lc| lead.divide_exact(&lc.lead_part())) {
                    hits.push(Hit {
                        factorization: unit.clone(),
                        generator: g,
                        quotient,
                    });
                }
            }
        }
    }
    for factorization in word.factorizations(weights, min.max(1), max) {
        for key in &keys {
            let Some(g) = reducers.find(&factorization.matched, key) else {
                continue;
            };
            let Some(lc) = g.leading_coeff() else {
                continue;
            };
            if let Some(quotient) = lead.divide_exact(&lc.lead_part()) {
                hits.push(Hit {
                    factorization: factorization.clone(),
                    generator: g,
                    quotient,
                });
            }
        }
    }
    hits
}

/// Reduces `f` by any reducer set with an explicit tie-break policy.
///
/// # Panics
///
/// Panics if the reducers belong to a different algebra than `f`.
pub fn reduce_with<R, S, T>(f: &NcPoly<R>, reducers: &S, policy: &T) -> NcPoly<R>
where
    R: Coefficient,
    S: Reducers<R> + ?Sized,
    T: TieBreak<R> + ?Sized,
{
    if reducers.is_empty() || f.is_zero() {
        return f.clone().mark_reduced();
    }

    let algebra = f.algebra();
    let mut remainder: Vec<(Word, R)> = Vec::new();
    let mut rest = f.clone();

    while let Some((word, c)) = rest.leading_term().cloned() {
        let hits = collect_hits(&word, &c, algebra.weights(), reducers);
        if hits.is_empty() {
            remainder.push((word.clone(), c.clone()));
            rest = rest.sub(&algebra.monomial(word, c));
            continue;
        }

        let hit = &hits[policy.choose(&hits)];
        trace!(
            word = %algebra.format_word(&word),
            by = %algebra.format_word(&hit.factorization.matched),
            "rewrite"
        );
        let subtrahend = hit.generator.mul_word(
            &hit.factorization.prefix,
            &hit.factorization.suffix,
            &hit.quotient,
        );
        rest = rest.sub(&subtrahend);
    }

    NcPoly::new(algebra, remainder).mark_reduced()
}

/// Normal form of `f` with the default [`SmallestGenerator`] policy.
///
/// An empty basis leaves `f` unchanged; the zero polynomial reduces to
/// itself. The result is flagged as reduced.
#[must_use]
pub fn normal_form<R: Coefficient>(f: &NcPoly<R>, basis: &GroebnerBasis<R>) -> NcPoly<R> {
    reduce_with(f, basis, &SmallestGenerator)
}

/// Normal form of `f` with an explicit tie-break policy.
#[must_use]
pub fn normal_form_with<R, T>(f: &NcPoly<R>, basis: &GroebnerBasis<R>, policy: &T) -> NcPoly<R>
where
    R: Coefficient,
    T: TieBreak<R> + ?Sized,
{
    reduce_with(f, basis, policy)
}

/// Returns true if `f` has normal form zero.
#[must_use]
pub fn reduces_to_zero<R: Coefficient>(f: &NcPoly<R>, basis: &GroebnerBasis<R>) -> bool {
    normal_form(f, basis).is_zero()
}
