//! Critical pairs of a noncommutative basis.
//!
//! Two leading words `a = u*v` and `b = v*w` with a nonempty common part
//! `v` overlap in `u*v*w`. The overlap polynomial
//! `S = g_a * w - u * g_b` cancels that word; if every S reduces to zero
//! (and no leading word contains another) the set is a Gröbner basis.

use std::cmp::Ordering;

use ncalg_core::{FreeAlgebra, NcPoly, Word};
use ncalg_rings::Field;

/// An overlap between the leading words of two basis elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CriticalPair {
    /// Element whose leading word supplies the left part.
    pub left: usize,
    /// Element whose leading word supplies the right part.
    pub right: usize,
    /// Number of shared letters.
    pub overlap: usize,
    /// Weighted degree of the overlap word.
    pub degree: u32,
    /// Creation order, used to break degree ties.
    pub seq: u64,
}

impl CriticalPair {
    /// Pairs are processed lowest degree first, oldest first.
    #[must_use]
    pub fn cmp_priority(&self, other: &Self) -> Ordering {
        self.degree
            .cmp(&other.degree)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for CriticalPair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CriticalPair {
    // reversed so that `BinaryHeap` pops the highest priority first
    fn cmp(&self, other: &Self) -> Ordering {
        other.cmp_priority(self)
    }
}

/// Every overlap of `a`'s leading word (on the left) with `b`'s (on the
/// right), as `(overlap length, overlap degree)`.
#[must_use]
pub fn overlaps<F: Field>(
    algebra: &FreeAlgebra<F>,
    a: &Word,
    b: &Word,
) -> Vec<(usize, u32)> {
    a.overlap_lengths(b)
        .into_iter()
        .map(|k| {
            let shared = b.slice(0, k);
            let degree = algebra.word_degree(a) + algebra.word_degree(b)
                - algebra.word_degree(&shared);
            (k, degree)
        })
        .collect()
}

/// The overlap polynomial `g_a * w - u * g_b` for leading words
/// `lm(g_a) = u*v`, `lm(g_b) = v*w` with `|v| = overlap`.
///
/// Both inputs are assumed monic, so the overlap word cancels.
#[must_use]
pub fn overlap_polynomial<F: Field>(ga: &NcPoly<F>, gb: &NcPoly<F>, overlap: usize) -> NcPoly<F> {
    let (Some(a), Some(b)) = (ga.leading_word(), gb.leading_word()) else {
        return ga.algebra().zero();
    };
    let u = a.slice(0, a.len() - overlap);
    let w = b.slice(overlap, b.len());
    let one = Word::one();
    ga.mul_word(&one, &w, &F::one())
        .sub(&gb.mul_word(&u, &one, &F::one()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_rings::{Ring, Q};
    use std::collections::BinaryHeap;

    #[test]
    fn test_overlap_polynomial_cancels_overlap_word() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        // x*y - y and y*x - x overlap in x*y*x
        let f = a.parse("x*y - y").unwrap();
        let g = a.parse("y*x - x").unwrap();
        let ov = overlaps(&a, f.leading_word().unwrap(), g.leading_word().unwrap());
        assert_eq!(ov, vec![(1, 3)]);
        let s = overlap_polynomial(&f, &g, 1);
        // (xy - y)x - x(yx - x) = -yx + x^2
        assert_eq!(s, a.parse("x^2 - y*x").unwrap());
    }

    #[test]
    fn test_self_overlap() {
        let a = FreeAlgebra::<Q>::new(&["x"]).unwrap();
        let f = a.parse("x^2 - 1").unwrap();
        let w = f.leading_word().unwrap();
        assert_eq!(overlaps(&a, w, w), vec![(1, 3)]);
        // (x^2 - 1)x - x(x^2 - 1) = 0
        assert!(overlap_polynomial(&f, &f, 1).is_zero());
    }

    #[test]
    fn test_heap_pops_lowest_degree_first() {
        let pair = |degree, seq| CriticalPair {
            left: 0,
            right: 0,
            overlap: 1,
            degree,
            seq,
        };
        let mut heap = BinaryHeap::new();
        heap.push(pair(4, 0));
        heap.push(pair(3, 2));
        heap.push(pair(3, 1));
        assert_eq!(heap.pop().map(|p| p.seq), Some(1));
        assert_eq!(heap.pop().map(|p| p.seq), Some(2));
        assert_eq!(heap.pop().map(|p| p.degree), Some(4));
    }
}
