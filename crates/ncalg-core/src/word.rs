//! Words: monomials of a free associative algebra.
//!
//! A word is an ordered sequence of generator indices. Unlike a
//! commutative monomial, `x*y` and `y*x` are different words, and
//! "divisibility" means substring containment rather than comparison of
//! exponent vectors.

use std::fmt;

use smallvec::SmallVec;

/// Index of a generator inside its [`FreeAlgebra`](crate::FreeAlgebra).
pub type Letter = u32;

/// A monomial of the free algebra: an ordered sequence of letters.
///
/// Equality is sequence equality. Words are small value types; most
/// words in practice are short enough to stay inline.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Word(SmallVec<[Letter; 8]>);

/// How [`find_substring`] searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Leftmost occurrence anywhere in the target.
    Anywhere,
    /// Only accept the pattern as a literal prefix of the target.
    PrefixOnly,
}

/// A split `prefix ++ matched ++ suffix` of a word.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Factorization {
    /// Letters before the match.
    pub prefix: Word,
    /// The matched sub-word.
    pub matched: Word,
    /// Letters after the match.
    pub suffix: Word,
}

impl Factorization {
    /// Reassembles the factored word.
    #[must_use]
    pub fn join(&self) -> Word {
        self.prefix.concat(&self.matched).concat(&self.suffix)
    }
}

impl Word {
    /// Creates a word from letters.
    #[must_use]
    pub fn new(letters: &[Letter]) -> Self {
        Self(SmallVec::from_slice(letters))
    }

    /// The empty word (the monomial 1).
    #[must_use]
    pub fn one() -> Self {
        Self(SmallVec::new())
    }

    /// The single-letter word.
    #[must_use]
    pub fn letter(letter: Letter) -> Self {
        let mut v = SmallVec::new();
        v.push(letter);
        Self(v)
    }

    /// The letters of this word.
    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    /// Number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty word.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weighted degree: the sum of the weights of the letters.
    ///
    /// Letters outside `weights` count with weight 1.
    #[must_use]
    pub fn degree(&self, weights: &[u32]) -> u32 {
        self.0
            .iter()
            .map(|&l| weights.get(l as usize).copied().unwrap_or(1))
            .sum()
    }

    /// Concatenation `self ++ other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut v = self.0.clone();
        v.extend_from_slice(&other.0);
        Self(v)
    }

    /// Concatenation `prefix ++ self ++ suffix`.
    #[must_use]
    pub fn wrap(&self, prefix: &Self, suffix: &Self) -> Self {
        let mut v: SmallVec<[Letter; 8]> =
            SmallVec::with_capacity(prefix.len() + self.len() + suffix.len());
        v.extend_from_slice(&prefix.0);
        v.extend_from_slice(&self.0);
        v.extend_from_slice(&suffix.0);
        Self(v)
    }

    /// The sub-word `self[start..end]`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self::new(&self.0[start..end])
    }

    /// Returns true if `self` is a prefix of `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Returns true if `self` is a suffix of `other`.
    #[must_use]
    pub fn is_suffix_of(&self, other: &Self) -> bool {
        other.0.ends_with(&self.0)
    }

    /// Returns true if `pattern` occurs contiguously in `self`.
    #[must_use]
    pub fn contains(&self, pattern: &Self) -> bool {
        position(pattern, self).is_some()
    }

    /// Applies `map` to every letter, e.g. to embed a word into a larger
    /// algebra.
    #[must_use]
    pub fn map_letters(&self, map: impl Fn(Letter) -> Letter) -> Self {
        Self(self.0.iter().map(|&l| map(l)).collect())
    }

    /// Every split `(prefix, sub, suffix)` of `self` whose `sub` has weighted
    /// degree in `[min, max]`.
    ///
    /// The order is deterministic: by start position, then by length.
    #[must_use]
    pub fn factorizations(&self, weights: &[u32], min: u32, max: u32) -> Vec<Factorization> {
        let mut out = Vec::new();
        let n = self.len();
        for start in 0..n {
            let mut degree = 0u32;
            for end in start + 1..=n {
                degree += weights.get(self.0[end - 1] as usize).copied().unwrap_or(1);
                if degree > max {
                    break;
                }
                if degree >= min {
                    out.push(Factorization {
                        prefix: self.slice(0, start),
                        matched: self.slice(start, end),
                        suffix: self.slice(end, n),
                    });
                }
            }
        }
        out
    }

    /// Lengths `k` of the proper overlaps where the last `k` letters of
    /// `self` equal the first `k` letters of `other`, with `0 < k` and `k`
    /// strictly shorter than both words.
    #[must_use]
    pub fn overlap_lengths(&self, other: &Self) -> Vec<usize> {
        let max = self.len().min(other.len());
        (1..max)
            .filter(|&k| self.0[self.len() - k..] == other.0[..k])
            .collect()
    }
}

/// Leftmost position of `pattern` in `target`.
fn position(pattern: &Word, target: &Word) -> Option<usize> {
    if pattern.len() > target.len() {
        return None;
    }
    if pattern.is_empty() {
        return Some(0);
    }
    target
        .0
        .windows(pattern.len())
        .position(|window| window == pattern.0.as_slice())
}

/// Finds `pattern` in `target`.
///
/// Returns `None` if `pattern` is not a contiguous sub-word of `target`
/// (or, in [`MatchMode::PrefixOnly`], not a prefix). Otherwise returns the
/// factorization at the leftmost occurrence, so that
/// `prefix ++ pattern ++ suffix == target`.
#[must_use]
pub fn find_substring(pattern: &Word, target: &Word, mode: MatchMode) -> Option<Factorization> {
    let start = match mode {
        MatchMode::Anywhere => position(pattern, target)?,
        MatchMode::PrefixOnly => {
            if !pattern.is_prefix_of(target) {
                return None;
            }
            0
        }
    };
    let end = start + pattern.len();
    Some(Factorization {
        prefix: target.slice(0, start),
        matched: pattern.clone(),
        suffix: target.slice(end, target.len()),
    })
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word{:?}", self.0.as_slice())
    }
}
