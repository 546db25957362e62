//! The monomial order on words.
//!
//! Words are compared by weighted degree first, then lexicographically
//! letter by letter. A generator declared earlier is a *larger* letter, so
//! for generators `x, y, z` declared in that order `x > y > z` and
//! `x*z > y*y`.

use std::cmp::Ordering;

use crate::word::Word;

/// Weighted degree-lexicographic comparison of two words.
///
/// Returns `Ordering::Greater` when `a` is the larger word.
#[must_use]
pub fn cmp_deglex(a: &Word, b: &Word, weights: &[u32]) -> Ordering {
    match a.degree(weights).cmp(&b.degree(weights)) {
        Ordering::Equal => {}
        other => return other,
    }

    for (x, y) in a.letters().iter().zip(b.letters()) {
        if x != y {
            // smaller index = larger letter
            return y.cmp(x);
        }
    }

    a.len().cmp(&b.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_dominates() {
        let z2 = Word::new(&[2, 2]);
        let x = Word::letter(0);
        assert_eq!(cmp_deglex(&z2, &x, &[1, 1, 1]), Ordering::Greater);
    }

    #[test]
    fn test_earlier_generator_is_larger() {
        let xz = Word::new(&[0, 2]);
        let yy = Word::new(&[1, 1]);
        let yx = Word::new(&[1, 0]);
        let xy = Word::new(&[0, 1]);
        assert_eq!(cmp_deglex(&xz, &yy, &[1, 1, 1]), Ordering::Greater);
        assert_eq!(cmp_deglex(&xy, &yx, &[1, 1, 1]), Ordering::Greater);
        assert_eq!(cmp_deglex(&yx, &yx, &[1, 1, 1]), Ordering::Equal);
    }

    #[test]
    fn test_weights_change_the_order() {
        // with w(z) = 3, z outranks x*y
        let z = Word::letter(2);
        let xy = Word::new(&[0, 1]);
        assert_eq!(cmp_deglex(&z, &xy, &[1, 1, 1]), Ordering::Less);
        assert_eq!(cmp_deglex(&z, &xy, &[1, 1, 3]), Ordering::Greater);
    }
}
