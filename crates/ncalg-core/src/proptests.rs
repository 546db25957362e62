//! Property-based tests for words and noncommutative polynomials.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use ncalg_rings::Q;

    use crate::algebra::FreeAlgebra;
    use crate::poly::NcPoly;
    use crate::word::{find_substring, MatchMode, Word};

    // Strategy for words over a three-letter alphabet
    fn small_word(max_len: usize) -> impl Strategy<Value = Word> {
        proptest::collection::vec(0u32..3, 0..=max_len).prop_map(|v| Word::new(&v))
    }

    // Raw term data; polynomials are built against one algebra per case
    fn small_terms() -> impl Strategy<Value = Vec<(Word, i64)>> {
        proptest::collection::vec((small_word(3), -5i64..5i64), 0..5)
    }

    fn build(algebra: &FreeAlgebra<Q>, terms: Vec<(Word, i64)>) -> NcPoly<Q> {
        NcPoly::new(
            algebra,
            terms.into_iter().map(|(w, c)| (w, Q::from_integer(c))).collect(),
        )
    }

    fn xyz() -> FreeAlgebra<Q> {
        FreeAlgebra::new(&["x", "y", "z"]).unwrap()
    }

    proptest! {
        #[test]
        fn find_substring_reassembles(p in small_word(3), m in small_word(7)) {
            match find_substring(&p, &m, MatchMode::Anywhere) {
                Some(f) => {
                    prop_assert_eq!(f.matched, p.clone());
                    prop_assert_eq!(f.prefix.concat(&p).concat(&f.suffix), m);
                }
                None => {
                    // no window of m equals p
                    let found = m.letters().windows(p.len().max(1)).any(|w| w == p.letters());
                    prop_assert!(p.len() > m.len() || (!p.is_empty() && !found));
                }
            }
        }

        #[test]
        fn find_substring_is_leftmost(p in small_word(2), m in small_word(6)) {
            if let Some(f) = find_substring(&p, &m, MatchMode::Anywhere) {
                for start in 0..f.prefix.len() {
                    prop_assert!(!m.slice(start, m.len()).letters().starts_with(p.letters()));
                }
            }
        }

        #[test]
        fn poly_add_commutative(a in small_terms(), b in small_terms()) {
            let alg = xyz();
            let (a, b) = (build(&alg, a), build(&alg, b));
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn poly_mul_associative(a in small_terms(), b in small_terms(), c in small_terms()) {
            let alg = xyz();
            let (a, b, c) = (build(&alg, a), build(&alg, b), build(&alg, c));
            prop_assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
        }

        #[test]
        fn poly_distributive(a in small_terms(), b in small_terms(), c in small_terms()) {
            let alg = xyz();
            let (a, b, c) = (build(&alg, a), build(&alg, b), build(&alg, c));
            // a * (b + c) = a * b + a * c and (b + c) * a = b * a + c * a
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
            prop_assert_eq!(b.add(&c).mul(&a), b.mul(&a).add(&c.mul(&a)));
        }

        #[test]
        fn poly_sub_self_is_zero(a in small_terms()) {
            let alg = xyz();
            let a = build(&alg, a);
            prop_assert!(a.sub(&a).is_zero());
        }

        #[test]
        fn poly_display_parses_back(a in small_terms()) {
            let alg = xyz();
            let a = build(&alg, a);
            let back = alg.parse(&a.to_string()).unwrap();
            prop_assert_eq!(back, a);
        }

        #[test]
        fn leading_word_is_maximal(a in small_terms()) {
            let alg = xyz();
            let a = build(&alg, a);
            if let Some(lead) = a.leading_word() {
                for (w, _) in a.terms() {
                    prop_assert_ne!(alg.compare(lead, w), std::cmp::Ordering::Less);
                }
            }
        }
    }
}
