//! Property-based tests for normal forms and completion.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use ncalg_core::{FreeAlgebra, NcPoly, Word};
    use ncalg_rings::{Ring, Q};

    use crate::basis::GroebnerBasis;
    use crate::completion::LocalCompletion;
    use crate::engine::BasisEngine;
    use crate::reduce::normal_form;
    use crate::relations::skew_polynomial_ring_relations;

    fn small_word(max_len: usize) -> impl Strategy<Value = Word> {
        proptest::collection::vec(0u32..3, 0..=max_len).prop_map(|v| Word::new(&v))
    }

    fn small_terms() -> impl Strategy<Value = Vec<(Word, i64)>> {
        proptest::collection::vec((small_word(4), -4i64..4i64), 0..6)
    }

    fn build(algebra: &FreeAlgebra<Q>, terms: Vec<(Word, i64)>) -> NcPoly<Q> {
        NcPoly::new(
            algebra,
            terms.into_iter().map(|(w, c)| (w, Q::from_integer(c))).collect(),
        )
    }

    // Skew-commutative ring and a non-confluent rewriting system
    fn bases(algebra: &FreeAlgebra<Q>) -> Vec<GroebnerBasis<Q>> {
        let skew = skew_polynomial_ring_relations(algebra, &Q::from_integer(-1));
        let engine = LocalCompletion::default();
        vec![
            engine.complete(algebra, &skew, Some(6)).unwrap(),
            engine
                .complete(algebra, &[algebra.parse("x*y - y*x - z").unwrap()], Some(6))
                .unwrap(),
            GroebnerBasis::from_generators(
                algebra,
                vec![algebra.parse("x*y - y").unwrap(), algebra.parse("z*z - x").unwrap()],
            )
            .unwrap(),
        ]
    }

    proptest! {
        #[test]
        fn normal_form_is_idempotent(terms in small_terms()) {
            let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
            let f = build(&a, terms);
            for b in bases(&a) {
                let nf = normal_form(&f, &b);
                prop_assert_eq!(normal_form(&nf, &b), nf);
            }
        }

        #[test]
        fn normal_form_has_no_reducible_terms(terms in small_terms()) {
            let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
            let f = build(&a, terms);
            for b in bases(&a) {
                let nf = normal_form(&f, &b);
                for (w, _) in nf.terms() {
                    prop_assert!(!b.divides_some_leading_word(w));
                }
            }
        }

        #[test]
        fn normal_form_is_sound(terms in small_terms(), left in small_word(2), right in small_word(2)) {
            // f and f + u*g*v have the same normal form for a Gröbner basis
            let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
            let f = build(&a, terms);
            let b = &bases(&a)[0];
            for g in b.elements() {
                let shifted = f.add(&g.mul_word(&left, &right, &Q::one()));
                prop_assert_eq!(normal_form(&shifted, b), normal_form(&f, b));
            }
        }

        #[test]
        fn normal_form_is_linear(f in small_terms(), g in small_terms()) {
            let a = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
            let (f, g) = (build(&a, f), build(&a, g));
            let b = &bases(&a)[0];
            prop_assert_eq!(
                normal_form(&f.add(&g), b),
                normal_form(&f, b).add(&normal_form(&g, b))
            );
        }
    }
}
