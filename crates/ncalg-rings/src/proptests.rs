//! Property-based tests for the coefficient rings.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::comm_poly::{CoeffMonomial, CommPoly};
    use crate::finite_field::GF101;
    use crate::rationals::Q;
    use crate::traits::{Coefficient, Field, Ring};

    // Strategy for generating small rationals
    fn small_q() -> impl Strategy<Value = Q> {
        (-50i64..50i64, 1i64..20i64).prop_map(|(n, d)| Q::new(n, d))
    }

    // Strategy for generating non-zero rationals
    fn nonzero_q() -> impl Strategy<Value = Q> {
        small_q().prop_filter("must be non-zero", |q| !q.is_zero())
    }

    fn gf101() -> impl Strategy<Value = GF101> {
        (0u64..101u64).prop_map(GF101::new)
    }

    // Strategy for small polynomial coefficients in two variables
    fn small_comm_poly() -> impl Strategy<Value = CommPoly<Q>> {
        proptest::collection::vec(((0u16..3, 0u16..3), -5i64..5i64), 0..4).prop_map(|terms| {
            CommPoly::new(
                terms
                    .into_iter()
                    .map(|((a, b), c)| (CoeffMonomial::new(&[a, b]), Q::from_integer(c)))
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn q_inverse(a in nonzero_q()) {
            let inv = a.inv().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn q_distributive(a in small_q(), b in small_q(), c in small_q()) {
            prop_assert_eq!(
                a.clone() * (b.clone() + c.clone()),
                a.clone() * b + a * c
            );
        }

        #[test]
        fn gf_inverse(a in gf101()) {
            prop_assume!(!a.is_zero());
            prop_assert!((a * a.inv().unwrap()).is_one());
        }

        #[test]
        fn gf_sub_is_add_neg(a in gf101(), b in gf101()) {
            prop_assert_eq!(a - b, a + (-b));
        }

        #[test]
        fn comm_poly_exact_division(a in small_comm_poly(), b in small_comm_poly()) {
            prop_assume!(!b.is_zero());
            let product = a.clone() * b.clone();
            prop_assert_eq!(product.divide_exact(&b), Some(a));
        }

        #[test]
        fn comm_poly_lead_key_of_product(a in small_comm_poly(), b in small_comm_poly()) {
            prop_assume!(!a.is_zero() && !b.is_zero());
            let product = a.clone() * b.clone();
            prop_assert_eq!(product.lead_key(), a.lead_key().mul(&b.lead_key()));
        }
    }
}
