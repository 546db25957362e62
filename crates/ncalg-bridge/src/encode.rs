//! Serialization of polynomials for the solver.
//!
//! The solver reads integer (or prime-field) coefficients only, so every
//! element is multiplied by the lcm of its coefficient denominators first.

use dashu::base::Gcd;
use dashu::integer::{IBig, UBig};
use ncalg_core::NcPoly;
use ncalg_groebner::GroebnerBasis;
use ncalg_rings::Field;

/// The lcm of the coefficient denominators of `f` (one for zero).
#[must_use]
pub fn common_denominator<F: Field>(f: &NcPoly<F>) -> UBig {
    f.terms().iter().fold(UBig::ONE, |acc, (_, c)| {
        let d = c.denominator();
        let g = acc.clone().gcd(d.clone());
        acc / g * d
    })
}

/// `(scale * f, scale)` with `scale` the common denominator of `f`.
#[must_use]
pub fn clear_denominators<F: Field>(f: &NcPoly<F>) -> (NcPoly<F>, F) {
    let scale = F::from_integer(&IBig::from(common_denominator(f)));
    if scale.is_one() {
        return (f.clone(), scale);
    }
    (f.scale(&scale), scale)
}

/// One element line of a session script: `(expr);`.
#[must_use]
pub fn element_line<F: Field>(f: &NcPoly<F>) -> String {
    format!("({f});")
}

/// The contents of a basis file: one generator per line, denominators
/// cleared, each terminated by `;`.
#[must_use]
pub fn basis_file_contents<F: Field>(basis: &GroebnerBasis<F>) -> String {
    let mut out = String::new();
    for g in basis.elements() {
        let (scaled, _) = clear_denominators(g);
        out.push_str(&format!("{scaled};\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_core::FreeAlgebra;
    use ncalg_rings::{GF101, Q};

    #[test]
    fn test_common_denominator() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let f = a.parse("1/2*x*y - 1/3*y + 5/6").unwrap();
        assert_eq!(common_denominator(&f), UBig::from(6u8));
        assert_eq!(common_denominator(&a.zero()), UBig::ONE);
    }

    #[test]
    fn test_clear_denominators() {
        let a = FreeAlgebra::<Q>::new(&["x", "y"]).unwrap();
        let f = a.parse("1/2*x*y - 1/3*y").unwrap();
        let (scaled, scale) = clear_denominators(&f);
        assert_eq!(scale, Q::from_integer(6));
        assert_eq!(scaled, a.parse("3*x*y - 2*y").unwrap());
        assert_eq!(element_line(&scaled), "(3*x*y - 2*y);");
    }

    #[test]
    fn test_prime_field_is_unchanged() {
        let a = FreeAlgebra::<GF101>::new(&["x", "y"]).unwrap();
        let f = a.parse("50*x - y").unwrap();
        let (scaled, scale) = clear_denominators(&f);
        assert_eq!(scaled, f);
        assert_eq!(scale, GF101::new(1));
    }
}
