//! Relations of standard noncommutative algebras.

use ncalg_core::{FreeAlgebra, NcPoly, Word};
use ncalg_rings::Field;

use crate::error::GroebnerError;

/// Relations `x_j*x_i - q*x_i*x_j` for all `i < j`.
///
/// With `q = 1` this is the commutative polynomial ring, with `q = -1`
/// the skew-commutative one.
#[must_use]
pub fn skew_polynomial_ring_relations<F: Field>(algebra: &FreeAlgebra<F>, q: &F) -> Vec<NcPoly<F>> {
    let n = u32::try_from(algebra.num_generators()).unwrap_or(u32::MAX);
    let mut relations = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let rel = NcPoly::new(
                algebra,
                vec![(Word::new(&[j, i]), F::one()), (Word::new(&[i, j]), -q.clone())],
            );
            if !rel.is_zero() {
                relations.push(rel);
            }
        }
    }
    relations
}

/// The three Sklyanin relations with parameters `(a, b, c)`:
///
/// ```text
/// a*y*z + b*z*y + c*x^2
/// a*z*x + b*x*z + c*y^2
/// a*x*y + b*y*x + c*z^2
/// ```
///
/// # Errors
///
/// Returns [`GroebnerError::GeneratorCount`] unless the algebra has
/// exactly three generators.
pub fn sklyanin_relations<F: Field>(
    algebra: &FreeAlgebra<F>,
    a: &F,
    b: &F,
    c: &F,
) -> Result<Vec<NcPoly<F>>, GroebnerError> {
    if algebra.num_generators() != 3 {
        return Err(GroebnerError::GeneratorCount {
            expected: 3,
            found: algebra.num_generators(),
        });
    }

    let cyclic = [(0, 1, 2), (1, 2, 0), (2, 0, 1)];
    Ok(cyclic
        .iter()
        .map(|&(x, y, z)| {
            NcPoly::new(
                algebra,
                vec![
                    (Word::new(&[y, z]), a.clone()),
                    (Word::new(&[z, y]), b.clone()),
                    (Word::new(&[x, x]), c.clone()),
                ],
            )
        })
        .filter(|r| !r.is_zero())
        .collect())
}
