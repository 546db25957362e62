//! Linear maps on graded pieces: the center and left multiplication.

use ncalg_core::{NcPoly, Word};
use ncalg_groebner::QuotientAlgebra;
use ncalg_linalg::DenseMatrix;
use ncalg_rings::Field;
use tracing::debug;

use crate::coords::GradedPiece;
use crate::error::MatrixError;

/// A basis of the degree-`d` part of the center.
///
/// Solves `[f, g] = 0` for every generator `g` as one linear system on
/// the coordinates of `f`. The basis must be complete up to degree `d`
/// plus the largest generator weight.
///
/// # Errors
///
/// Returns [`MatrixError::OutsidePiece`] if a commutator leaves its
/// degree, which happens only for inhomogeneous relations.
pub fn central_elements<F: Field>(
    quotient: &QuotientAlgebra<F>,
    d: u32,
) -> Result<Vec<NcPoly<F>>, MatrixError> {
    let algebra = quotient.algebra();
    let piece = GradedPiece::new(quotient, d);
    let mut system = DenseMatrix::<F>::zeros(0, piece.dim());

    for g in algebra.generators() {
        let target = GradedPiece::new(quotient, d + g.degree());
        let mut block = DenseMatrix::zeros(target.dim(), piece.dim());
        for (k, w) in piece.words().iter().enumerate() {
            let f = algebra.monomial(w.clone(), F::one());
            block.set_col(k, &target.coordinates(&quotient.commutator(&f, &g))?);
        }
        system = system.vstack(&block);
    }

    let center: Vec<NcPoly<F>> = system
        .null_space()
        .iter()
        .map(|v| piece.element(quotient, v))
        .collect();
    debug!(degree = d, dimension = center.len(), "computed central elements");
    Ok(center)
}

/// The matrix of `w -> f * w` from degree `d` to degree `d + deg f`, in
/// the normal-word bases.
///
/// A zero `f` gives the zero map into degree `d`.
///
/// # Errors
///
/// Returns [`MatrixError::InhomogeneousElement`] if `f` is not
/// homogeneous.
pub fn left_multiplication_map<F: Field>(
    quotient: &QuotientAlgebra<F>,
    f: &NcPoly<F>,
    d: u32,
) -> Result<DenseMatrix<F>, MatrixError> {
    if quotient.algebra() != f.algebra() {
        return Err(MatrixError::AlgebraMismatch);
    }
    let f = quotient.reduce(f);
    if !f.is_homogeneous() {
        return Err(MatrixError::InhomogeneousElement);
    }
    let domain = GradedPiece::new(quotient, d);
    let codomain = GradedPiece::new(quotient, d + f.degree());

    let mut map = DenseMatrix::zeros(codomain.dim(), domain.dim());
    if f.is_zero() {
        return Ok(map);
    }
    for (k, w) in domain.words().iter().enumerate() {
        let product = quotient.reduce(&f.mul_word(&Word::one(), w, &F::one()));
        map.set_col(k, &codomain.coordinates(&product)?);
    }
    Ok(map)
}
