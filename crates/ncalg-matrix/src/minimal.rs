//! Pruning a generating set of a graded right module.

use ncalg_core::{NcPoly, Word};
use ncalg_groebner::QuotientAlgebra;
use ncalg_linalg::DenseMatrix;
use ncalg_rings::Field;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::coords::GradedPiece;
use crate::error::MatrixError;
use crate::matrix::NcMatrix;

/// Removes columns that lie in the right-module span of the others.
///
/// A column of degree `e` is redundant when it is a linear combination
/// of products `v * w`, where `v` is another column of degree `f <= e`
/// and `w` a normal word of degree `e - f`. Redundant columns are removed
/// one at a time, highest degree first, until none is left. Zero columns
/// are always removed.
///
/// # Errors
///
/// Returns [`MatrixError::InhomogeneousElement`] if a column does not
/// have all its entries in one degree.
pub fn minimal_generators<F: Field>(
    quotient: &QuotientAlgebra<F>,
    generators: &NcMatrix<F>,
) -> Result<NcMatrix<F>, MatrixError> {
    if quotient.algebra() != generators.algebra() {
        return Err(MatrixError::AlgebraMismatch);
    }
    let num_rows = generators.num_rows();

    let mut columns: Vec<(u32, Vec<NcPoly<F>>)> = Vec::new();
    for j in 0..generators.num_cols() {
        let col: Vec<NcPoly<F>> = generators.col(j).iter().map(|e| quotient.reduce(e)).collect();
        if let Some(degree) = column_degree(&col)? {
            columns.push((degree, col));
        }
    }
    // highest degree first; the sort is stable
    columns.sort_by(|a, b| b.0.cmp(&a.0));

    let mut pieces: FxHashMap<u32, GradedPiece> = FxHashMap::default();
    let mut removed = true;
    while removed {
        removed = false;
        for k in 0..columns.len() {
            let (degree, target) = &columns[k];
            let piece = pieces
                .entry(*degree)
                .or_insert_with(|| GradedPiece::new(quotient, *degree));

            let mut span = Vec::new();
            for (l, (other_degree, other)) in columns.iter().enumerate() {
                if l == k || other_degree > degree {
                    continue;
                }
                for w in quotient.normal_words(degree - other_degree) {
                    span.push(stacked(quotient, piece, other, &w)?);
                }
            }
            let target = stacked(quotient, piece, target, &Word::one())?;
            let span = DenseMatrix::from_cols(&span, target.len());

            if span.col_span_contains(&target) {
                trace!(column = k, degree, "dropping redundant generator");
                columns.remove(k);
                removed = true;
                break;
            }
        }
    }

    let col_degrees = columns.iter().map(|(d, _)| i64::from(*d)).collect();
    let cols: Vec<Vec<NcPoly<F>>> = columns.into_iter().map(|(_, c)| c).collect();
    let row_degrees = generators
        .row_degrees()
        .map_or_else(|| vec![0; num_rows], <[i64]>::to_vec);
    NcMatrix::from_cols(quotient.algebra(), num_rows, &cols)?.with_degrees(row_degrees, col_degrees)
}

/// The common degree of the nonzero entries, or `None` for a zero column.
fn column_degree<F: Field>(col: &[NcPoly<F>]) -> Result<Option<u32>, MatrixError> {
    let mut degree = None;
    for e in col.iter().filter(|e| !e.is_zero()) {
        if !e.is_homogeneous() || degree.is_some_and(|d| d != e.degree()) {
            return Err(MatrixError::InhomogeneousElement);
        }
        degree = Some(e.degree());
    }
    Ok(degree)
}

/// Coordinates of `col * w`, entry by entry, concatenated.
fn stacked<F: Field>(
    quotient: &QuotientAlgebra<F>,
    piece: &GradedPiece,
    col: &[NcPoly<F>],
    w: &Word,
) -> Result<Vec<F>, MatrixError> {
    let mut out = Vec::with_capacity(col.len() * piece.dim());
    for e in col {
        let product = quotient.reduce(&e.mul_word(&Word::one(), w, &F::one()));
        out.extend(piece.coordinates(&product)?);
    }
    Ok(out)
}
