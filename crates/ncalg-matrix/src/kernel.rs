//! Right kernels of graded matrices.
//!
//! Given a matrix `M` whose rows are each homogeneous of one degree and a
//! degree `d`, the kernel is the set of column vectors `v` with entries
//! in the degree-`d` part of the quotient and `M * v == 0`.
//!
//! Two methods compute it:
//!
//! - [`KernelMethod::Direct`] writes each row as a linear map between
//!   graded pieces and intersects the null spaces over the coefficient
//!   field. Exact, but the pieces grow exponentially with `d`.
//! - [`KernelMethod::MatrixRing`] encodes the kernel condition as an
//!   ideal in an algebra extended by row and column markers and lets a
//!   [`BasisEngine`] eliminate the row markers.

use std::fmt;

use ncalg_core::{FreeAlgebra, Letter, NcPoly, Word};
use ncalg_groebner::{BasisEngine, QuotientAlgebra};
use ncalg_linalg::DenseMatrix;
use ncalg_rings::Field;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::coords::GradedPiece;
use crate::error::MatrixError;
use crate::matrix::NcMatrix;
use crate::minimal::minimal_generators;

/// How to compute a kernel.
pub enum KernelMethod<'a, F: Field> {
    /// Linear algebra over the coefficient field. The codomain of each
    /// row is processed in `bins` equal chunks.
    Direct {
        /// Number of chunks; must divide every codomain dimension.
        bins: usize,
    },
    /// Elimination in the auxiliary marker algebra.
    MatrixRing {
        /// Completes the auxiliary ideal.
        engine: &'a dyn BasisEngine<F>,
    },
}

impl<F: Field> Clone for KernelMethod<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Field> Copy for KernelMethod<'_, F> {}

impl<F: Field> fmt::Debug for KernelMethod<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { bins } => f.debug_struct("Direct").field("bins", bins).finish(),
            Self::MatrixRing { engine } => f
                .debug_struct("MatrixRing")
                .field("engine", &engine.name())
                .finish(),
        }
    }
}

/// Options for [`right_kernel`].
#[derive(Debug)]
pub struct KernelOptions<'a, F: Field> {
    /// The method.
    pub method: KernelMethod<'a, F>,
    /// Drop columns generated by the others.
    pub minimize: bool,
}

impl<F: Field> Clone for KernelOptions<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: Field> Copy for KernelOptions<'_, F> {}

impl<F: Field> Default for KernelOptions<'_, F> {
    fn default() -> Self {
        Self {
            method: KernelMethod::Direct { bins: 1 },
            minimize: true,
        }
    }
}

impl<'a, F: Field> KernelOptions<'a, F> {
    /// Direct linear algebra with `bins` codomain chunks.
    #[must_use]
    pub fn direct(bins: usize) -> Self {
        Self {
            method: KernelMethod::Direct { bins },
            ..Self::default()
        }
    }

    /// Elimination through `engine`.
    #[must_use]
    pub fn matrix_ring(engine: &'a dyn BasisEngine<F>) -> Self {
        Self {
            method: KernelMethod::MatrixRing { engine },
            ..Self::default()
        }
    }

    /// Set whether to minimize the result
    #[must_use]
    pub fn with_minimize(mut self, minimize: bool) -> Self {
        self.minimize = minimize;
        self
    }
}

/// Generators of the right kernel of `m` in degree `d`.
///
/// The result has one row per column of `m` and one column per kernel
/// generator. The direct method returns a basis of the degree-`d` kernel;
/// the matrix-ring method returns module generators of degree at most
/// `d`. Row labels are 0 and each column is labelled with its degree.
///
/// # Errors
///
/// - [`MatrixError::AlgebraMismatch`] if `m` is over another algebra
/// - [`MatrixError::NotHomogeneous`] if a row mixes degrees
/// - [`MatrixError::BinCountMismatch`] for a bad chunk count
/// - engine failures on the matrix-ring path
pub fn right_kernel<F: Field>(
    quotient: &QuotientAlgebra<F>,
    m: &NcMatrix<F>,
    d: u32,
    options: &KernelOptions<'_, F>,
) -> Result<NcMatrix<F>, MatrixError> {
    if quotient.algebra() != m.algebra() {
        return Err(MatrixError::AlgebraMismatch);
    }
    let row_degrees = (0..m.num_rows())
        .map(|i| m.row_entry_degree(i))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        rows = m.num_rows(),
        cols = m.num_cols(),
        degree = d,
        method = ?options.method,
        "computing right kernel"
    );
    let columns = match options.method {
        KernelMethod::Direct { bins } => direct_kernel(quotient, m, &row_degrees, d, bins)?,
        KernelMethod::MatrixRing { engine } => matrix_ring_kernel(quotient, m, &row_degrees, d, engine)?,
    };

    let kernel = labelled(quotient.algebra(), m.num_cols(), &columns)?;
    let kernel = if options.minimize {
        minimal_generators(quotient, &kernel)?
    } else {
        kernel
    };
    debug!(generators = kernel.num_cols(), "kernel computed");
    Ok(kernel)
}

/// Assembles kernel columns with row labels 0 and column labels equal to
/// the column degree.
fn labelled<F: Field>(
    algebra: &FreeAlgebra<F>,
    num_rows: usize,
    columns: &[Vec<NcPoly<F>>],
) -> Result<NcMatrix<F>, MatrixError> {
    let col_degrees = columns
        .iter()
        .map(|c| {
            c.iter()
                .find(|e| !e.is_zero())
                .map_or(0, |e| i64::from(e.degree()))
        })
        .collect();
    NcMatrix::from_cols(algebra, num_rows, columns)?.with_degrees(vec![0; num_rows], col_degrees)
}

fn direct_kernel<F: Field>(
    quotient: &QuotientAlgebra<F>,
    m: &NcMatrix<F>,
    row_degrees: &[Option<u32>],
    d: u32,
    bins: usize,
) -> Result<Vec<Vec<NcPoly<F>>>, MatrixError> {
    let domain = GradedPiece::new(quotient, d);
    let n_d = domain.dim();
    if n_d == 0 {
        return Ok(Vec::new());
    }
    let unknowns = m.num_cols() * n_d;

    // columns of `basis` span the kernel found so far
    let mut basis = DenseMatrix::<F>::identity(unknowns);

    for (i, degree) in row_degrees.iter().enumerate() {
        let Some(e) = degree else {
            continue;
        };
        if basis.num_cols() == 0 {
            break;
        }
        let codomain = GradedPiece::new(quotient, d + e);
        let dim = codomain.dim();
        if bins == 0 || dim % bins != 0 {
            return Err(MatrixError::BinCountMismatch { dimension: dim, bins });
        }

        let row_map = row_map(quotient, m.row(i), &domain, &codomain)?;
        let chunk = dim / bins;
        for b in 0..bins {
            let part = row_map.row_range(b * chunk, (b + 1) * chunk).mm(&basis);
            let null = part.null_space();
            trace!(row = i, bin = b, kernel = null.len(), "refined kernel");
            basis = basis.mm(&DenseMatrix::from_cols(&null, basis.num_cols()));
        }
    }

    Ok((0..basis.num_cols())
        .map(|k| {
            let coords = basis.col(k);
            coords
                .chunks(n_d)
                .map(|c| domain.element(quotient, c))
                .collect()
        })
        .collect())
}

/// Matrix of `v -> sum_j row[j] * v[j]` from `domain^n` to `codomain`.
fn row_map<F: Field>(
    quotient: &QuotientAlgebra<F>,
    row: &[NcPoly<F>],
    domain: &GradedPiece,
    codomain: &GradedPiece,
) -> Result<DenseMatrix<F>, MatrixError> {
    let n_d = domain.dim();
    let mut map = DenseMatrix::zeros(codomain.dim(), row.len() * n_d);
    for (j, entry) in row.iter().enumerate() {
        if entry.is_zero() {
            continue;
        }
        for (k, word) in domain.words().iter().enumerate() {
            let product = quotient.reduce(&entry.mul_word(&Word::one(), word, &F::one()));
            map.set_col(j * n_d + k, &codomain.coordinates(&product)?);
        }
    }
    Ok(map)
}

/// Marker names that do not clash with the existing generators.
fn marker_names(algebra: &FreeAlgebra<impl Field>, rows: usize, cols: usize) -> Vec<String> {
    let mut prefix = String::from("_");
    loop {
        let names: Vec<String> = (0..rows)
            .map(|i| format!("{prefix}row{i}"))
            .chain((0..cols).map(|j| format!("{prefix}col{j}")))
            .collect();
        if names.iter().all(|n| algebra.index_of(n).is_none()) {
            return names;
        }
        prefix.push('_');
    }
}

fn matrix_ring_kernel<F: Field>(
    quotient: &QuotientAlgebra<F>,
    m: &NcMatrix<F>,
    row_degrees: &[Option<u32>],
    d: u32,
    engine: &dyn BasisEngine<F>,
) -> Result<Vec<Vec<NcPoly<F>>>, MatrixError> {
    let algebra = quotient.algebra();
    let (rows, cols) = (m.num_rows(), m.num_cols());
    let markers = rows + cols;
    #[allow(clippy::cast_possible_truncation)]
    let (first_col, shift) = (rows as Letter, markers as Letter);

    let top = row_degrees.iter().flatten().copied().max().unwrap_or(0) + 1;
    let weights: Vec<u32> = row_degrees
        .iter()
        .map(|e| top - e.unwrap_or(0))
        .chain(std::iter::repeat(top).take(cols))
        .collect();
    let names = marker_names(algebra, rows, cols);
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let extended = algebra.extend_front(&name_refs, &weights)?;
    let embed = |f: &NcPoly<F>| f.map_into(&extended, |l| l + shift);

    let mut relations = Vec::new();
    for j in 0..cols {
        let mut rel = extended.generator(rows + j);
        for i in 0..rows {
            let entry = m.get(i, j);
            if !entry.is_zero() {
                rel = rel.sub(&extended.generator(i).mul(&embed(entry)));
            }
        }
        relations.push(rel);
    }
    relations.extend(quotient.basis().elements().iter().map(embed));
    for g in 0..extended.num_generators() {
        for marker in 0..markers {
            relations.push(extended.generator(g).mul(&extended.generator(marker)));
        }
    }

    let limit = top + d;
    debug!(
        engine = engine.name(),
        relations = relations.len(),
        limit,
        "completing marker ideal"
    );
    let basis = engine.complete(&extended, &relations, Some(limit))?;

    let is_column = |l: Letter| (first_col..shift).contains(&l);
    let mut columns = Vec::new();
    for g in basis.elements() {
        let eliminates = g.terms().iter().all(|(w, _)| {
            let letters = w.letters();
            letters.first().is_some_and(|&l| is_column(l)) && letters[1..].iter().all(|&l| l >= shift)
        });
        if !eliminates {
            continue;
        }

        let mut parts: FxHashMap<usize, Vec<(Word, F)>> = FxHashMap::default();
        for (w, c) in g.terms() {
            let letters = w.letters();
            let j = (letters[0] - first_col) as usize;
            let rest: Vec<Letter> = letters[1..].iter().map(|&l| l - shift).collect();
            parts.entry(j).or_default().push((Word::new(&rest), c.clone()));
        }
        let column: Vec<NcPoly<F>> = (0..cols)
            .map(|j| {
                let terms = parts.remove(&j).unwrap_or_default();
                quotient.reduce(&NcPoly::new(algebra, terms))
            })
            .collect();
        if column.iter().any(|e| !e.is_zero()) {
            columns.push(column);
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_groebner::{GroebnerBasis, LocalCompletion};
    use ncalg_rings::Q;

    fn skew() -> QuotientAlgebra<Q> {
        let a = FreeAlgebra::new(&["x", "y", "z"]).unwrap();
        let gens = ["x*y + y*x", "x*z + z*x", "y*z + z*y"].map(|s| a.parse(s).unwrap());
        QuotientAlgebra::new(GroebnerBasis::from_generators(&a, gens).unwrap())
    }

    fn annihilates(q: &QuotientAlgebra<Q>, m: &NcMatrix<Q>, k: &NcMatrix<Q>) -> bool {
        m.mul_in(q, k).unwrap().is_zero()
    }

    #[test]
    fn test_direct_kernel_of_generators() {
        let q = skew();
        let m = NcMatrix::parse(q.algebra(), &[&["x", "y", "z"]]).unwrap();
        let k = right_kernel(&q, &m, 1, &KernelOptions::default()).unwrap();
        assert_eq!(k.num_rows(), 3);
        assert_eq!(k.num_cols(), 3);
        assert!(annihilates(&q, &m, &k));
        assert_eq!(k.col_degrees(), Some(&[1, 1, 1][..]));
    }

    #[test]
    fn test_degree_zero_kernel_is_empty() {
        let q = skew();
        let m = NcMatrix::parse(q.algebra(), &[&["x", "y", "z"]]).unwrap();
        let k = right_kernel(&q, &m, 0, &KernelOptions::default()).unwrap();
        assert_eq!(k.num_cols(), 0);
    }

    #[test]
    fn test_bins_refine_the_same_kernel() {
        let q = skew();
        let m = NcMatrix::parse(q.algebra(), &[&["x", "y", "z"]]).unwrap();
        // the degree-2 piece has dimension 6
        let k = right_kernel(&q, &m, 1, &KernelOptions::direct(3)).unwrap();
        assert_eq!(k.num_cols(), 3);
        assert!(annihilates(&q, &m, &k));

        let err = right_kernel(&q, &m, 1, &KernelOptions::direct(4)).unwrap_err();
        assert!(matches!(err, MatrixError::BinCountMismatch { dimension: 6, bins: 4 }));
        let err = right_kernel(&q, &m, 1, &KernelOptions::direct(0)).unwrap_err();
        assert!(matches!(err, MatrixError::BinCountMismatch { bins: 0, .. }));
    }

    #[test]
    fn test_zero_matrix_kernel_is_everything() {
        let q = skew();
        let m = NcMatrix::zeros(q.algebra(), 1, 2);
        let k = right_kernel(&q, &m, 1, &KernelOptions::default()).unwrap();
        assert_eq!(k.num_cols(), 6);
    }

    #[test]
    fn test_rejects_inhomogeneous_rows() {
        let q = skew();
        let m = NcMatrix::parse(q.algebra(), &[&["x", "y*z"]]).unwrap();
        let err = right_kernel(&q, &m, 1, &KernelOptions::default()).unwrap_err();
        assert!(matches!(err, MatrixError::NotHomogeneous { row: 0 }));

        let other = FreeAlgebra::<Q>::new(&["x", "y", "z"]).unwrap();
        let m = NcMatrix::parse(&other, &[&["x"]]).unwrap();
        let err = right_kernel(&q, &m, 1, &KernelOptions::default()).unwrap_err();
        assert!(matches!(err, MatrixError::AlgebraMismatch));
    }

    #[test]
    fn test_matrix_ring_kernel_matches_direct() {
        let q = skew();
        let m = NcMatrix::parse(q.algebra(), &[&["x", "y", "z"]]).unwrap();
        let engine = LocalCompletion::default();
        let k = right_kernel(&q, &m, 1, &KernelOptions::matrix_ring(&engine)).unwrap();
        assert_eq!(k.num_cols(), 3);
        assert!(annihilates(&q, &m, &k));

        let expected = q.element("y").unwrap();
        assert!((0..3).any(|c| k.get(0, c) == &expected || k.get(0, c) == &expected.neg()));
    }

    #[test]
    fn test_marker_names_avoid_clashes() {
        let a = FreeAlgebra::<Q>::new(&["_row0", "x"]).unwrap();
        let names = marker_names(&a, 1, 1);
        assert_eq!(names, vec!["__row0".to_string(), "__col0".to_string()]);
    }
}
