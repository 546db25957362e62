//! Matrices with entries in a free algebra.

use std::cell::OnceCell;
use std::collections::VecDeque;
use std::fmt;

use ncalg_core::{FreeAlgebra, NcPoly};
use ncalg_groebner::QuotientAlgebra;
use ncalg_rings::Field;

use crate::error::MatrixError;

/// A rectangular matrix of polynomials over one algebra.
///
/// Rows and columns may carry integer degree labels. The matrix is a
/// graded map when `col_degree[j] - deg(M[i][j]) == row_degree[i]` for
/// every nonzero entry. Homogeneity is computed once and cached; the
/// cache takes no part in equality.
#[derive(Clone, Debug)]
pub struct NcMatrix<F: Field> {
    algebra: FreeAlgebra<F>,
    num_rows: usize,
    num_cols: usize,
    entries: Vec<NcPoly<F>>,
    row_degrees: Option<Vec<i64>>,
    col_degrees: Option<Vec<i64>>,
    homogeneous: OnceCell<bool>,
}

impl<F: Field> PartialEq for NcMatrix<F> {
    fn eq(&self, other: &Self) -> bool {
        self.algebra == other.algebra
            && self.num_rows == other.num_rows
            && self.num_cols == other.num_cols
            && self.entries == other.entries
            && self.row_degrees == other.row_degrees
            && self.col_degrees == other.col_degrees
    }
}

impl<F: Field> Eq for NcMatrix<F> {}

impl<F: Field> NcMatrix<F> {
    /// Creates a matrix from row-major entries.
    ///
    /// # Errors
    ///
    /// Fails if the entry count is not `num_rows * num_cols` or an entry
    /// belongs to another algebra.
    pub fn new(
        algebra: &FreeAlgebra<F>,
        num_rows: usize,
        num_cols: usize,
        entries: Vec<NcPoly<F>>,
    ) -> Result<Self, MatrixError> {
        if entries.len() != num_rows * num_cols {
            return Err(MatrixError::ShapeMismatch {
                expected: (num_rows, num_cols),
                found: (entries.len(), 1),
            });
        }
        if entries.iter().any(|e| e.algebra() != algebra) {
            return Err(MatrixError::AlgebraMismatch);
        }
        Ok(Self {
            algebra: algebra.clone(),
            num_rows,
            num_cols,
            entries,
            row_degrees: None,
            col_degrees: None,
            homogeneous: OnceCell::new(),
        })
    }

    /// Creates a matrix from rows.
    ///
    /// # Errors
    ///
    /// Fails on ragged rows or foreign entries.
    pub fn from_rows(algebra: &FreeAlgebra<F>, rows: Vec<Vec<NcPoly<F>>>) -> Result<Self, MatrixError> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != num_cols) {
            return Err(MatrixError::ShapeMismatch {
                expected: (num_rows, num_cols),
                found: (num_rows, bad.len()),
            });
        }
        Self::new(algebra, num_rows, num_cols, rows.into_iter().flatten().collect())
    }

    /// Creates a matrix whose columns are the given vectors.
    ///
    /// # Errors
    ///
    /// Fails if a column does not have `num_rows` entries or an entry is
    /// foreign.
    pub fn from_cols(
        algebra: &FreeAlgebra<F>,
        num_rows: usize,
        cols: &[Vec<NcPoly<F>>],
    ) -> Result<Self, MatrixError> {
        if let Some(bad) = cols.iter().find(|c| c.len() != num_rows) {
            return Err(MatrixError::ShapeMismatch {
                expected: (num_rows, cols.len()),
                found: (bad.len(), cols.len()),
            });
        }
        let entries = (0..num_rows)
            .flat_map(|i| cols.iter().map(move |c| c[i].clone()))
            .collect();
        Self::new(algebra, num_rows, cols.len(), entries)
    }

    /// Parses a matrix from expression strings.
    ///
    /// # Errors
    ///
    /// Fails on a parse error or ragged rows.
    pub fn parse(algebra: &FreeAlgebra<F>, rows: &[&[&str]]) -> Result<Self, MatrixError> {
        let rows = rows
            .iter()
            .map(|r| r.iter().map(|s| algebra.parse(s)).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rows(algebra, rows)
    }

    /// The zero matrix.
    #[must_use]
    pub fn zeros(algebra: &FreeAlgebra<F>, num_rows: usize, num_cols: usize) -> Self {
        Self {
            algebra: algebra.clone(),
            num_rows,
            num_cols,
            entries: vec![algebra.zero(); num_rows * num_cols],
            row_degrees: None,
            col_degrees: None,
            homogeneous: OnceCell::new(),
        }
    }

    /// Attaches degree labels.
    ///
    /// # Errors
    ///
    /// Fails if a label vector has the wrong length.
    pub fn with_degrees(mut self, row_degrees: Vec<i64>, col_degrees: Vec<i64>) -> Result<Self, MatrixError> {
        if row_degrees.len() != self.num_rows {
            return Err(MatrixError::DegreeCountMismatch {
                expected: self.num_rows,
                found: row_degrees.len(),
            });
        }
        if col_degrees.len() != self.num_cols {
            return Err(MatrixError::DegreeCountMismatch {
                expected: self.num_cols,
                found: col_degrees.len(),
            });
        }
        self.row_degrees = Some(row_degrees);
        self.col_degrees = Some(col_degrees);
        self.homogeneous = OnceCell::new();
        Ok(self)
    }

    /// Attaches labels inferred from the entries.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotHomogeneous`] when no consistent labelling
    /// exists.
    pub fn with_inferred_degrees(self) -> Result<Self, MatrixError> {
        let (rows, cols) = self.infer_degrees()?;
        self.with_degrees(rows, cols)
    }

    /// The algebra of the entries.
    #[must_use]
    pub fn algebra(&self) -> &FreeAlgebra<F> {
        &self.algebra
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Entry `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> &NcPoly<F> {
        assert!(i < self.num_rows && j < self.num_cols, "index out of range");
        &self.entries[i * self.num_cols + j]
    }

    /// Row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[NcPoly<F>] {
        &self.entries[i * self.num_cols..(i + 1) * self.num_cols]
    }

    /// Column `j`, cloned.
    #[must_use]
    pub fn col(&self, j: usize) -> Vec<NcPoly<F>> {
        (0..self.num_rows).map(|i| self.get(i, j).clone()).collect()
    }

    /// Row degree labels, if set.
    #[must_use]
    pub fn row_degrees(&self) -> Option<&[i64]> {
        self.row_degrees.as_deref()
    }

    /// Column degree labels, if set.
    #[must_use]
    pub fn col_degrees(&self) -> Option<&[i64]> {
        self.col_degrees.as_deref()
    }

    /// Returns true if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(NcPoly::is_zero)
    }

    /// The common degree of the nonzero entries of row `i`, or `None`
    /// for a zero row.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotHomogeneous`] if an entry is not
    /// homogeneous or two entries differ in degree.
    pub fn row_entry_degree(&self, i: usize) -> Result<Option<u32>, MatrixError> {
        let mut degree = None;
        for e in self.row(i).iter().filter(|e| !e.is_zero()) {
            if !e.is_homogeneous() || degree.is_some_and(|d| d != e.degree()) {
                return Err(MatrixError::NotHomogeneous { row: i });
            }
            degree = Some(e.degree());
        }
        Ok(degree)
    }

    /// Whether the matrix is graded.
    ///
    /// With labels, every nonzero entry must satisfy the label equation.
    /// Without labels, every row must be homogeneous of one degree.
    #[must_use]
    pub fn is_homogeneous(&self) -> bool {
        *self.homogeneous.get_or_init(|| self.compute_homogeneous())
    }

    fn compute_homogeneous(&self) -> bool {
        match (&self.row_degrees, &self.col_degrees) {
            (Some(rows), Some(cols)) => (0..self.num_rows).all(|i| {
                (0..self.num_cols).all(|j| {
                    let e = self.get(i, j);
                    e.is_zero() || (e.is_homogeneous() && cols[j] - i64::from(e.degree()) == rows[i])
                })
            }),
            _ => (0..self.num_rows).all(|i| self.row_entry_degree(i).is_ok()),
        }
    }

    /// Degree labels making the matrix graded.
    ///
    /// Each connected block of the entry pattern is anchored at degree 0
    /// on its first row (or first column); all-zero rows and columns get
    /// degree 0.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotHomogeneous`] naming a row where the
    /// constraints conflict.
    pub fn infer_degrees(&self) -> Result<(Vec<i64>, Vec<i64>), MatrixError> {
        let mut rows: Vec<Option<i64>> = vec![None; self.num_rows];
        let mut cols: Vec<Option<i64>> = vec![None; self.num_cols];

        for i in 0..self.num_rows {
            if self.row(i).iter().any(|e| !e.is_homogeneous()) {
                return Err(MatrixError::NotHomogeneous { row: i });
            }
        }

        // nodes: rows are (true, i), columns are (false, j)
        for start in 0..self.num_rows + self.num_cols {
            let node = if start < self.num_rows {
                (true, start)
            } else {
                (false, start - self.num_rows)
            };
            let known = if node.0 { rows[node.1] } else { cols[node.1] };
            if known.is_some() {
                continue;
            }
            if node.0 {
                rows[node.1] = Some(0);
            } else {
                cols[node.1] = Some(0);
            }

            let mut queue = VecDeque::from([node]);
            while let Some((is_row, k)) = queue.pop_front() {
                if is_row {
                    let r = rows[k].unwrap_or(0);
                    for j in 0..self.num_cols {
                        let e = self.get(k, j);
                        if e.is_zero() {
                            continue;
                        }
                        let c = r + i64::from(e.degree());
                        match cols[j] {
                            None => {
                                cols[j] = Some(c);
                                queue.push_back((false, j));
                            }
                            Some(existing) if existing != c => {
                                return Err(MatrixError::NotHomogeneous { row: k });
                            }
                            Some(_) => {}
                        }
                    }
                } else {
                    let c = cols[k].unwrap_or(0);
                    for i in 0..self.num_rows {
                        let e = self.get(i, k);
                        if e.is_zero() {
                            continue;
                        }
                        let r = c - i64::from(e.degree());
                        match rows[i] {
                            None => {
                                rows[i] = Some(r);
                                queue.push_back((true, i));
                            }
                            Some(existing) if existing != r => {
                                return Err(MatrixError::NotHomogeneous { row: i });
                            }
                            Some(_) => {}
                        }
                    }
                }
            }
        }

        Ok((
            rows.into_iter().map(|r| r.unwrap_or(0)).collect(),
            cols.into_iter().map(|c| c.unwrap_or(0)).collect(),
        ))
    }

    /// Product in the free algebra.
    ///
    /// # Errors
    ///
    /// Fails on mismatched shapes or algebras.
    pub fn mul(&self, other: &Self) -> Result<Self, MatrixError> {
        self.mul_with(other, |p| p)
    }

    /// Product with every entry reduced in `quotient`.
    ///
    /// # Errors
    ///
    /// Fails on mismatched shapes or algebras.
    pub fn mul_in(&self, quotient: &QuotientAlgebra<F>, other: &Self) -> Result<Self, MatrixError> {
        if quotient.algebra() != &self.algebra {
            return Err(MatrixError::AlgebraMismatch);
        }
        self.mul_with(other, |p| quotient.reduce(&p))
    }

    fn mul_with(&self, other: &Self, finish: impl Fn(NcPoly<F>) -> NcPoly<F>) -> Result<Self, MatrixError> {
        if self.algebra != other.algebra {
            return Err(MatrixError::AlgebraMismatch);
        }
        if self.num_cols != other.num_rows {
            return Err(MatrixError::ShapeMismatch {
                expected: (self.num_cols, other.num_cols),
                found: (other.num_rows, other.num_cols),
            });
        }
        let mut entries = Vec::with_capacity(self.num_rows * other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                let mut sum = self.algebra.zero();
                for k in 0..self.num_cols {
                    let (a, b) = (self.get(i, k), other.get(k, j));
                    if !a.is_zero() && !b.is_zero() {
                        sum = sum.add(&a.mul(b));
                    }
                }
                entries.push(finish(sum));
            }
        }
        Self::new(&self.algebra, self.num_rows, other.num_cols, entries)
    }

    /// Every entry replaced by its normal form in `quotient`.
    ///
    /// # Errors
    ///
    /// Fails if the quotient is over a different algebra.
    pub fn reduce_in(&self, quotient: &QuotientAlgebra<F>) -> Result<Self, MatrixError> {
        if quotient.algebra() != &self.algebra {
            return Err(MatrixError::AlgebraMismatch);
        }
        let mut out = self.clone();
        out.entries = self.entries.iter().map(|e| quotient.reduce(e)).collect();
        out.homogeneous = OnceCell::new();
        Ok(out)
    }
}

impl<F: Field> fmt::Display for NcMatrix<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_rows {
            let row: Vec<String> = self.row(i).iter().map(ToString::to_string).collect();
            writeln!(f, "[{}]", row.join(", "))?;
        }
        Ok(())
    }
}
