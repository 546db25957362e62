//! Dense matrices over a field.
//!
//! Coordinate matrices built by the kernel and center computations are
//! small (dimensions of one graded piece), so plain row-major storage and
//! Gauss-Jordan elimination are enough.

use std::ops::{Index, IndexMut};

use ncalg_rings::{Field, Ring};

/// A row-major matrix of field elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix<F> {
    entries: Vec<F>,
    num_rows: usize,
    num_cols: usize,
}

impl<F: Field> DenseMatrix<F> {
    /// The `num_rows x num_cols` zero matrix.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            entries: vec![F::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// The `n x n` identity.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = F::one();
        }
        m
    }

    /// A matrix with the given columns, each of length `num_rows`.
    ///
    /// # Panics
    ///
    /// Panics if a column has the wrong length.
    #[must_use]
    pub fn from_cols(cols: &[Vec<F>], num_rows: usize) -> Self {
        let mut m = Self::zeros(num_rows, cols.len());
        for (j, col) in cols.iter().enumerate() {
            m.set_col(j, col);
        }
        m
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

    /// True if every entry is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(Ring::is_zero)
    }

    /// Column `j` as a vector.
    #[must_use]
    pub fn col(&self, j: usize) -> Vec<F> {
        self.entries
            .iter()
            .skip(j)
            .step_by(self.num_cols.max(1))
            .take(self.num_rows)
            .cloned()
            .collect()
    }

    /// Overwrites column `j`.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not have one entry per row.
    pub fn set_col(&mut self, j: usize, values: &[F]) {
        assert_eq!(values.len(), self.num_rows, "column length");
        for (i, v) in values.iter().enumerate() {
            self[(i, j)] = v.clone();
        }
    }

    /// The product `self * other`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions differ.
    #[must_use]
    pub fn mm(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_rows, "inner dimension");
        let mut out = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for (k, a) in self.row(i).iter().enumerate().filter(|(_, a)| !a.is_zero()) {
                for j in 0..other.num_cols {
                    let sum = out[(i, j)].clone() + a.clone() * other[(k, j)].clone();
                    out[(i, j)] = sum;
                }
            }
        }
        out
    }

    /// `other` appended below `self`.
    ///
    /// # Panics
    ///
    /// Panics if the column counts differ.
    #[must_use]
    pub fn vstack(&self, other: &Self) -> Self {
        assert_eq!(self.num_cols, other.num_cols, "column count");
        Self {
            entries: self.entries.iter().chain(&other.entries).cloned().collect(),
            num_rows: self.num_rows + other.num_rows,
            num_cols: self.num_cols,
        }
    }

    /// Rows `start..end`, clamped to the matrix.
    #[must_use]
    pub fn row_range(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.num_rows);
        let start = start.min(end);
        Self {
            entries: self.entries[start * self.num_cols..end * self.num_cols].to_vec(),
            num_rows: end - start,
            num_cols: self.num_cols,
        }
    }

    fn row(&self, i: usize) -> &[F] {
        &self.entries[i * self.num_cols..(i + 1) * self.num_cols]
    }

    fn row_mut(&mut self, i: usize) -> &mut [F] {
        &mut self.entries[i * self.num_cols..(i + 1) * self.num_cols]
    }

    /// Reduced row echelon form and the pivot columns.
    #[must_use]
    pub fn rref(&self) -> (Self, Vec<usize>) {
        let mut m = self.clone();
        let mut pivots = Vec::new();

        for col in 0..m.num_cols {
            let top = pivots.len();
            if top == m.num_rows {
                break;
            }
            let Some(found) = (top..m.num_rows).find(|&r| !m[(r, col)].is_zero()) else {
                continue;
            };
            if found != top {
                for k in 0..m.num_cols {
                    m.entries.swap(found * m.num_cols + k, top * m.num_cols + k);
                }
            }
            // nonzero by the search above
            let inv = m[(top, col)].inv().unwrap_or_else(F::one);
            m.row_mut(top).iter_mut().for_each(|e| *e = e.clone() * inv.clone());

            let pivot_row = m.row(top).to_vec();
            for r in (0..m.num_rows).filter(|&r| r != top) {
                let factor = m[(r, col)].clone();
                if factor.is_zero() {
                    continue;
                }
                for (e, p) in m.row_mut(r).iter_mut().zip(&pivot_row) {
                    *e = e.clone() - factor.clone() * p.clone();
                }
            }
            pivots.push(col);
        }

        (m, pivots)
    }

    /// The number of pivots in [`DenseMatrix::rref`].
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rref().1.len()
    }

    /// A basis of `{ v : A * v = 0 }`, one vector per free column.
    #[must_use]
    pub fn null_space(&self) -> Vec<Vec<F>> {
        let (rref, pivots) = self.rref();
        (0..self.num_cols)
            .filter(|c| !pivots.contains(c))
            .map(|free| {
                let mut v = vec![F::zero(); self.num_cols];
                v[free] = F::one();
                for (r, &p) in pivots.iter().enumerate() {
                    v[p] = -rref[(r, free)].clone();
                }
                v
            })
            .collect()
    }

    /// True if `v` is a linear combination of the columns.
    ///
    /// # Panics
    ///
    /// Panics if `v` does not have one entry per row.
    #[must_use]
    pub fn col_span_contains(&self, v: &[F]) -> bool {
        assert_eq!(v.len(), self.num_rows, "vector length");
        let mut cols: Vec<Vec<F>> = (0..self.num_cols).map(|j| self.col(j)).collect();
        cols.push(v.to_vec());
        Self::from_cols(&cols, self.num_rows).rank() == self.rank()
    }
}

impl<F> Index<(usize, usize)> for DenseMatrix<F> {
    type Output = F;

    fn index(&self, (i, j): (usize, usize)) -> &F {
        &self.entries[i * self.num_cols + j]
    }
}

impl<F> IndexMut<(usize, usize)> for DenseMatrix<F> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut F {
        &mut self.entries[i * self.num_cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ncalg_rings::{GF101, Q};

    /// Builds a rational matrix from integer rows.
    fn qm(rows: &[&[i64]]) -> DenseMatrix<Q> {
        let num_cols = rows.first().map_or(0, |r| r.len());
        let cols: Vec<Vec<Q>> = (0..num_cols)
            .map(|j| rows.iter().map(|r| Q::from_integer(r[j])).collect())
            .collect();
        DenseMatrix::from_cols(&cols, rows.len())
    }

    fn apply(m: &DenseMatrix<Q>, v: &[Q]) -> DenseMatrix<Q> {
        m.mm(&DenseMatrix::from_cols(&[v.to_vec()], v.len()))
    }

    #[test]
    fn test_identity_and_product() {
        let id = DenseMatrix::<Q>::identity(3);
        assert_eq!(id.rank(), 3);
        assert!(DenseMatrix::<Q>::zeros(2, 4).is_zero());

        let a = qm(&[&[1, 2], &[3, 4]]);
        let b = qm(&[&[5, 6], &[7, 8]]);
        assert_eq!(a.mm(&b), qm(&[&[19, 22], &[43, 50]]));
        assert_eq!(a.mm(&DenseMatrix::identity(2)), a);
    }

    #[test]
    fn test_stack_and_slice() {
        let m = qm(&[&[1, 2, 3], &[4, 5, 6]]);
        let s = m.vstack(&qm(&[&[7, 8, 9]]));
        assert_eq!(s.num_rows(), 3);
        assert_eq!(s.col(2), qm(&[&[3], &[6], &[9]]).col(0));
        assert_eq!(s.row_range(1, 3), qm(&[&[4, 5, 6], &[7, 8, 9]]));
        assert_eq!(s.row_range(2, 10).num_rows(), 1);
    }

    #[test]
    fn test_rref() {
        let m = qm(&[&[0, 2, 4], &[1, 1, 1], &[1, 2, 3]]);
        let (r, pivots) = m.rref();
        assert_eq!(pivots, vec![0, 1]);
        assert_eq!(r, qm(&[&[1, 0, -1], &[0, 1, 2], &[0, 0, 0]]));
        assert_eq!(m.rank(), 2);
    }

    #[test]
    fn test_null_space() {
        let m = qm(&[&[1, 2, 3], &[2, 4, 6]]);
        let null = m.null_space();
        assert_eq!(null.len(), 2);
        for v in &null {
            assert!(apply(&m, v).is_zero());
        }

        assert!(DenseMatrix::<Q>::identity(2).null_space().is_empty());
        // no rows: everything is in the kernel
        assert_eq!(DenseMatrix::<Q>::zeros(0, 3).null_space().len(), 3);
    }

    #[test]
    fn test_null_space_mod_p() {
        // x + y = 0 over GF(101)
        let one = GF101::one();
        let m = DenseMatrix::from_cols(&[vec![one], vec![one]], 1);
        assert_eq!(m.null_space(), vec![vec![-one, one]]);
    }

    #[test]
    fn test_col_span_contains() {
        let m = qm(&[&[1, 0], &[0, 1], &[1, 1]]);
        let q = Q::from_integer;
        assert!(m.col_span_contains(&[q(2), q(3), q(5)]));
        assert!(!m.col_span_contains(&[q(1), q(1), q(0)]));
    }
}
