//! Dense row-major matrices over an exact scalar type
//!
//! Provides the operations the enumeration pipeline needs: products,
//! transposition, Gauss-Jordan row reduction with partial pivoting, and
//! inversion via an augmented identity block. All arithmetic is exact, so
//! rank decisions are decisions, not tolerance judgements.

use crate::error::{Error, Result};
use crate::rational::Rational;
use crate::scalar::Scalar;
use crate::vector::Vector;

/// A dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Matrix<T> {
    /// Build from a flat row-major buffer. Panics if the buffer length does
    /// not equal `rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "flat buffer length {} does not match {rows}x{cols}",
            data.len()
        );
        Self { data, rows, cols }
    }

    /// Build from nested rows. Panics if rows have unequal lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Self {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            assert_eq!(row.len(), n_cols, "ragged rows in matrix literal");
            data.extend(row);
        }
        Self {
            data,
            rows: n_rows,
            cols: n_cols,
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.cols + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[row * self.cols + col]
    }

    /// Borrow row `row` as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            self.data.swap(a * self.cols + c, b * self.cols + c);
        }
    }
}

impl<T: Scalar> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |_, _| T::zero())
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |r, c| if r == c { T::one() } else { T::zero() })
    }

    pub fn row_vector(&self, row: usize) -> Vector<T> {
        self.row(row).iter().cloned().collect()
    }

    pub fn column(&self, col: usize) -> Vector<T> {
        Vector::from_fn(self.rows, |r| self.get(r, col).clone())
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |r, c| self.get(c, r).clone())
    }

    /// Copy of `self` with `row` appended as a new last row. Panics if the
    /// row length does not match the column count.
    pub fn with_row(&self, row: &[T]) -> Self {
        assert_eq!(row.len(), self.cols, "appended row has wrong length");
        let mut data = self.data.clone();
        data.extend(row.iter().cloned());
        Self {
            data,
            rows: self.rows + 1,
            cols: self.cols,
        }
    }

    /// Gather the listed columns, in order, into a new matrix.
    pub fn select_columns(&self, columns: &[usize]) -> Self {
        Self::from_fn(self.rows, columns.len(), |r, c| {
            self.get(r, columns[c]).clone()
        })
    }

    pub fn mul_matrix(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                found: other.rows,
            });
        }
        Ok(Self::from_fn(self.rows, other.cols, |r, c| {
            let mut acc = T::zero();
            for k in 0..self.cols {
                acc = acc + self.get(r, k).clone() * other.get(k, c).clone();
            }
            acc
        }))
    }

    pub fn mul_vector(&self, v: &Vector<T>) -> Result<Vector<T>> {
        if self.cols != v.len() {
            return Err(Error::DimensionMismatch {
                expected: self.cols,
                found: v.len(),
            });
        }
        Ok(Vector::from_fn(self.rows, |r| {
            let mut acc = T::zero();
            for k in 0..self.cols {
                acc = acc + self.get(r, k).clone() * v[k].clone();
            }
            acc
        }))
    }

    /// Reduced row echelon form over the first `pivot_cols` columns.
    ///
    /// Pivots are chosen by partial pivoting (largest absolute value in the
    /// column at or below the current rank row). A column with no usable
    /// pivot is skipped, which is how rank deficiency surfaces. Returns the
    /// reduced matrix together with the number of pivots found.
    pub fn row_reduce(&self, pivot_cols: usize) -> (Self, usize) {
        assert!(pivot_cols <= self.cols, "pivot column range out of bounds");
        let mut m = self.clone();
        let mut pivots: Vec<(usize, usize)> = Vec::new();
        let mut rank = 0;

        for col in 0..pivot_cols {
            if rank == m.rows {
                break;
            }

            // partial pivot: largest |entry| among rows rank..
            let mut best: Option<usize> = None;
            for r in rank..m.rows {
                if m.get(r, col).is_zero() {
                    continue;
                }
                match best {
                    Some(b) if m.get(r, col).abs() <= m.get(b, col).abs() => {}
                    _ => best = Some(r),
                }
            }
            let Some(pivot_row) = best else {
                continue;
            };

            m.swap_rows(rank, pivot_row);

            let pivot = m.get(rank, col).clone();
            for c in col..m.cols {
                let v = m.get(rank, c).clone() / pivot.clone();
                *m.get_mut(rank, c) = v;
            }

            for r in rank + 1..m.rows {
                if m.get(r, col).is_zero() {
                    continue;
                }
                let factor = m.get(r, col).clone();
                for c in col..m.cols {
                    let v = m.get(r, c).clone()
                        - factor.clone() * m.get(rank, c).clone();
                    *m.get_mut(r, c) = v;
                }
            }

            pivots.push((rank, col));
            rank += 1;
        }

        // back-substitution: clear entries above each pivot
        for &(prow, pcol) in pivots.iter().rev() {
            for r in 0..prow {
                if m.get(r, pcol).is_zero() {
                    continue;
                }
                let factor = m.get(r, pcol).clone();
                for c in pcol..m.cols {
                    let v =
                        m.get(r, c).clone() - factor.clone() * m.get(prow, c).clone();
                    *m.get_mut(r, c) = v;
                }
            }
        }

        (m, rank)
    }

    /// Inverse of a square matrix, by row reduction of `[self | I]`.
    pub fn inverse(&self) -> Result<Self> {
        if self.rows != self.cols {
            return Err(Error::NotInvertible);
        }
        let n = self.rows;
        let augmented = Self::from_fn(n, 2 * n, |r, c| {
            if c < n {
                self.get(r, c).clone()
            } else if c - n == r {
                T::one()
            } else {
                T::zero()
            }
        });
        let (reduced, rank) = augmented.row_reduce(n);
        if rank != n {
            return Err(Error::NotInvertible);
        }
        Ok(Self::from_fn(n, n, |r, c| reduced.get(r, n + c).clone()))
    }
}

/// Random invertible basis matrix with integer entries in
/// `[-bound, bound]`, for stress tests and demo inputs.
pub fn random_basis(dimensions: usize, bound: i64, rng: &mut impl rand::Rng) -> Matrix<Rational> {
    assert!(dimensions > 0, "basis must have at least one dimension");
    assert!(bound > 0, "entry bound must be positive");
    loop {
        let candidate = Matrix::from_fn(dimensions, dimensions, |_, _| {
            Rational::from(rng.gen_range(-bound..=bound))
        });
        if candidate.inverse().is_ok() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[i64]]) -> Matrix<Rational> {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|&n| Rational::from(n)).collect())
                .collect(),
        )
    }

    fn v(values: &[i64]) -> Vector<Rational> {
        values.iter().map(|&n| Rational::from(n)).collect()
    }

    #[test]
    fn products_and_transpose() {
        let a = m(&[&[1, 2], &[3, 4]]);
        let b = m(&[&[0, 1], &[1, 0]]);

        assert_eq!(a.mul_matrix(&b).unwrap(), m(&[&[2, 1], &[4, 3]]));
        assert_eq!(a.mul_vector(&v(&[1, 1])).unwrap(), v(&[3, 7]));
        assert_eq!(a.transpose(), m(&[&[1, 3], &[2, 4]]));
        assert!(matches!(
            a.mul_vector(&v(&[1, 2, 3])),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn row_reduce_reaches_identity_on_full_rank() {
        let a = m(&[&[2, 1, 5], &[4, 3, 11]]);
        let (reduced, rank) = a.row_reduce(2);
        assert_eq!(rank, 2);
        // x = 2, y = 1 solves the augmented system
        assert_eq!(reduced, m(&[&[1, 0, 2], &[0, 1, 1]]));
    }

    #[test]
    fn row_reduce_skips_rank_deficient_columns() {
        let a = m(&[&[1, 2, 3], &[2, 4, 6], &[0, 0, 1]]);
        let (reduced, rank) = a.row_reduce(3);
        assert_eq!(rank, 2);
        assert_eq!(reduced.row(2), v(&[0, 0, 0]).as_slice());
    }

    #[test]
    fn row_reduce_is_idempotent() {
        let a = m(&[&[2, 1, 5], &[4, 3, 11], &[1, 1, 4]]);
        let (once, rank) = a.row_reduce(2);
        let (twice, rank_again) = once.row_reduce(2);
        assert_eq!(once, twice);
        assert_eq!(rank, rank_again);
    }

    #[test]
    fn inverse_round_trips() {
        let a = m(&[&[2, 1], &[7, 4]]);
        let inv = a.inverse().unwrap();
        assert_eq!(a.mul_matrix(&inv).unwrap(), Matrix::identity(2));
        assert_eq!(inv.mul_matrix(&a).unwrap(), Matrix::identity(2));
        assert_eq!(inv.inverse().unwrap(), a);
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let a = m(&[&[1, 2], &[2, 4]]);
        assert_eq!(a.inverse(), Err(Error::NotInvertible));
        let rect = m(&[&[1, 2, 3]]);
        assert_eq!(rect.inverse(), Err(Error::NotInvertible));
    }

    #[test]
    fn fractional_inverse_is_exact() {
        let a = m(&[&[1, 2], &[3, 5]]);
        let inv = a.inverse().unwrap();
        assert_eq!(inv, m(&[&[-5, 2], &[3, -1]]));
    }

    #[test]
    fn select_columns_gathers_in_order() {
        let a = m(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(a.select_columns(&[2, 0]), m(&[&[3, 1], &[6, 4]]));
    }

    #[test]
    fn random_basis_is_invertible() {
        let mut rng = rand::thread_rng();
        for _ in 0..10 {
            let b = random_basis(3, 5, &mut rng);
            assert!(b.inverse().is_ok());
        }
    }
}
