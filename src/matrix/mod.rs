//! Square row-major matrix type, the naive kernels, and block algebra.
//!
//! The naive kernels are the base case of the recursion and the
//! correctness baseline every Strassen result is checked against.

pub mod block;
pub mod naive_ijk;
pub mod naive_ikj;

use std::ops::{Index, IndexMut};

use crate::error::{StrassenError, element_count};

/// Dense n×n matrix of `f64`, stored row-major (`data[row * n + col]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// n×n matrix of zeros.
    ///
    /// An empty 0×0 matrix is allowed here; the engine entry points reject it.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * n],
        }
    }

    /// n×n identity.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Take ownership of `data` as an n×n matrix.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self, StrassenError> {
        let required = element_count(n)?;
        if data.len() != required {
            return Err(StrassenError::InvalidDimension {
                dim: n,
                reason: "data length is not n*n",
            });
        }
        Ok(Self { n, data })
    }

    /// Copy the first n² values of a row-major slice.
    pub fn from_slice(n: usize, src: &[f64]) -> Result<Self, StrassenError> {
        let required = element_count(n)?;
        if src.len() < required {
            return Err(StrassenError::InputTooSmall {
                operand: "source",
                required,
                len: src.len(),
            });
        }
        Ok(Self {
            n,
            data: src[..required].to_vec(),
        })
    }

    /// Build from nested rows. Every row must have as many entries as there are rows.
    ///
    /// ```
    /// use strassen::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m[(1, 0)], 3.0);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, StrassenError> {
        let n = rows.len();
        let mut data = Vec::with_capacity(element_count(n)?);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return Err(StrassenError::NotSquare {
                    rows: n,
                    cols: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self { n, data })
    }

    /// Row and column count.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Row-major backing storage.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// One row as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.n..(i + 1) * self.n]
    }

    /// Largest absolute elementwise difference to `other`.
    ///
    /// Returns `None` when the dimensions differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f64> {
        if self.n != other.n {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(&other.data)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max),
        )
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.n + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_ones_on_diagonal() {
        let id = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(Matrix::from_vec(2, vec![1.0; 4]).is_ok());
        assert!(Matrix::from_vec(2, vec![1.0; 5]).is_err());
        assert!(Matrix::from_vec(0, vec![]).is_err());
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, StrassenError::NotSquare { rows: 2, cols: 1 }));
    }

    #[test]
    fn from_slice_takes_prefix() {
        let m = Matrix::from_slice(2, &[1.0, 2.0, 3.0, 4.0, 99.0]).unwrap();
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert!(Matrix::from_slice(3, &[0.0; 4]).is_err());
    }

    #[test]
    fn rows_are_row_major() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(m.row(0), &[1.0, 2.0]);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn max_abs_diff_requires_same_dim() {
        let a = Matrix::zeros(2);
        let mut b = Matrix::zeros(2);
        b[(1, 1)] = -0.5;
        assert_eq!(a.max_abs_diff(&b), Some(0.5));
        assert_eq!(a.max_abs_diff(&Matrix::zeros(3)), None);
    }
}
