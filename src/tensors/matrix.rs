//! Dense matrices, used for Jacobians.

use std::{
    fmt::Display,
    ops::{Index, IndexMut},
    slice::Chunks,
};

use crate::domains::float::NumericalFloatLike;
use crate::error::{HomotopyError, Result};

/// A matrix with entries of type `T`, stored in row-major order.
/// A vector can be represented as a matrix with one row or one column.
#[derive(Clone, PartialEq, Debug)]
pub struct Matrix<T> {
    pub(crate) data: Vec<T>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
}

impl<T: NumericalFloatLike> Matrix<T> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32) -> Matrix<T> {
        Matrix {
            data: vec![T::new_zero(); nrows as usize * ncols as usize],
            nrows,
            ncols,
        }
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(data: Vec<T>, nrows: u32, ncols: u32) -> Result<Matrix<T>> {
        HomotopyError::check_len("matrix data", nrows as usize * ncols as usize, data.len())?;
        Ok(Matrix { nrows, ncols, data })
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, T> {
        self.data.chunks(self.ncols.max(1) as usize)
    }

    /// Get the `row`th row.
    pub fn row(&self, row: usize) -> &[T] {
        let n = self.ncols as usize;
        &self.data[row * n..(row + 1) * n]
    }

    /// Get the `row`th row mutably.
    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        let n = self.ncols as usize;
        &mut self.data[row * n..(row + 1) * n]
    }

    /// The entries in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The entries in row-major order, mutably.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Set every entry to `value`.
    pub fn fill(&mut self, value: &T) {
        for e in &mut self.data {
            *e = value.clone();
        }
    }

    /// Compute the maximal absolute difference of the entries of two matrices,
    /// as measured by `norm`.
    pub fn max_distance<F: Fn(&T) -> f64>(&self, other: &Self, norm: F) -> f64 {
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| norm(&(a.clone() - b)))
            .fold(0., f64::max)
    }
}

impl<T> Index<(u32, u32)> for Matrix<T> {
    type Output = T;

    /// Get the `i`th row and `j`th column.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<T> IndexMut<(u32, u32)> for Matrix<T> {
    /// Get the `i`th row and `j`th column.
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut Self::Output {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<T: NumericalFloatLike> Display for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("{")?;
        for (ri, r) in self.row_iter().enumerate() {
            if ri > 0 {
                f.write_str(",")?;
            }
            f.write_str("{")?;
            for (ci, c) in r.iter().enumerate() {
                if ci > 0 {
                    f.write_str(",")?;
                }
                Display::fmt(c, f)?;
            }
            f.write_str("}")?;
        }
        f.write_str("}")
    }
}
