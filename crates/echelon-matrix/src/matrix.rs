//! Dense matrix of exact rationals, stored in row-major order.

use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::Zero;
use thiserror::Error;

use echelon_rational::{Rational, RationalError};

/// Errors produced by matrix mutations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A row or column index outside the matrix extent.
    #[error("index ({row}, {col}) out of bounds for a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Matrix row count.
        rows: usize,
        /// Matrix column count.
        cols: usize,
    },

    /// Scaling a row by zero, which is not an elementary row operation.
    #[error("cannot scale a row by zero")]
    ZeroRowScale,

    /// Cell text that does not parse as a number.
    #[error(transparent)]
    Number(#[from] RationalError),
}

/// A rows-by-cols grid of [`Rational`] values.
///
/// Rows and columns are addressed by zero-based index. `Clone` is a deep
/// copy: mutating a clone never affects the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Entries in row-major order.
    data: Vec<Rational>,
    num_rows: usize,
    num_cols: usize,
}

impl Matrix {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![Rational::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<Rational> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns a reference to the entry at (row, col).
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Rational> {
        if row < self.num_rows && col < self.num_cols {
            Some(&self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Rational] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Sets the entry at (row, col).
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfBounds`] if the indices are outside
    /// the matrix extent.
    pub fn set(&mut self, row: usize, col: usize, value: Rational) -> Result<(), MatrixError> {
        let (rows, cols) = (self.num_rows, self.num_cols);
        if row >= rows || col >= cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        self.data[row * cols + col] = value;
        Ok(())
    }

    /// Sets the entry at (row, col) from cell text.
    ///
    /// Accepts whatever [`Rational`] parses: integers, decimals, fractions.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Number`] for unparseable text and
    /// [`MatrixError::IndexOutOfBounds`] for bad indices. On error the
    /// matrix is unchanged.
    pub fn set_text(&mut self, row: usize, col: usize, text: &str) -> Result<(), MatrixError> {
        let value: Rational = text.parse()?;
        self.set(row, col, value)
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        let a = r1 * self.num_cols;
        let b = r2 * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(a + k, b + k);
        }
    }

    /// Scales a row by a nonzero scalar.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ZeroRowScale`] if the scalar is zero; the
    /// row is left unchanged.
    pub fn scale_row(&mut self, row: usize, scale: &Rational) -> Result<(), MatrixError> {
        if scale.is_zero() {
            return Err(MatrixError::ZeroRowScale);
        }
        for k in 0..self.num_cols {
            self[(row, k)] = &self[(row, k)] * scale;
        }
        Ok(())
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    ///
    /// `source` may equal `target`; the source values are read before any
    /// write lands.
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &Rational) {
        for k in 0..self.num_cols {
            let term = &self[(source, k)] * scale;
            self[(target, k)] = &self[(target, k)] + &term;
        }
    }

    /// Returns the cell texts, row by row.
    #[must_use]
    pub fn to_text_grid(&self) -> Vec<Vec<String>> {
        (0..self.num_rows)
            .map(|i| self.row(i).iter().map(Rational::to_string).collect())
            .collect()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.num_rows {
            let cells: Vec<String> = self.row(i).iter().map(Rational::to_string).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
