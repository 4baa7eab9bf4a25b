//! Dense matrix implementation with row-major flat storage.
//!
//! A single contiguous buffer with row-stride indexing keeps the multiply
//! and elimination hot loops cache-friendly; row access is exposed as a
//! bounds-checked slice view over that buffer.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};

use crate::error::MatrixError;

/// Default near-zero threshold below which a pivot is treated as singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-9;

/// Dense `f64` matrix stored in row-major order.
///
/// The default value is the empty `0 x 0` matrix, a valid state distinct
/// from any `1 x 1` matrix. All algebraic operations allocate and return a
/// new matrix; operands are never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseMatrix {
    /// Matrix entries in row-major order.
    data: Vec<f64>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl DenseMatrix {
    /// Creates an empty `0 x 0` matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![0.0; num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a square `n x n` matrix filled with zeros.
    #[must_use]
    pub fn square(n: usize) -> Self {
        Self::zeros(n, n)
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Creates a matrix from a 2D vector.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same length.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols);
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from a row-major flat vector.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != num_rows * num_cols`.
    #[must_use]
    pub fn from_vec(num_rows: usize, num_cols: usize, data: Vec<f64>) -> Self {
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

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.num_rows == self.num_cols
    }

    /// Reshapes the matrix to the given dimensions, setting every cell to
    /// zero. Nothing of the old content survives a call; `resize(0, 0)`
    /// empties the matrix and releases its storage.
    pub fn resize(&mut self, num_rows: usize, num_cols: usize) {
        self.data = vec![0.0; num_rows * num_cols];
        self.num_rows = num_rows;
        self.num_cols = num_cols;
    }

    /// Returns the entry at (row, col), or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.num_rows && col < self.num_cols {
            Some(self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a mutable reference to the entry at (row, col), or `None` if
    /// out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        if row < self.num_rows && col < self.num_cols {
            Some(&mut self.data[row * self.num_cols + col])
        } else {
            None
        }
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Returns a mutable slice of the specified row.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.num_cols;
        &mut self.data[start..start + self.num_cols]
    }

    /// Returns the flat row-major storage as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the flat row-major storage as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Checks whether every diagonal entry dominates its row: for each row
    /// `i`, `|a[i][i]|` must be at least the sum of absolute values of the
    /// off-diagonal entries in that row.
    ///
    /// Only meaningful for square matrices.
    #[must_use]
    pub fn is_diagonally_dominant(&self) -> bool {
        debug_assert!(self.is_square());
        (0..self.num_rows).all(|i| {
            let abs_sum: f64 = self.row(i).iter().map(|v| v.abs()).sum();
            let diag = self[(i, i)].abs();
            diag >= abs_sum - diag
        })
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.num_cols, self.num_rows);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }

    /// Element-wise addition, failing on any shape mismatch.
    pub fn try_add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(other)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Element-wise subtraction, failing on any shape mismatch.
    pub fn try_sub(&self, other: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(other)?;
        Ok(Self {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        })
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// Requires `self.num_cols() == other.num_rows()`; each output cell is a
    /// full-precision `f64` accumulation over the inner dimension.
    pub fn mm(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.num_cols != other.num_rows {
            return Err(self.shape_mismatch(other));
        }
        let mut result = Self::zeros(self.num_rows, other.num_cols);
        for i in 0..self.num_rows {
            for j in 0..other.num_cols {
                let mut sum = 0.0;
                for k in 0..self.num_cols {
                    sum += self[(i, k)] * other[(k, j)];
                }
                result[(i, j)] = sum;
            }
        }
        Ok(result)
    }

    /// Computes the inverse by Gauss-Jordan elimination with the default
    /// pivot tolerance ([`DEFAULT_PIVOT_TOLERANCE`]).
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        self.inverse_with_tolerance(DEFAULT_PIVOT_TOLERANCE)
    }

    /// Computes the inverse by Gauss-Jordan elimination with an explicit
    /// near-zero pivot tolerance.
    ///
    /// The elimination runs in three phases over a working copy of `self`
    /// and an identity-initialized companion matrix: forward elimination
    /// clears everything below the diagonal, normalization scales each
    /// diagonal entry to one, and backward elimination clears everything
    /// above the diagonal, mirroring every row operation onto the companion.
    ///
    /// Rows are never permuted: any pivot whose magnitude falls below
    /// `tolerance` fails with [`MatrixError::SingularPivot`] instead.
    pub fn inverse_with_tolerance(&self, tolerance: f64) -> Result<Self, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            });
        }
        let n = self.num_rows;
        let mut work = self.clone();
        let mut inv = Self::identity(n);

        // Forward elimination: clear everything below the diagonal.
        for k in 0..n.saturating_sub(1) {
            let pivot = work[(k, k)];
            if pivot.abs() < tolerance {
                return Err(MatrixError::SingularPivot {
                    value: pivot,
                    index: k,
                });
            }
            for i in k + 1..n {
                let coef = work[(i, k)] / pivot;
                for j in k..n {
                    work[(i, j)] -= work[(k, j)] * coef;
                }
                for j in 0..n {
                    inv[(i, j)] -= inv[(k, j)] * coef;
                }
            }
        }

        // Normalization: scale each diagonal entry to one. The diagonal is
        // rechecked here; elimination can collapse an entry that was never
        // used as a pivot above.
        for i in 0..n {
            let coef = work[(i, i)];
            if coef.abs() < tolerance {
                return Err(MatrixError::SingularPivot {
                    value: coef,
                    index: i,
                });
            }
            // Entries left of the diagonal are already zero.
            for j in i..n {
                work[(i, j)] /= coef;
            }
            for j in 0..n {
                inv[(i, j)] /= coef;
            }
        }

        // Backward elimination: clear everything above the diagonal, right
        // to left, so each subtraction reads an already-finalized row.
        for i in (0..n.saturating_sub(1)).rev() {
            for j in (i + 1..n).rev() {
                let coef = work[(i, j)];
                for m in 0..n {
                    inv[(i, m)] -= inv[(j, m)] * coef;
                }
                work[(i, j)] -= work[(j, j)] * coef;
            }
        }

        Ok(inv)
    }

    pub(crate) fn check_same_shape(&self, other: &Self) -> Result<(), MatrixError> {
        if self.num_rows != other.num_rows || self.num_cols != other.num_cols {
            return Err(self.shape_mismatch(other));
        }
        Ok(())
    }

    pub(crate) fn shape_mismatch(&self, other: &Self) -> MatrixError {
        MatrixError::ShapeMismatch {
            left_rows: self.num_rows,
            left_cols: self.num_cols,
            right_rows: other.num_rows,
            right_cols: other.num_cols,
        }
    }
}

impl Index<(usize, usize)> for DenseMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for DenseMatrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

impl Add for &DenseMatrix {
    type Output = DenseMatrix;

    fn add(self, other: Self) -> DenseMatrix {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a + b)
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl Sub for &DenseMatrix {
    type Output = DenseMatrix;

    fn sub(self, other: Self) -> DenseMatrix {
        assert_eq!(self.num_rows, other.num_rows);
        assert_eq!(self.num_cols, other.num_cols);

        DenseMatrix {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| a - b)
                .collect(),
            num_rows: self.num_rows,
            num_cols: self.num_cols,
        }
    }
}

impl fmt::Display for DenseMatrix {
    /// Renders a header with the dimensions, a column-index row, then one
    /// line per row prefixed with its row index, values tab-separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix [{}][{}]:", self.num_rows, self.num_cols)?;
        write!(f, "\t")?;
        for j in 0..self.num_cols {
            write!(f, "[ ,{j}]\t")?;
        }
        writeln!(f)?;
        for i in 0..self.num_rows {
            write!(f, "[{i}, ]\t")?;
            for j in 0..self.num_cols {
                write!(f, "{} \t", self[(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
