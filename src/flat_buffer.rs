//! Flat contiguous buffer interop.
//!
//! [`FlatBuffer`] is a plain row-major record used to pass matrix contents
//! across API boundaries that cannot consume [`DenseMatrix`] itself, e.g.
//! into or out of external numeric libraries. Conversion in either direction
//! performs a full copy; the buffer owns its memory independently of any
//! matrix.

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

/// Row-major flattened copy of a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatBuffer {
    /// Number of rows.
    pub num_rows: usize,
    /// Number of columns.
    pub num_cols: usize,
    /// `num_rows * num_cols` values, row-major.
    pub data: Vec<f64>,
}

impl FlatBuffer {
    /// Creates a buffer, validating shape and length.
    ///
    /// Fails with [`MatrixError::DegenerateShape`] on zero rows or columns
    /// and [`MatrixError::Internal`] if `data` does not hold exactly
    /// `num_rows * num_cols` values.
    pub fn new(num_rows: usize, num_cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if num_rows == 0 || num_cols == 0 {
            return Err(MatrixError::DegenerateShape);
        }
        if data.len() != num_rows * num_cols {
            return Err(MatrixError::Internal(format!(
                "buffer holds {} values for a {num_rows}x{num_cols} shape",
                data.len()
            )));
        }
        Ok(Self {
            num_rows,
            num_cols,
            data,
        })
    }

    /// Total number of values, `num_rows * num_cols`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Whether the buffer holds no values. Always false for a buffer built
    /// through [`FlatBuffer::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl DenseMatrix {
    /// Copies the matrix into a freshly allocated [`FlatBuffer`].
    ///
    /// Fails with [`MatrixError::DegenerateShape`] if the matrix has zero
    /// rows or zero columns. The copied value count is verified against
    /// `num_rows * num_cols`; a mismatch signals a prior invariant violation
    /// and fails with [`MatrixError::Internal`].
    pub fn to_flat_buffer(&self) -> Result<FlatBuffer, MatrixError> {
        if self.num_rows() == 0 || self.num_cols() == 0 {
            return Err(MatrixError::DegenerateShape);
        }
        let expected = self.num_rows() * self.num_cols();
        let mut data = Vec::with_capacity(expected);
        for i in 0..self.num_rows() {
            data.extend_from_slice(self.row(i));
        }
        if data.len() != expected {
            return Err(MatrixError::Internal(format!(
                "copied {} values out of a {}x{} matrix",
                data.len(),
                self.num_rows(),
                self.num_cols()
            )));
        }
        Ok(FlatBuffer {
            num_rows: self.num_rows(),
            num_cols: self.num_cols(),
            data,
        })
    }

    /// Builds a matrix from a [`FlatBuffer`], copying values back out in
    /// row-major order.
    ///
    /// Fails with [`MatrixError::DegenerateShape`] if the buffer has zero
    /// rows or zero columns.
    pub fn from_flat_buffer(buffer: &FlatBuffer) -> Result<Self, MatrixError> {
        if buffer.num_rows == 0 || buffer.num_cols == 0 {
            return Err(MatrixError::DegenerateShape);
        }
        if buffer.data.len() != buffer.num_rows * buffer.num_cols {
            return Err(MatrixError::Internal(format!(
                "buffer holds {} values for a {}x{} shape",
                buffer.data.len(),
                buffer.num_rows,
                buffer.num_cols
            )));
        }
        let mut matrix = Self::new();
        matrix.resize(buffer.num_rows, buffer.num_cols);
        matrix.as_mut_slice().copy_from_slice(&buffer.data);
        Ok(matrix)
    }
}
