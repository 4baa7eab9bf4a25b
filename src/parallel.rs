//! Parallel matrix operations.
//!
//! This module provides parallelized versions of the data-parallel matrix
//! operations using rayon for work-stealing parallelism. Parallel regions
//! sit exactly on the independence boundaries of each algorithm: transpose,
//! addition, subtraction and multiplication parallelize over output cells,
//! while the elimination phases of inversion parallelize over rows within a
//! pivot step. The join at the end of each rayon region is the barrier that
//! orders successive pivot steps.

use rayon::prelude::*;

use crate::dense_matrix::{DenseMatrix, DEFAULT_PIVOT_TOLERANCE};
use crate::error::MatrixError;

/// Configuration for parallel matrix operations.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Minimum matrix dimension to enable parallel inversion.
    pub parallel_threshold: usize,
    /// Near-zero threshold below which a pivot is treated as singular.
    pub pivot_tolerance: f64,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

/// Parallel transpose: every output cell depends on exactly one input cell.
#[must_use]
pub fn parallel_transpose(matrix: &DenseMatrix) -> DenseMatrix {
    let data: Vec<f64> = (0..matrix.num_cols())
        .into_par_iter()
        .flat_map(|j| {
            (0..matrix.num_rows())
                .map(|i| matrix[(i, j)])
                .collect::<Vec<_>>()
        })
        .collect();

    DenseMatrix::from_vec(matrix.num_cols(), matrix.num_rows(), data)
}

/// Parallel element-wise addition: c = a + b.
pub fn parallel_add(lhs: &DenseMatrix, rhs: &DenseMatrix) -> Result<DenseMatrix, MatrixError> {
    lhs.check_same_shape(rhs)?;

    let data: Vec<f64> = lhs
        .as_slice()
        .par_iter()
        .zip(rhs.as_slice().par_iter())
        .map(|(a, b)| a + b)
        .collect();

    Ok(DenseMatrix::from_vec(lhs.num_rows(), lhs.num_cols(), data))
}

/// Parallel element-wise subtraction: c = a - b.
pub fn parallel_sub(lhs: &DenseMatrix, rhs: &DenseMatrix) -> Result<DenseMatrix, MatrixError> {
    lhs.check_same_shape(rhs)?;

    let data: Vec<f64> = lhs
        .as_slice()
        .par_iter()
        .zip(rhs.as_slice().par_iter())
        .map(|(a, b)| a - b)
        .collect();

    Ok(DenseMatrix::from_vec(lhs.num_rows(), lhs.num_cols(), data))
}

/// Parallel matrix-matrix multiply: C = A * B.
///
/// Output cells are independent; the work parallelizes over output rows
/// while each cell's inner reduction stays sequential.
pub fn parallel_mm(lhs: &DenseMatrix, rhs: &DenseMatrix) -> Result<DenseMatrix, MatrixError> {
    if lhs.num_cols() != rhs.num_rows() {
        return Err(lhs.shape_mismatch(rhs));
    }

    let data: Vec<f64> = (0..lhs.num_rows())
        .into_par_iter()
        .flat_map(|i| {
            (0..rhs.num_cols())
                .map(|j| {
                    let mut sum = 0.0;
                    for k in 0..lhs.num_cols() {
                        sum += lhs[(i, k)] * rhs[(k, j)];
                    }
                    sum
                })
                .collect::<Vec<_>>()
        })
        .collect();

    Ok(DenseMatrix::from_vec(lhs.num_rows(), rhs.num_cols(), data))
}

/// Parallel Gauss-Jordan inversion.
///
/// Runs the same three elimination phases as
/// [`DenseMatrix::inverse_with_tolerance`], with identical failure semantics
/// and cell-for-cell identical numerics:
///
/// 1. forward elimination parallelizes over the rows below each pivot (each
///    row reads only the pivot row and mutates only itself), with a barrier
///    between successive pivots;
/// 2. normalization parallelizes over all rows at once;
/// 3. backward elimination processes rows in strictly decreasing order,
///    parallelizing the companion update over the columns of the target row
///    while the finalized rows below are read-only.
///
/// Matrices smaller than [`ParallelConfig::parallel_threshold`] fall back to
/// the sequential path.
pub fn parallel_inverse(
    matrix: &DenseMatrix,
    config: &ParallelConfig,
) -> Result<DenseMatrix, MatrixError> {
    if !matrix.is_square() {
        return Err(MatrixError::NotSquare {
            num_rows: matrix.num_rows(),
            num_cols: matrix.num_cols(),
        });
    }
    let n = matrix.num_rows();
    if n == 0 || n < config.parallel_threshold {
        return matrix.inverse_with_tolerance(config.pivot_tolerance);
    }
    let tolerance = config.pivot_tolerance;
    let mut work = matrix.clone();
    let mut inv = DenseMatrix::identity(n);

    // Forward elimination. Rows below the pivot update in parallel as
    // disjoint slabs of both matrices; the join is the barrier before the
    // next pivot reads the updated trailing submatrix.
    for k in 0..n.saturating_sub(1) {
        let pivot = work[(k, k)];
        if pivot.abs() < tolerance {
            return Err(MatrixError::SingularPivot {
                value: pivot,
                index: k,
            });
        }
        let split = (k + 1) * n;
        let (work_head, work_tail) = work.as_mut_slice().split_at_mut(split);
        let (inv_head, inv_tail) = inv.as_mut_slice().split_at_mut(split);
        let pivot_row = &work_head[k * n..];
        let inv_pivot_row = &inv_head[k * n..];

        work_tail
            .par_chunks_mut(n)
            .zip(inv_tail.par_chunks_mut(n))
            .for_each(|(work_row, inv_row)| {
                let coef = work_row[k] / pivot;
                for j in k..n {
                    work_row[j] -= pivot_row[j] * coef;
                }
                for (j, v) in inv_row.iter_mut().enumerate() {
                    *v -= inv_pivot_row[j] * coef;
                }
            });
    }

    // Normalization. Each row reads only its own prior values, so all rows
    // scale in parallel; the diagonal is rechecked since elimination can
    // collapse an entry that was never used as a pivot. The join is the
    // barrier before backward elimination starts consuming finalized rows.
    work.as_mut_slice()
        .par_chunks_mut(n)
        .zip(inv.as_mut_slice().par_chunks_mut(n))
        .enumerate()
        .try_for_each(|(i, (work_row, inv_row))| {
            let coef = work_row[i];
            if coef.abs() < tolerance {
                return Err(MatrixError::SingularPivot {
                    value: coef,
                    index: i,
                });
            }
            // Entries left of the diagonal are already zero.
            for j in i..n {
                work_row[j] /= coef;
            }
            for v in inv_row.iter_mut() {
                *v /= coef;
            }
            Ok(())
        })?;

    // Backward elimination. Row i depends on the finalized rows below it, so
    // i stays strictly sequential; within a fixed i the companion update
    // parallelizes over output columns, each accumulating its contributions
    // in descending j exactly like the sequential loop.
    for i in (0..n.saturating_sub(1)).rev() {
        let split = (i + 1) * n;
        let (work_head, work_tail) = work.as_mut_slice().split_at_mut(split);
        let (inv_head, inv_tail) = inv.as_mut_slice().split_at_mut(split);
        let work_tail: &[f64] = work_tail;
        let inv_tail: &[f64] = inv_tail;
        let work_row = &mut work_head[i * n..];
        let inv_row = &mut inv_head[i * n..];

        {
            let work_row: &[f64] = work_row;
            inv_row.par_iter_mut().enumerate().for_each(|(m, v)| {
                for j in (i + 1..n).rev() {
                    *v -= inv_tail[(j - i - 1) * n + m] * work_row[j];
                }
            });
        }

        for j in (i + 1..n).rev() {
            work_row[j] -= work_tail[(j - i - 1) * n + j] * work_row[j];
        }
    }

    Ok(inv)
}
