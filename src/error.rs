//! Error types shared across the crate.

use std::num::ParseFloatError;

use thiserror::Error;

/// Errors that can occur during matrix I/O, marshaling and algebra.
///
/// Every error is raised synchronously at the point of detection and
/// propagated to the immediate caller; nothing is retried or recovered
/// internally.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// The input file could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A CSV token could not be parsed as a floating-point number.
    #[error("invalid numeric token {token:?} on line {line}: {source}")]
    Parse {
        /// The offending token.
        token: String,
        /// 1-based line number in the input.
        line: usize,
        /// The underlying float parse failure.
        source: ParseFloatError,
    },

    /// A CSV row contributed a different number of values than the first row.
    #[error("ragged input: line {line} has {found} values, expected {expected}")]
    RaggedRows {
        /// 1-based line number of the offending row.
        line: usize,
        /// Values per row established by the first non-blank line.
        expected: usize,
        /// Values found on the offending row.
        found: usize,
    },

    /// Operand shapes are incompatible for the requested operation.
    #[error(
        "shape mismatch: left is {left_rows}x{left_cols}, right is {right_rows}x{right_cols}"
    )]
    ShapeMismatch {
        /// Rows of the left operand.
        left_rows: usize,
        /// Columns of the left operand.
        left_cols: usize,
        /// Rows of the right operand.
        right_rows: usize,
        /// Columns of the right operand.
        right_cols: usize,
    },

    /// Inversion was attempted on a non-square matrix.
    #[error("matrix must be square, got {num_rows}x{num_cols}")]
    NotSquare {
        /// Number of rows.
        num_rows: usize,
        /// Number of columns.
        num_cols: usize,
    },

    /// A pivot or diagonal entry fell below the near-zero tolerance during
    /// elimination. No row permutation is ever attempted, so this is fatal.
    #[error("near-singular pivot {value:e} at row {index}; row permutation is not attempted")]
    SingularPivot {
        /// The offending pivot value.
        value: f64,
        /// Row index of the offending pivot.
        index: usize,
    },

    /// Buffer conversion was attempted on a matrix or buffer with zero rows
    /// or zero columns.
    #[error("degenerate shape: zero rows or zero columns")]
    DegenerateShape,

    /// An internal invariant was violated. Should be unreachable; raised only
    /// if a prior invariant violation corrupted the storage shape.
    #[error("internal consistency error: {0}")]
    Internal(String),
}
