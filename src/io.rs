//! CSV ingestion and emission.
//!
//! One row per non-blank line, values separated by commas and/or
//! whitespace, no header. Blank lines are skipped entirely. Every non-blank
//! line must contribute the same number of values; ragged input fails with
//! [`MatrixError::RaggedRows`] instead of silently reshaping.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use log::debug;

use crate::dense_matrix::DenseMatrix;
use crate::error::MatrixError;

/// Reads a matrix from a CSV file.
///
/// Fails with [`MatrixError::Io`] if the file cannot be opened, and with
/// [`MatrixError::Parse`] or [`MatrixError::RaggedRows`] on malformed
/// content. An input with no non-blank lines yields the empty matrix.
pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<DenseMatrix, MatrixError> {
    let file = File::open(path.as_ref())?;
    let matrix = read_from(BufReader::new(file))?;
    debug!(
        "read {}x{} matrix from {}",
        matrix.num_rows(),
        matrix.num_cols(),
        path.as_ref().display()
    );
    Ok(matrix)
}

/// Reads a matrix in CSV form from any buffered reader.
pub fn read_from<R: BufRead>(reader: R) -> Result<DenseMatrix, MatrixError> {
    let mut values = Vec::new();
    let mut num_rows = 0;
    let mut num_cols = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut row_len = 0;
        for token in line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let value = token.parse::<f64>().map_err(|source| MatrixError::Parse {
                token: token.to_string(),
                line: index + 1,
                source,
            })?;
            values.push(value);
            row_len += 1;
        }
        match num_cols {
            None => num_cols = Some(row_len),
            Some(expected) if expected != row_len => {
                return Err(MatrixError::RaggedRows {
                    line: index + 1,
                    expected,
                    found: row_len,
                });
            }
            Some(_) => {}
        }
        num_rows += 1;
    }

    Ok(DenseMatrix::from_vec(
        num_rows,
        num_cols.unwrap_or(0),
        values,
    ))
}

/// Writes a matrix as comma-separated rows, one line per row.
pub fn write_matrix<P: AsRef<Path>>(matrix: &DenseMatrix, path: P) -> Result<(), MatrixError> {
    let mut file = File::create(path.as_ref())?;
    for i in 0..matrix.num_rows() {
        let line = matrix
            .row(i)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(file, "{line}")?;
    }
    debug!(
        "wrote {}x{} matrix to {}",
        matrix.num_rows(),
        matrix.num_cols(),
        path.as_ref().display()
    );
    Ok(())
}
