//! Text loader for lower-triangular distance matrices.
//!
//! # Format
//!
//! ```text
//! <header line, ignored>
//! 0
//! 10 0
//! 15 35 0
//! 20 25 30 0
//! ```
//!
//! Each data line `i` lists the distances from node `i` to nodes `0..=i`,
//! separated by whitespace. The number of data lines is the node count.
//! Blank lines are skipped.

use super::DistanceMatrix;
use crate::error::{TspError, TspResult};
use std::path::Path;

/// Parses the triangular text format into a [`DistanceMatrix`].
pub fn parse_lower_triangular(text: &str) -> TspResult<DistanceMatrix> {
    let mut rows = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u64>().map_err(|_| TspError::Parse {
                    line: idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<TspResult<Vec<u64>>>()?;
        rows.push(row);
    }

    DistanceMatrix::from_lower_triangular(rows)
}

/// Reads and parses a triangular matrix file.
pub fn load_lower_triangular(path: impl AsRef<Path>) -> TspResult<DistanceMatrix> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| TspError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = parse_lower_triangular(&text)?;
    tracing::debug!(path = %path.display(), nodes = matrix.size(), "loaded distance matrix");
    Ok(matrix)
}
