//! Error types for u-tsp.
//!
//! Only loading and configuration validation can fail. The evolutionary
//! engine itself is total: every operator derives its indices from the
//! tour length and cannot go out of bounds.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for u-tsp operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for all fallible u-tsp operations.
#[derive(Debug, Error)]
pub enum TspError {
    /// The distance matrix is not square, not symmetric, or misses rows.
    #[error("malformed distance matrix: {0}")]
    MalformedMatrix(String),

    /// A token in a matrix file is not a non-negative integer.
    #[error("line {line}: cannot parse '{token}' as a distance")]
    Parse {
        /// 1-based line number in the source text.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// The matrix file could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is out of its allowed range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TspError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        TspError::InvalidConfig(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TspError::Parse {
            line: 3,
            token: "x1".into(),
        };
        assert_eq!(err.to_string(), "line 3: cannot parse 'x1' as a distance");

        let err = TspError::config("population_size must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid configuration: population_size must be at least 1"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;
        let err = TspError::Io {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().starts_with("cannot read 'missing.txt'"));
        assert!(err.source().is_some());
    }
}
