//! Error types for mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// A record could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// A face refers to a vertex that does not exist.
    #[error("line {line}: vertex index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange {
        /// 1-based line number of the face record.
        line: usize,
        /// Index as written in the file.
        index: i64,
        /// Number of vertices in the file.
        vertex_count: usize,
    },

    /// The file contains no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IoError {
    /// Create a `Parse` error for the given line.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_names_line() {
        let err = IoError::parse(17, "expected 3 coordinates");
        assert_eq!(err.to_string(), "line 17: expected 3 coordinates");
    }

    #[test]
    fn index_error_display() {
        let err = IoError::IndexOutOfRange {
            line: 4,
            index: -9,
            vertex_count: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("-9"));
        assert!(msg.contains("3 vertices"));
    }
}
