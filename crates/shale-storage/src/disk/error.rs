//! I/O error types for the disk module.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for disk I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during disk I/O operations.
#[derive(Debug, Error)]
#[allow(missing_docs)] // Fields are documented by variant docs
pub enum IoError {
    /// Standard I/O error.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// File not found.
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Buffer has the wrong length for a page transfer.
    #[error("invalid buffer length: expected {expected} bytes, got {actual}")]
    InvalidBufferLength { expected: usize, actual: usize },
}

impl IoError {
    /// Creates a new NotFound error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
            || matches!(self, Self::Io { source } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Converts from std::io::Error with path context.
    pub fn from_io_with_path(err: io::Error, path: impl Into<PathBuf>) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path: path.into() },
            _ => Self::Io { source: err },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = IoError::not_found("/tmp/missing.db");
        assert!(err.is_not_found());

        let std_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: IoError = std_err.into();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_buffer_length_display() {
        let err = IoError::InvalidBufferLength {
            expected: 4096,
            actual: 100,
        };
        assert_eq!(
            err.to_string(),
            "invalid buffer length: expected 4096 bytes, got 100"
        );
    }

    #[test]
    fn test_from_io_with_path() {
        let std_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = IoError::from_io_with_path(std_err, "/tmp/x.db");
        assert!(matches!(err, IoError::NotFound { .. }));

        let std_err = io::Error::new(io::ErrorKind::PermissionDenied, "no");
        let err = IoError::from_io_with_path(std_err, "/tmp/x.db");
        assert!(matches!(err, IoError::Io { .. }));
    }
}
