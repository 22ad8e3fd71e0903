//! Error types for search operations.
//!
//! Every fallible operation in this crate returns [`SearchResult`]. The
//! variants map onto the distinct failure classes a run can hit: a pattern
//! that does not compile, a source that cannot be opened or read, and a
//! failure writing to the output sink (most commonly a closed downstream
//! pipe). The CLI maps each class to its own exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("{path}: file not found")]
    FileNotFound { path: PathBuf },
    #[error("{path}: permission denied")]
    PermissionDenied { path: PathBuf },
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: Box<regex::Error>,
    },
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("{path}: {source}")]
    SourceError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("output error: {0}")]
    OutputError(std::io::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source: Box::new(source),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Classifies an open/read failure for a named source, preserving the path.
    pub fn source_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::SourceError { path, source },
        }
    }

    pub fn output_error(source: std::io::Error) -> Self {
        Self::OutputError(source)
    }

    /// True for failures of the output sink, which abort the run immediately
    /// instead of being reported per-file.
    pub fn is_output_error(&self) -> bool {
        matches!(self, Self::OutputError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_error_creation() {
        let path = Path::new("test.txt");
        let err = SearchError::file_not_found(path);
        assert!(matches!(err, SearchError::FileNotFound { .. }));

        let err = SearchError::permission_denied(path);
        assert!(matches!(err, SearchError::PermissionDenied { .. }));

        let err = SearchError::config_error("missing pattern");
        assert!(matches!(err, SearchError::ConfigError(_)));
    }

    #[test]
    fn test_source_error_classification() {
        let path = Path::new("data.log");

        let err = SearchError::source_error(path, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, SearchError::FileNotFound { .. }));

        let err =
            SearchError::source_error(path, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, SearchError::PermissionDenied { .. }));

        let err = SearchError::source_error(path, io::Error::from(io::ErrorKind::TimedOut));
        assert!(matches!(err, SearchError::SourceError { .. }));
    }

    #[test]
    fn test_error_messages() {
        let err = SearchError::file_not_found("test.txt");
        assert_eq!(err.to_string(), "test.txt: file not found");

        let err = SearchError::config_error("missing pattern");
        assert_eq!(err.to_string(), "configuration error: missing pattern");

        let bad = regex::Regex::new("a(b").unwrap_err();
        let err = SearchError::invalid_pattern("a(b", bad);
        assert!(err.to_string().starts_with("invalid pattern 'a(b':"));
    }

    #[test]
    fn test_output_error_detection() {
        let err = SearchError::output_error(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(err.is_output_error());

        let err = SearchError::file_not_found("x");
        assert!(!err.is_output_error());
    }
}
