//! Error types for the fixture store

use std::path::PathBuf;

/// Errors raised while loading a corpus
///
/// Every variant is fatal for a run: verification never starts on a
/// partially loaded corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Fixture could not be read (missing, permission denied, not UTF-8)
    #[error("io error reading {path}: {source}")]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Root is neither a regular file nor a directory
    #[error("directory or regular file expected: {0}")]
    NotFound(PathBuf),

    /// Named file does not carry a supported extension
    #[error("unsupported fixture file: {path} (expected one of: {expected})")]
    Unsupported {
        /// Offending path
        path: PathBuf,
        /// Comma-separated list of accepted extensions
        expected: String,
    },
}

impl CorpusError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Unsupported { path, .. } | Self::NotFound(path) => path,
        }
    }
}

/// Result type alias for corpus operations
pub type CorpusResult<T> = Result<T, CorpusError>;
