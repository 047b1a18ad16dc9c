//! Error types for expectation tables and the registry
//!
//! Provides error handling for:
//! - Table loading (file → expectations), always fatal
//! - Registry overwrites, reported but never fatal

use jfix_fingerprint::{Fingerprint, FingerprintError};
use std::path::PathBuf;

/// Errors while reading an expectation table
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML table
    #[error("invalid toml in {path}: {source}")]
    Toml {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Malformed JSON table
    #[error("invalid json in {path}: {source}")]
    Json {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Malformed YAML table
    #[error("invalid yaml in {path}: {source}")]
    Yaml {
        /// Table path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_yaml::Error,
    },

    /// Bad line in a line-format table
    #[error("{path}:{line}: {source}")]
    Line {
        /// Table path
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        #[source]
        source: FingerprintError,
    },
}

impl TableError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// An expectation was registered twice; the later one won
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expectation for '{identifier}' overwritten ({previous} -> {replacement})")]
pub struct RegistryConflict {
    /// Fixture identifier
    pub identifier: String,
    /// Fingerprint that was replaced
    pub previous: Fingerprint,
    /// Fingerprint now registered
    pub replacement: Fingerprint,
}
