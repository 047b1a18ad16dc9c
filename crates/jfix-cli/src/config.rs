//! Run configuration
//!
//! Loaded from a TOML file (`jfix.toml` by default). Relative paths inside
//! the file are resolved against the file's directory. Command-line flags
//! override individual values.

use jfix_fingerprint::{FingerprintError, ProbeSet};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "jfix.toml";

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("io error reading {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file malformed
    #[error("invalid config {path}: {source}")]
    Toml {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Probe selection names an unknown probe
    #[error("invalid probe selection: {0}")]
    Probes(#[from] FingerprintError),
}

/// Report encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per fixture
    #[default]
    Text,
    /// Pretty-printed JSON document
    Json,
}

/// Which probes to run: `"core"`, `"extended"`, or an explicit list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ProbeSelection {
    /// Named group, or comma-separated probe names
    Named(String),
    /// Explicit probe names
    List(Vec<String>),
}

impl Default for ProbeSelection {
    fn default() -> Self {
        Self::Named("core".to_string())
    }
}

impl ProbeSelection {
    /// Resolve into a probe set
    ///
    /// # Errors
    /// Returns [`ConfigError::Probes`] for unknown names or an empty list.
    pub fn resolve(&self) -> Result<ProbeSet, ConfigError> {
        let set = match self {
            Self::Named(spec) => spec.parse()?,
            Self::List(names) => ProbeSet::select(names)?,
        };
        Ok(set)
    }
}

/// Settings for a verification run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Files or directories holding fixtures
    pub corpus: Vec<PathBuf>,
    /// Expectation tables, merged in order
    pub expectations: Vec<PathBuf>,
    /// Fixture extensions accepted in directory scans
    pub extensions: Vec<String>,
    /// Probe selection
    pub probes: ProbeSelection,
    /// Extract fingerprints in parallel
    pub parallel: bool,
    /// Report encoding
    pub format: OutputFormat,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: Vec::new(),
            expectations: Vec::new(),
            extensions: jfix_corpus::DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            probes: ProbeSelection::default(),
            parallel: false,
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
            log_json: false,
        }
    }
}

impl Config {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Parse TOML text without resolving paths
    ///
    /// # Errors
    /// Returns the TOML error on malformed input.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path`, else `jfix.toml` in the working directory if present,
    /// else defaults
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a config file exists but cannot be loaded.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn rebase(&mut self, base: &Path) {
        for path in self.corpus.iter_mut().chain(self.expectations.iter_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
