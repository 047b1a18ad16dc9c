//! Expectation tables
//!
//! Tables are chosen by file extension:
//! - `.toml`, `.json`, `.yaml`/`.yml` via serde, as a list of entries:
//!
//! ```toml
//! [[fixture]]
//! id = "Java8Sample.java"
//! features = { lambda_arrow = 1, method_reference = 2 }
//! ```
//!
//! - anything else as plain lines, `identifier name:count ...`, with `#`
//!   comments. An identifier alone expects an empty fingerprint.

use crate::error::TableError;
use crate::registry::Expectation;
use jfix_fingerprint::Fingerprint;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Supported table encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// TOML document with `[[fixture]]` entries
    Toml,
    /// JSON document with a `fixture` array
    Json,
    /// YAML document with a `fixture` sequence
    Yaml,
    /// One expectation per line
    Lines,
}

impl TableFormat {
    /// Pick format from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Self::Toml,
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Lines,
        }
    }

    /// Get lowercase name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Lines => "lines",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDocument {
    #[serde(default)]
    fixture: Vec<TableEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableEntry {
    id: String,
    #[serde(default)]
    features: Fingerprint,
}

impl From<TableEntry> for Expectation {
    fn from(entry: TableEntry) -> Self {
        Expectation::new(entry.id, entry.features)
    }
}

/// Read a table file, format chosen by extension
///
/// # Errors
/// Returns [`TableError`] if the file cannot be read or parsed.
pub fn load_table(path: &Path) -> Result<Vec<Expectation>, TableError> {
    let text = fs::read_to_string(path).map_err(|e| TableError::io_error(path, e))?;
    let format = TableFormat::from_path(path);
    tracing::debug!("Loading {} table: {}", format.name(), path.display());
    parse_table(&text, format, path)
}

/// Parse table text; `origin` is only used in error messages
///
/// Entries are returned in document order, repeats included.
///
/// # Errors
/// Returns [`TableError`] on malformed input.
pub fn parse_table(text: &str, format: TableFormat, origin: &Path) -> Result<Vec<Expectation>, TableError> {
    let document: TableDocument = match format {
        TableFormat::Toml => toml::from_str(text).map_err(|source| TableError::Toml {
            path: origin.to_path_buf(),
            source,
        })?,
        TableFormat::Json => serde_json::from_str(text).map_err(|source| TableError::Json {
            path: origin.to_path_buf(),
            source,
        })?,
        TableFormat::Yaml => serde_yaml::from_str(text).map_err(|source| TableError::Yaml {
            path: origin.to_path_buf(),
            source,
        })?,
        TableFormat::Lines => return parse_lines(text, origin),
    };
    Ok(document.fixture.into_iter().map(Expectation::from).collect())
}

fn parse_lines(text: &str, origin: &Path) -> Result<Vec<Expectation>, TableError> {
    let mut expectations = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split_once('#').map_or(raw, |(head, _)| head).trim();
        let Some((identifier, pairs)) = split_identifier(line) else {
            continue;
        };
        let expected: Fingerprint = pairs.parse().map_err(|source| TableError::Line {
            path: origin.to_path_buf(),
            line: index + 1,
            source,
        })?;
        expectations.push(Expectation::new(identifier, expected));
    }
    Ok(expectations)
}

fn split_identifier(line: &str) -> Option<(&str, &str)> {
    if line.is_empty() {
        return None;
    }
    Some(line.split_once(char::is_whitespace).unwrap_or((line, "")))
}

/// Format one expectation in the line format
#[must_use]
pub fn format_line(identifier: &str, fingerprint: &Fingerprint) -> String {
    if fingerprint.is_empty() {
        identifier.to_string()
    } else {
        format!("{identifier} {fingerprint}")
    }
}
