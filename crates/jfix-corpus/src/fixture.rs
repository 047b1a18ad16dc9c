//! The immutable fixture record

use crate::hash::ContentHash;
use std::path::{Path, PathBuf};

/// One sample source file held in memory
///
/// Content is opaque text: it is never compiled or executed. The hash is
/// computed once at construction and always matches the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    identifier: String,
    path: PathBuf,
    text: String,
    hash: ContentHash,
}

impl Fixture {
    /// Create fixture read from `path`
    #[must_use]
    pub fn new(identifier: impl Into<String>, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let hash = ContentHash::compute(text.as_bytes());
        Self {
            identifier: identifier.into(),
            path: path.into(),
            text,
            hash,
        }
    }

    /// Create in-memory fixture; the identifier doubles as its path
    #[must_use]
    pub fn from_text(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let path = PathBuf::from(&identifier);
        Self::new(identifier, path, text)
    }

    /// Path-derived identifier used to look up expectations
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Source path on disk
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Blake3 hash of the raw text
    #[inline]
    #[must_use]
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// Size of the raw text in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the fixture has no text
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_tracks_text() {
        let a = Fixture::from_text("A.java", "class A {}");
        let b = Fixture::from_text("B.java", "class A {}");
        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.identifier(), b.identifier());
    }

    #[test]
    fn from_text_uses_identifier_as_path() {
        let f = Fixture::from_text("pkg/A.java", "");
        assert_eq!(f.path(), Path::new("pkg/A.java"));
        assert!(f.is_empty());
    }
}
