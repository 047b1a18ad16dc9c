//! Content hashing for fixture text
//!
//! Provides [`ContentHash`], a 32-byte Blake3 digest used to spot duplicate
//! fixtures and to pin report contents.

use std::fmt::{self, Display, Formatter};

/// A 32-byte content hash (Blake3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Compute Blake3 hash of arbitrary data
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

// Reports carry hashes as hex strings
impl serde::Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_deterministic() {
        let h1 = ContentHash::compute(b"class A {}");
        let h2 = ContentHash::compute(b"class A {}");
        assert_eq!(h1, h2);
        assert_ne!(h1, ContentHash::compute(b"class B {}"));
    }

    #[test]
    fn display_is_lowercase_hex() {
        let hash = ContentHash::compute(b"test");
        let text = hash.to_string();
        assert_eq!(text.len(), 64);
        assert!(text.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_eq!(text, blake3::hash(b"test").to_hex().as_str());
    }

    #[test]
    fn short_is_prefix() {
        let hash = ContentHash::compute(b"test");
        let short = hash.short();
        assert_eq!(short.len(), 16);
        assert!(hash.to_string().starts_with(&short));
    }

    #[test]
    fn serde_uses_hex_string() {
        let hash = ContentHash::compute(b"test");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{hash}\""));
    }
}
