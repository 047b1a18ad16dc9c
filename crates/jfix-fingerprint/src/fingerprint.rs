//! The fingerprint value type

use crate::error::FingerprintError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Named feature counts for one fixture
///
/// Keys are unique and iterate in sorted order. Zero counts are never
/// stored: a missing feature and a feature counted zero times are the same
/// fingerprint.
///
/// Every textual form (line pairs, JSON, TOML, YAML maps) rejects a feature
/// named twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "BTreeMap<String, u64>")]
pub struct Fingerprint {
    features: BTreeMap<String, u64>,
}

impl Fingerprint {
    /// Create empty fingerprint
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add or overwrite a feature count
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, count: u64) -> Self {
        let name = name.into();
        if count == 0 {
            self.features.remove(&name);
        } else {
            self.features.insert(name, count);
        }
        self
    }

    /// Count for `name` (zero when absent)
    #[inline]
    #[must_use]
    pub fn count(&self, name: &str) -> u64 {
        self.features.get(name).copied().unwrap_or(0)
    }

    /// Count for `name`, `None` when absent
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<u64> {
        self.features.get(name).copied()
    }

    /// Check if feature is present
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Feature names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Iterate `(name, count)` in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.features.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Get number of present features
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if no feature is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for Fingerprint {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |fp, (k, v)| fp.with(k, v))
    }
}

impl From<BTreeMap<String, u64>> for Fingerprint {
    fn from(map: BTreeMap<String, u64>) -> Self {
        map.into_iter().collect()
    }
}

impl From<Fingerprint> for BTreeMap<String, u64> {
    fn from(fp: Fingerprint) -> Self {
        fp.features
    }
}

/// Space-separated `name:count` pairs in sorted order
impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}:{count}")?;
        }
        Ok(())
    }
}

/// Parses whitespace-separated `name:count` pairs
impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut features = BTreeMap::new();
        for pair in s.split_whitespace() {
            let (name, count) = pair
                .split_once(':')
                .ok_or_else(|| FingerprintError::invalid_pair(pair, "expected name:count"))?;
            if name.is_empty() {
                return Err(FingerprintError::invalid_pair(pair, "feature name is empty"));
            }
            let count: u64 = count
                .parse()
                .map_err(|_| FingerprintError::invalid_pair(pair, "count is not a non-negative integer"))?;
            insert_unique(&mut features, name.to_string(), count)?;
        }
        Ok(features.into())
    }
}

fn insert_unique(features: &mut BTreeMap<String, u64>, name: String, count: u64) -> Result<(), FingerprintError> {
    if features.contains_key(&name) {
        return Err(FingerprintError::DuplicateFeature(name));
    }
    features.insert(name, count);
    Ok(())
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FingerprintVisitor;

        impl<'de> serde::de::Visitor<'de> for FingerprintVisitor {
            type Value = Fingerprint;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of feature names to counts")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut features = BTreeMap::new();
                while let Some((name, count)) = map.next_entry::<String, u64>()? {
                    insert_unique(&mut features, name, count).map_err(serde::de::Error::custom)?;
                }
                Ok(features.into())
            }
        }

        deserializer.deserialize_map(FingerprintVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_are_absent() {
        let fp = Fingerprint::new().with("a", 0).with("b", 2);
        assert_eq!(fp.len(), 1);
        assert!(!fp.contains("a"));
        assert_eq!(fp.count("a"), 0);
        assert_eq!(fp.get("b"), Some(2));
        assert_eq!(fp, Fingerprint::new().with("b", 2));
    }

    #[test]
    fn with_zero_removes() {
        let fp = Fingerprint::new().with("a", 3).with("a", 0);
        assert!(fp.is_empty());
    }

    #[test]
    fn display_sorted() {
        let fp: Fingerprint = [("zeta", 1), ("alpha", 2)].into_iter().collect();
        assert_eq!(fp.to_string(), "alpha:2 zeta:1");
    }

    #[test]
    fn parse_pairs() {
        let fp: Fingerprint = "lambda_arrow:1  method_reference:2".parse().unwrap();
        assert_eq!(fp.count("lambda_arrow"), 1);
        assert_eq!(fp.count("method_reference"), 2);
        assert_eq!(fp.to_string().parse::<Fingerprint>().unwrap(), fp);
    }

    #[test]
    fn parse_rejects_bad_pairs() {
        assert!(matches!(
            "lambda_arrow".parse::<Fingerprint>(),
            Err(FingerprintError::InvalidPair { .. })
        ));
        assert!(matches!(":1".parse::<Fingerprint>(), Err(FingerprintError::InvalidPair { .. })));
        assert!(matches!("a:-1".parse::<Fingerprint>(), Err(FingerprintError::InvalidPair { .. })));
        assert!(matches!(
            "a:1 a:2".parse::<Fingerprint>(),
            Err(FingerprintError::DuplicateFeature(_))
        ));
    }

    #[test]
    fn parse_empty() {
        assert!("".parse::<Fingerprint>().unwrap().is_empty());
    }

    #[test]
    fn serde_map_form() {
        let fp = Fingerprint::new().with("b", 2).with("a", 1);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);

        let decoded: Fingerprint = serde_json::from_str(r#"{"a":1,"z":0}"#).unwrap();
        assert_eq!(decoded, Fingerprint::new().with("a", 1));
    }

    #[test]
    fn serde_rejects_duplicate_feature() {
        let err = serde_json::from_str::<Fingerprint>(r#"{"a":1,"a":2}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate feature: 'a'"), "{err}");
    }
}
