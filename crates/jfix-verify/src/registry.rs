//! Expectation registry
//!
//! Provides [`ExpectationRegistry`], an explicitly constructed map from
//! fixture identifier to expected fingerprint. It is passed to the verifier
//! by reference; there is no process-wide instance.

use crate::error::{RegistryConflict, TableError};
use crate::table;
use indexmap::IndexMap;
use jfix_corpus::Fixture;
use jfix_fingerprint::Fingerprint;
use std::collections::HashSet;
use std::path::Path;

/// The fingerprint a fixture is expected to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    identifier: String,
    expected: Fingerprint,
}

impl Expectation {
    /// Create expectation
    #[inline]
    #[must_use]
    pub fn new(identifier: impl Into<String>, expected: Fingerprint) -> Self {
        Self {
            identifier: identifier.into(),
            expected,
        }
    }

    /// Fixture identifier
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Expected fingerprint
    #[inline]
    #[must_use]
    pub fn expected(&self) -> &Fingerprint {
        &self.expected
    }
}

/// Identifier → expectation, last write wins
#[derive(Debug, Clone, Default)]
pub struct ExpectationRegistry {
    entries: IndexMap<String, Expectation>,
    conflicts: Vec<RegistryConflict>,
}

impl ExpectationRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and merge expectation tables, in order
    ///
    /// Identifiers repeated across (or within) tables are resolved by
    /// [`ExpectationRegistry::register`].
    ///
    /// # Errors
    /// Returns the first [`TableError`]; nothing is registered in that case.
    pub fn from_files<I, P>(paths: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let tables = paths
            .into_iter()
            .map(|p| table::load_table(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut registry = Self::new();
        for expectation in tables.into_iter().flatten() {
            registry.insert(expectation);
        }
        tracing::info!("Registered {} expectations", registry.len());
        Ok(registry)
    }

    /// Register an expectation
    ///
    /// If `identifier` is already registered the new fingerprint replaces the
    /// old one, a warning is logged, and the conflict is recorded. Returns the
    /// replaced expectation.
    pub fn register(&mut self, identifier: impl Into<String>, expected: Fingerprint) -> Option<Expectation> {
        self.insert(Expectation::new(identifier, expected))
    }

    /// Register a prepared expectation; see [`ExpectationRegistry::register`]
    pub fn insert(&mut self, expectation: Expectation) -> Option<Expectation> {
        let previous = self.entries.insert(expectation.identifier.clone(), expectation.clone())?;
        let conflict = RegistryConflict {
            identifier: expectation.identifier,
            previous: previous.expected.clone(),
            replacement: expectation.expected,
        };
        tracing::warn!("{}", conflict);
        self.conflicts.push(conflict);
        Some(previous)
    }

    /// Find expectation for a fixture identifier
    #[inline]
    #[must_use]
    pub fn lookup(&self, identifier: &str) -> Option<&Expectation> {
        self.entries.get(identifier)
    }

    /// Check if identifier is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Overwrites seen so far, in the order they happened
    #[inline]
    #[must_use]
    pub fn conflicts(&self) -> &[RegistryConflict] {
        &self.conflicts
    }

    /// Identifiers that match none of `fixtures`, in registration order
    #[must_use]
    pub fn orphans(&self, fixtures: &[Fixture]) -> Vec<&str> {
        let known: HashSet<&str> = fixtures.iter().map(Fixture::identifier).collect();
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|id| !known.contains(id))
            .collect()
    }

    /// Iterate over expectations in first-registration order
    pub fn iter(&self) -> impl Iterator<Item = &Expectation> {
        self.entries.values()
    }

    /// Get number of registered identifiers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Expectation> for ExpectationRegistry {
    fn from_iter<I: IntoIterator<Item = Expectation>>(iter: I) -> Self {
        let mut registry = Self::new();
        for expectation in iter {
            registry.insert(expectation);
        }
        registry
    }
}
