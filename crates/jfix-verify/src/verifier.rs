//! Fixture verification
//!
//! [`Verifier`] fingerprints each fixture and compares it against the
//! registered expectation. Every fixture yields exactly one
//! [`VerificationResult`], in input order; fixtures without an expectation
//! fail as *unchecked* rather than being skipped.

use crate::registry::ExpectationRegistry;
use crate::report::Report;
use jfix_corpus::Fixture;
use jfix_fingerprint::{Extractor, Fingerprint};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Feature name used by the unchecked marker diff
pub const UNCHECKED_FEATURE: &str = "<none>";

/// One side of a feature comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffValue {
    /// Feature counted this many times
    Count(u64),
    /// Feature not present
    Absent,
    /// Marker: an expectation should have been registered
    Registered,
    /// Marker: the fixture was not checked
    Unchecked,
}

impl DiffValue {
    fn of(fingerprint: &Fingerprint, name: &str) -> Self {
        fingerprint.get(name).map_or(Self::Absent, Self::Count)
    }
}

impl fmt::Display for DiffValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Absent => f.write_str("absent"),
            Self::Registered => f.write_str("<registered>"),
            Self::Unchecked => f.write_str("<unchecked>"),
        }
    }
}

// Counts stay numbers in JSON; markers become strings
impl Serialize for DiffValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Count(n) => serializer.serialize_u64(*n),
            other => serializer.collect_str(other),
        }
    }
}

/// A single feature mismatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDiff {
    /// Feature name
    pub feature: String,
    /// Expected side
    pub expected: DiffValue,
    /// Actual side
    pub actual: DiffValue,
}

impl FeatureDiff {
    /// The marker diff carried by unchecked fixtures
    #[must_use]
    pub fn unchecked() -> Self {
        Self {
            feature: UNCHECKED_FEATURE.to_string(),
            expected: DiffValue::Registered,
            actual: DiffValue::Unchecked,
        }
    }

    /// Check if this is the unchecked marker
    #[inline]
    #[must_use]
    pub fn is_unchecked(&self) -> bool {
        self.actual == DiffValue::Unchecked
    }
}

impl fmt::Display for FeatureDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, actual {}", self.feature, self.expected, self.actual)
    }
}

/// Outcome for one fixture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    identifier: String,
    passed: bool,
    diffs: Vec<FeatureDiff>,
    actual: Fingerprint,
}

impl VerificationResult {
    fn checked(identifier: &str, expected: &Fingerprint, actual: Fingerprint) -> Self {
        let diffs = compare(expected, &actual);
        Self {
            identifier: identifier.to_string(),
            passed: diffs.is_empty(),
            diffs,
            actual,
        }
    }

    fn unchecked(identifier: &str, actual: Fingerprint) -> Self {
        Self {
            identifier: identifier.to_string(),
            passed: false,
            diffs: vec![FeatureDiff::unchecked()],
            actual,
        }
    }

    /// Fixture identifier
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Whether the fixture matched its expectation
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Mismatches, sorted by feature name
    #[inline]
    #[must_use]
    pub fn diffs(&self) -> &[FeatureDiff] {
        &self.diffs
    }

    /// Fingerprint extracted from the fixture
    #[inline]
    #[must_use]
    pub fn actual(&self) -> &Fingerprint {
        &self.actual
    }

    /// Whether the fixture had no expectation
    #[must_use]
    pub fn is_unchecked(&self) -> bool {
        self.diffs.iter().any(FeatureDiff::is_unchecked)
    }

    /// `PASS` or `FAIL`
    #[inline]
    #[must_use]
    pub fn status(&self) -> &'static str {
        if self.passed {
            "PASS"
        } else {
            "FAIL"
        }
    }
}

/// Compare fingerprints feature by feature
///
/// Walks the sorted union of both key sets; a feature present on one side
/// only shows up as `absent` on the other.
#[must_use]
pub fn compare(expected: &Fingerprint, actual: &Fingerprint) -> Vec<FeatureDiff> {
    let names: BTreeSet<&str> = expected.names().chain(actual.names()).collect();
    names
        .into_iter()
        .filter(|name| expected.get(name) != actual.get(name))
        .map(|name| FeatureDiff {
            feature: name.to_string(),
            expected: DiffValue::of(expected, name),
            actual: DiffValue::of(actual, name),
        })
        .collect()
}

/// Compares fixtures against an [`ExpectationRegistry`]
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    extractor: Extractor,
    parallel: bool,
}

impl Verifier {
    /// Create sequential verifier with the core probe set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a specific extractor
    #[inline]
    #[must_use]
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// With parallel fingerprint extraction
    #[inline]
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Extractor in use
    #[inline]
    #[must_use]
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Verify every fixture, in input order
    #[must_use]
    pub fn verify(&self, fixtures: &[Fixture], registry: &ExpectationRegistry) -> Vec<VerificationResult> {
        let fingerprints = self.extractor.extract_all(fixtures, self.parallel);

        fixtures
            .iter()
            .zip(fingerprints)
            .map(|(fixture, actual)| match registry.lookup(fixture.identifier()) {
                Some(expectation) => {
                    let result = VerificationResult::checked(fixture.identifier(), expectation.expected(), actual);
                    tracing::debug!("Verified: {} {}", result.identifier(), result.status());
                    result
                }
                None => {
                    tracing::warn!("Unchecked fixture: {}", fixture.identifier());
                    VerificationResult::unchecked(fixture.identifier(), actual)
                }
            })
            .collect()
    }

    /// Verify and assemble a [`Report`]
    #[must_use]
    pub fn run(&self, fixtures: &[Fixture], registry: &ExpectationRegistry) -> Report {
        let results = self.verify(fixtures, registry);

        let orphaned: Vec<String> = registry.orphans(fixtures).into_iter().map(str::to_string).collect();
        for id in &orphaned {
            tracing::warn!("Orphaned expectation: {}", id);
        }

        let report = Report::new(fixtures, results, orphaned);
        let summary = report.summary();
        tracing::info!(
            "Verified {} fixtures: {} passed, {} failed ({} unchecked)",
            summary.total,
            summary.passed,
            summary.failed,
            summary.unchecked
        );
        report
    }
}

/// Verify with the core probe set, sequentially
#[must_use]
pub fn verify(fixtures: &[Fixture], registry: &ExpectationRegistry) -> Vec<VerificationResult> {
    Verifier::new().verify(fixtures, registry)
}
