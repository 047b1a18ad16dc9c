//! Verification reports
//!
//! The text form is one `identifier PASS|FAIL` line per fixture, in fixture
//! order, with failing fixtures followed by indented diff lines. Nothing in
//! either rendering depends on time or iteration order of hashed
//! collections, so identical inputs give byte-identical reports.

use crate::verifier::{FeatureDiff, VerificationResult};
use jfix_corpus::{ContentHash, Fixture};
use jfix_fingerprint::Fingerprint;
use serde::Serialize;
use std::fmt::Write as _;

/// Exit code when every fixture passed
pub const EXIT_PASS: u8 = 0;
/// Exit code when at least one fixture failed or was unchecked
pub const EXIT_FAIL: u8 = 1;

/// Totals for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Fixtures verified
    pub total: usize,
    /// Fixtures that matched
    pub passed: usize,
    /// Fixtures that did not match, unchecked included
    pub failed: usize,
    /// Fixtures with no expectation
    pub unchecked: usize,
}

/// One fixture's line in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Verification outcome
    pub result: VerificationResult,
    /// Hash of the fixture text
    pub hash: ContentHash,
}

/// Complete outcome of a verification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
    orphaned: Vec<String>,
}

#[derive(Serialize)]
struct ReportDocument<'a> {
    version: &'static str,
    summary: Summary,
    fixtures: Vec<EntryDocument<'a>>,
    orphaned: &'a [String],
    digest: String,
}

#[derive(Serialize)]
struct EntryDocument<'a> {
    identifier: &'a str,
    status: &'static str,
    hash: &'a ContentHash,
    fingerprint: &'a Fingerprint,
    diffs: &'a [FeatureDiff],
}

impl Report {
    /// Pair results with their fixtures
    ///
    /// `results` must be in the same order as `fixtures`, as produced by
    /// [`crate::Verifier::verify`].
    #[must_use]
    pub fn new(fixtures: &[Fixture], results: Vec<VerificationResult>, orphaned: Vec<String>) -> Self {
        debug_assert_eq!(fixtures.len(), results.len());
        let entries = fixtures
            .iter()
            .zip(results)
            .map(|(fixture, result)| ReportEntry {
                result,
                hash: *fixture.hash(),
            })
            .collect();
        Self { entries, orphaned }
    }

    /// Entries in fixture order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Results in fixture order
    pub fn results(&self) -> impl Iterator<Item = &VerificationResult> {
        self.entries.iter().map(|e| &e.result)
    }

    /// Expectations that matched no fixture
    #[inline]
    #[must_use]
    pub fn orphaned(&self) -> &[String] {
        &self.orphaned
    }

    /// Compute totals
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.results().fold(
            Summary {
                total: self.entries.len(),
                ..Summary::default()
            },
            |mut s, r| {
                if r.passed() {
                    s.passed += 1;
                } else {
                    s.failed += 1;
                    if r.is_unchecked() {
                        s.unchecked += 1;
                    }
                }
                s
            },
        )
    }

    /// Whether every fixture passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.results().all(VerificationResult::passed)
    }

    /// Process exit code for this report
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        if self.passed() {
            EXIT_PASS
        } else {
            EXIT_FAIL
        }
    }

    /// Plain-text report
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for result in self.results() {
            // writing to a String cannot fail
            let _ = writeln!(out, "{} {}", result.identifier(), result.status());
            for diff in result.diffs() {
                let _ = writeln!(out, "  {diff}");
            }
        }
        out
    }

    /// Blake3 digest of the text report, hex encoded
    #[must_use]
    pub fn digest(&self) -> String {
        ContentHash::compute(self.render_text().as_bytes()).to_string()
    }

    /// JSON report (pretty printed)
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        let document = ReportDocument {
            version: crate::VERSION,
            summary: self.summary(),
            fixtures: self
                .entries
                .iter()
                .map(|e| EntryDocument {
                    identifier: e.result.identifier(),
                    status: e.result.status(),
                    hash: &e.hash,
                    fingerprint: e.result.actual(),
                    diffs: e.result.diffs(),
                })
                .collect(),
            orphaned: &self.orphaned,
            digest: self.digest(),
        };
        serde_json::to_string_pretty(&document)
    }
}
