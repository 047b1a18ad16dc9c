//! Fingerprint extraction
//!
//! [`Extractor`] runs a [`ProbeSet`] over masked fixture text. Extraction is
//! pure, so fixtures may be fingerprinted in parallel; results always come
//! back in input order.

use crate::fingerprint::Fingerprint;
use crate::mask::MaskedSource;
use crate::probe::ProbeSet;
use jfix_corpus::Fixture;
use rayon::prelude::*;

/// Applies a probe set to source text
#[derive(Debug, Clone)]
pub struct Extractor {
    probes: ProbeSet,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    /// Create extractor with the core probe set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_probes(ProbeSet::core())
    }

    /// Create extractor with a specific probe set
    #[inline]
    #[must_use]
    pub fn with_probes(probes: ProbeSet) -> Self {
        Self { probes }
    }

    /// Probe set in use
    #[inline]
    #[must_use]
    pub fn probes(&self) -> &ProbeSet {
        &self.probes
    }

    /// Fingerprint `text`
    #[must_use]
    pub fn extract(&self, text: &str) -> Fingerprint {
        let masked = MaskedSource::new(text);
        self.probes
            .iter()
            .map(|probe| (probe.name(), probe.count(&masked)))
            .collect()
    }

    /// Fingerprint every fixture, in input order
    #[must_use]
    pub fn extract_all(&self, fixtures: &[Fixture], parallel: bool) -> Vec<Fingerprint> {
        let fingerprints: Vec<Fingerprint> = if parallel {
            // indexed collect keeps input order
            fixtures.par_iter().map(|f| self.extract(f.text())).collect()
        } else {
            fixtures.iter().map(|f| self.extract(f.text())).collect()
        };

        for (fixture, fp) in fixtures.iter().zip(&fingerprints) {
            tracing::debug!("Fingerprint: {} {}", fixture.identifier(), fp);
        }
        fingerprints
    }
}

/// Fingerprint `text` with the core probe set
#[must_use]
pub fn extract(text: &str) -> Fingerprint {
    Extractor::new().extract(text)
}
