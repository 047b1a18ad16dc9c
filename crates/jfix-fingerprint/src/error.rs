//! Error types for fingerprint extraction

/// Errors raised while configuring probes or parsing fingerprints
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FingerprintError {
    /// No built-in probe with this name
    #[error("unknown probe: '{0}'")]
    UnknownProbe(String),

    /// Probe selection named no probes
    #[error("probe selection is empty")]
    EmptySelection,

    /// A `name:count` pair could not be parsed
    #[error("invalid feature pair '{pair}': {reason}")]
    InvalidPair {
        /// Offending text
        pair: String,
        /// What was wrong with it
        reason: String,
    },

    /// The same feature appears twice in one fingerprint
    #[error("duplicate feature: '{0}'")]
    DuplicateFeature(String),
}

impl FingerprintError {
    /// Create invalid pair error
    pub fn invalid_pair(pair: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPair {
            pair: pair.into(),
            reason: reason.into(),
        }
    }
}
