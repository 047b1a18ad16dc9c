//! Feature probes and the ordered probe set
//!
//! A [`FeatureProbe`] is a named pure function from masked source text to a
//! count. A [`ProbeSet`] holds probes in registration order; that order has
//! no effect on fingerprints (they are keyed by name) but keeps listings
//! stable.

use crate::error::FingerprintError;
use crate::mask::MaskedSource;
use crate::probes::BUILTIN;
use std::fmt;
use std::str::FromStr;

/// Probe function signature
pub type ProbeFn = fn(&MaskedSource) -> u64;

/// Which built-in group a probe belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeTier {
    /// Enabled by default
    Core,
    /// Opt-in declaration and pipeline probes
    Extended,
    /// Registered by a caller
    Custom,
}

impl ProbeTier {
    /// Get lowercase name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Extended => "extended",
            Self::Custom => "custom",
        }
    }
}

/// A named, independent feature counter
#[derive(Clone, Copy)]
pub struct FeatureProbe {
    name: &'static str,
    description: &'static str,
    tier: ProbeTier,
    run: ProbeFn,
}

impl FeatureProbe {
    pub(crate) const fn builtin(
        name: &'static str,
        description: &'static str,
        tier: ProbeTier,
        run: ProbeFn,
    ) -> Self {
        Self {
            name,
            description,
            tier,
            run,
        }
    }

    /// Create a custom probe
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str, run: ProbeFn) -> Self {
        Self::builtin(name, description, ProbeTier::Custom, run)
    }

    /// Feature name this probe counts
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description
    #[inline]
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Tier
    #[inline]
    #[must_use]
    pub const fn tier(&self) -> ProbeTier {
        self.tier
    }

    /// Count this feature in `source`
    #[inline]
    #[must_use]
    pub fn count(&self, source: &MaskedSource) -> u64 {
        (self.run)(source)
    }
}

impl fmt::Debug for FeatureProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureProbe")
            .field("name", &self.name)
            .field("tier", &self.tier)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of probes with unique names
#[derive(Debug, Clone, Default)]
pub struct ProbeSet {
    probes: Vec<FeatureProbe>,
}

impl ProbeSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { probes: Vec::new() }
    }

    /// Every built-in probe, core tier first
    #[inline]
    #[must_use]
    pub fn catalog() -> &'static [FeatureProbe] {
        BUILTIN
    }

    /// Default set: `lambda_arrow`, `method_reference`, `generic_array_decl`
    #[must_use]
    pub fn core() -> Self {
        Self {
            probes: BUILTIN.iter().filter(|p| p.tier == ProbeTier::Core).copied().collect(),
        }
    }

    /// Core plus every extended probe
    #[must_use]
    pub fn extended() -> Self {
        Self {
            probes: BUILTIN.to_vec(),
        }
    }

    /// Built-in probes by name, in the order given
    ///
    /// # Errors
    /// Returns [`FingerprintError::UnknownProbe`] for a name with no built-in
    /// probe, and [`FingerprintError::EmptySelection`] for an empty list.
    pub fn select<I, S>(names: I) -> Result<Self, FingerprintError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.as_ref().trim();
            let probe = BUILTIN
                .iter()
                .find(|p| p.name == name)
                .ok_or_else(|| FingerprintError::UnknownProbe(name.to_string()))?;
            set.register(*probe);
        }
        if set.is_empty() {
            return Err(FingerprintError::EmptySelection);
        }
        Ok(set)
    }

    /// Register a probe
    ///
    /// A probe with the same name is replaced in place, keeping its position.
    pub fn register(&mut self, probe: FeatureProbe) {
        if let Some(slot) = self.probes.iter_mut().find(|p| p.name == probe.name) {
            tracing::debug!("Replacing probe: {}", probe.name);
            *slot = probe;
        } else {
            self.probes.push(probe);
        }
    }

    /// Find probe by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureProbe> {
        self.probes.iter().find(|p| p.name == name)
    }

    /// Check if a probe is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, in order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.probes.iter().map(|p| p.name).collect()
    }

    /// Iterate over probes
    pub fn iter(&self) -> impl Iterator<Item = &FeatureProbe> {
        self.probes.iter()
    }

    /// Get number of probes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// Check if set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

/// Parses `core`, `extended`, or a comma-separated list of probe names
impl FromStr for ProbeSet {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "core" => Ok(Self::core()),
            "extended" | "all" => Ok(Self::extended()),
            list => Self::select(list.split(',').filter(|n| !n.trim().is_empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::{GENERIC_ARRAY_DECL, LAMBDA_ARROW, METHOD_REFERENCE, STREAM_PIPELINE};

    fn always_seven(_: &MaskedSource) -> u64 {
        7
    }

    #[test]
    fn core_set() {
        let set = ProbeSet::core();
        assert_eq!(set.names(), vec![LAMBDA_ARROW, METHOD_REFERENCE, GENERIC_ARRAY_DECL]);
    }

    #[test]
    fn extended_contains_core() {
        let set = ProbeSet::extended();
        assert_eq!(set.len(), ProbeSet::catalog().len());
        for name in ProbeSet::core().names() {
            assert!(set.contains(name));
        }
        assert!(set.contains(STREAM_PIPELINE));
    }

    #[test]
    fn select_keeps_order() {
        let set = ProbeSet::select(["stream_pipeline", "lambda_arrow"]).unwrap();
        assert_eq!(set.names(), vec![STREAM_PIPELINE, LAMBDA_ARROW]);
    }

    #[test]
    fn select_unknown() {
        let err = ProbeSet::select(["lambda_arrow", "goto_statement"]).unwrap_err();
        assert!(matches!(err, FingerprintError::UnknownProbe(ref n) if n == "goto_statement"));
    }

    #[test]
    fn parse_forms() {
        assert_eq!("core".parse::<ProbeSet>().unwrap().len(), 3);
        assert_eq!(
            "extended".parse::<ProbeSet>().unwrap().len(),
            ProbeSet::catalog().len()
        );
        let set: ProbeSet = " method_reference , import_decl ".parse().unwrap();
        assert_eq!(set.names(), vec![METHOD_REFERENCE, "import_decl"]);
        assert!(matches!("".parse::<ProbeSet>(), Err(FingerprintError::EmptySelection)));
    }

    #[test]
    fn register_replaces_in_place() {
        let mut set = ProbeSet::core();
        set.register(FeatureProbe::new(LAMBDA_ARROW, "override", always_seven));
        assert_eq!(set.len(), 3);
        assert_eq!(set.names()[0], LAMBDA_ARROW);

        let probe = set.get(LAMBDA_ARROW).unwrap();
        assert_eq!(probe.tier(), ProbeTier::Custom);
        assert_eq!(probe.count(&MaskedSource::new("")), 7);
    }

    #[test]
    fn tier_names() {
        assert_eq!(ProbeTier::Core.name(), "core");
        assert_eq!(ProbeTier::Extended.name(), "extended");
        assert_eq!(ProbeTier::Custom.name(), "custom");
    }
}
