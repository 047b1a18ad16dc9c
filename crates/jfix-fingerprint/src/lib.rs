//! jfix Fingerprint Extractor
//!
//! Derives a structural [`Fingerprint`] (named feature counts) from Java
//! sample text using simple textual heuristics.
//!
//! # Overview
//!
//! - **MaskedSource**: text with comments and literal bodies blanked out
//! - **FeatureProbe**: named pure function `MaskedSource -> u64`
//! - **ProbeSet**: ordered probes; `core()` by default, `extended()` on request
//! - **Extractor**: runs a probe set, optionally in parallel
//!
//! # Example
//!
//! ```rust
//! use jfix_fingerprint::{Extractor, ProbeSet};
//!
//! let extractor = Extractor::with_probes(ProbeSet::core());
//! let fp = extractor.extract("list.forEach(System.out::println);");
//! assert_eq!(fp.count("method_reference"), 1);
//! assert_eq!(fp.count("lambda_arrow"), 0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod extractor;
mod fingerprint;
mod mask;
mod probe;
pub mod probes;

pub use error::FingerprintError;
pub use extractor::{extract, Extractor};
pub use fingerprint::Fingerprint;
pub use mask::MaskedSource;
pub use probe::{FeatureProbe, ProbeFn, ProbeSet, ProbeTier};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for fingerprinting
    pub use crate::{extract, Extractor, FeatureProbe, Fingerprint, MaskedSource, ProbeSet};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
