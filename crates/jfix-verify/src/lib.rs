//! jfix Verifier
//!
//! Compares fixture fingerprints against registered expectations.
//!
//! # Architecture
//!
//! ```text
//! Fixtures ──► Extractor ──► Fingerprint ─┐
//!                                         ├─► Verifier ──► Report (text / JSON)
//! Tables ──► ExpectationRegistry ─────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use jfix_corpus::Fixture;
//! use jfix_verify::{ExpectationRegistry, Verifier};
//!
//! let fixtures = vec![Fixture::from_text("A.java", "list.forEach(System.out::println);")];
//! let mut registry = ExpectationRegistry::new();
//! registry.register("A.java", "method_reference:1".parse()?);
//!
//! let report = Verifier::new().run(&fixtures, &registry);
//! assert_eq!(report.render_text(), "A.java PASS\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod registry;
pub mod report;
pub mod table;
pub mod verifier;

pub use error::{RegistryConflict, TableError};
pub use registry::{Expectation, ExpectationRegistry};
pub use report::{Report, ReportEntry, Summary, EXIT_FAIL, EXIT_PASS};
pub use table::{format_line, load_table, parse_table, TableFormat};
pub use verifier::{compare, verify, DiffValue, FeatureDiff, VerificationResult, Verifier, UNCHECKED_FEATURE};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for verification runs
    pub use crate::{ExpectationRegistry, Report, VerificationResult, Verifier};
    pub use jfix_corpus::{Fixture, FixtureStore};
    pub use jfix_fingerprint::{Extractor, Fingerprint, ProbeSet};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
