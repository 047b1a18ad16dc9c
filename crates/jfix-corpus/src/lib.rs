//! jfix Fixture Store
//!
//! Loads sample source files into immutable, content-addressed [`Fixture`]s.
//!
//! # Core Concepts
//!
//! - [`Fixture`]: identifier plus raw text of one sample file
//! - [`FixtureStore`]: atomic loading of explicit paths and directory scans
//! - [`ContentHash`]: 32-byte Blake3 hash of a fixture's text
//!
//! Loading is all-or-nothing: if any path cannot be read, no fixtures are
//! returned and the first failure is reported.
//!
//! # Example
//!
//! ```rust,no_run
//! use jfix_corpus::FixtureStore;
//!
//! let store = FixtureStore::new();
//! let fixtures = store.scan("tests/data")?;
//! for fixture in &fixtures {
//!     println!("{} {}", fixture.identifier(), fixture.hash().short());
//! }
//! # Ok::<(), jfix_corpus::CorpusError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod fixture;
mod hash;
mod store;

pub use error::{CorpusError, CorpusResult};
pub use fixture::Fixture;
pub use hash::ContentHash;
pub use store::{FixtureStore, DEFAULT_EXTENSIONS};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
