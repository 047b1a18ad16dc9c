//! Fixture loading
//!
//! [`FixtureStore`] turns paths into [`Fixture`]s. Both entry points are
//! atomic: every file is read before anything is returned, and a single
//! failure discards the whole batch.

use crate::error::{CorpusError, CorpusResult};
use crate::fixture::Fixture;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Extensions accepted when scanning directories
pub const DEFAULT_EXTENSIONS: &[&str] = &["java"];

/// Loads fixtures from disk
#[derive(Debug, Clone)]
pub struct FixtureStore {
    extensions: Vec<String>,
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}

/// A file queued for reading
struct Pending {
    identifier: String,
    path: PathBuf,
}

impl FixtureStore {
    /// Create store accepting `.java` files
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS.iter().copied())
    }

    /// Create store accepting the given extensions (without dot)
    #[must_use]
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Accepted extensions
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Check if a path carries an accepted extension
    #[must_use]
    pub fn supports(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()).is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            self.extensions.iter().any(|e| *e == ext)
        })
    }

    /// Load explicitly named files, in the given order
    ///
    /// Identifiers are file names. Repeated paths are loaded once, at the
    /// position of their first occurrence. Explicit files are not filtered by
    /// extension.
    ///
    /// # Errors
    /// Returns the first [`CorpusError::Io`] if any file is unreadable; no
    /// fixtures are returned in that case.
    pub fn load<I, P>(&self, paths: I) -> CorpusResult<Vec<Fixture>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let unique: IndexSet<PathBuf> = paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
        let pending = unique
            .into_iter()
            .map(|path| Pending {
                identifier: file_identifier(&path),
                path,
            })
            .collect();
        read_all(pending)
    }

    /// Scan a directory (recursively) or a single file
    ///
    /// Directory entries are filtered by extension and ordered by their
    /// `/`-separated path relative to `root`, which is also their identifier.
    ///
    /// # Errors
    /// - [`CorpusError::NotFound`] if `root` is neither file nor directory
    /// - [`CorpusError::Unsupported`] if `root` is a file with another extension
    /// - [`CorpusError::Io`] if any directory or file cannot be read
    pub fn scan(&self, root: impl AsRef<Path>) -> CorpusResult<Vec<Fixture>> {
        let pending = self.plan(root.as_ref())?;
        read_all(pending)
    }

    /// Scan several roots, concatenating results in root order
    ///
    /// Reading starts only after every root has been enumerated, so a bad
    /// root fails the run before any file is read.
    ///
    /// # Errors
    /// Same as [`FixtureStore::scan`].
    pub fn scan_all<I, P>(&self, roots: I) -> CorpusResult<Vec<Fixture>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut pending = Vec::new();
        let mut seen = IndexSet::new();
        for root in roots {
            for item in self.plan(root.as_ref())? {
                if seen.insert(item.path.clone()) {
                    pending.push(item);
                }
            }
        }
        read_all(pending)
    }

    fn plan(&self, root: &Path) -> CorpusResult<Vec<Pending>> {
        tracing::info!("Scanning: root={}", root.display());

        if root.is_file() {
            if !self.supports(root) {
                return Err(CorpusError::Unsupported {
                    path: root.to_path_buf(),
                    expected: self.extensions.join(", "),
                });
            }
            return Ok(vec![Pending {
                identifier: file_identifier(root),
                path: root.to_path_buf(),
            }]);
        }

        if !root.is_dir() {
            return Err(CorpusError::NotFound(root.to_path_buf()));
        }

        let mut files = Vec::new();
        self.walk(root, &mut files)?;

        let mut pending: Vec<Pending> = files
            .into_iter()
            .map(|path| Pending {
                identifier: relative_identifier(root, &path),
                path,
            })
            .collect();
        pending.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(pending)
    }

    fn walk(&self, dir: &Path, out: &mut Vec<PathBuf>) -> CorpusResult<()> {
        let entries = fs::read_dir(dir).map_err(|e| CorpusError::io_error(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| CorpusError::io_error(dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| CorpusError::io_error(&path, e))?;

            if file_type.is_dir() {
                self.walk(&path, out)?;
            } else if path.is_file() && self.supports(&path) {
                out.push(path);
            }
        }
        Ok(())
    }
}

fn read_all(pending: Vec<Pending>) -> CorpusResult<Vec<Fixture>> {
    let mut fixtures = Vec::with_capacity(pending.len());
    let mut failures = Vec::new();

    for item in pending {
        match fs::read_to_string(&item.path) {
            Ok(text) => {
                tracing::debug!("Loaded fixture: {} ({} bytes)", item.identifier, text.len());
                fixtures.push(Fixture::new(item.identifier, item.path, text));
            }
            Err(e) => {
                tracing::warn!("Unreadable fixture: {}: {}", item.path.display(), e);
                failures.push(CorpusError::io_error(item.path, e));
            }
        }
    }

    if let Some(first) = failures.into_iter().next() {
        return Err(first);
    }

    report_duplicates(&fixtures);
    tracing::info!("Loaded {} fixtures", fixtures.len());
    Ok(fixtures)
}

fn report_duplicates(fixtures: &[Fixture]) {
    let mut by_identifier: HashMap<&str, &Path> = HashMap::new();
    let mut by_hash = HashMap::new();

    for fixture in fixtures {
        if let Some(first) = by_identifier.insert(fixture.identifier(), fixture.path()) {
            tracing::warn!(
                "Duplicate fixture identifier: {} ({} and {})",
                fixture.identifier(),
                first.display(),
                fixture.path().display()
            );
        }
        if let Some(first) = by_hash.insert(*fixture.hash(), fixture.identifier()) {
            tracing::warn!("Duplicate fixture content: {} matches {}", fixture.identifier(), first);
        }
    }
}

fn file_identifier(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy().into_owned(), |n| n.to_string_lossy().into_owned())
}

fn relative_identifier(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
