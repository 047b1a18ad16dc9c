//! Testing utilities for jfix workspace
//!
//! Shared sample sources, fixtures, and on-disk corpora.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use jfix_corpus::Fixture;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const JAVA8_SAMPLE_ID: &str = "Java8Sample.java";
pub const SIMPLE_POJO_ID: &str = "SimplePOJO.java";

/// Lambda and stream pipeline demo
pub const JAVA8_SAMPLE: &str = include_str!("../data/Java8Sample.java");

/// Plain-old-data class with a two-dimensional `Double` grid
pub const SIMPLE_POJO: &str = include_str!("../data/SimplePOJO.java");

pub fn java8_sample() -> Fixture {
    Fixture::from_text(JAVA8_SAMPLE_ID, JAVA8_SAMPLE)
}

pub fn simple_pojo() -> Fixture {
    Fixture::from_text(SIMPLE_POJO_ID, SIMPLE_POJO)
}

pub fn sample_fixtures() -> Vec<Fixture> {
    vec![java8_sample(), simple_pojo()]
}

/// A temporary directory holding the sample sources
pub struct SampleCorpus {
    dir: TempDir,
}

impl SampleCorpus {
    /// Write both samples at the top level
    pub fn new() -> Self {
        let corpus = Self::empty();
        corpus.write(JAVA8_SAMPLE_ID, JAVA8_SAMPLE);
        corpus.write(SIMPLE_POJO_ID, SIMPLE_POJO);
        corpus
    }

    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Write `text` at `rel`, creating parent directories
    pub fn write(&self, rel: &str, text: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, text).unwrap();
        path
    }
}

impl Default for SampleCorpus {
    fn default() -> Self {
        Self::new()
    }
}
