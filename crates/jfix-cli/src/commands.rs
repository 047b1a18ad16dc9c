//! Subcommand implementations
//!
//! Each command writes its output to `out` and returns an exit code.

use crate::config::{Config, OutputFormat};
use anyhow::{bail, Context};
use jfix_corpus::{ContentHash, Fixture, FixtureStore};
use jfix_fingerprint::{Extractor, Fingerprint};
use jfix_verify::{format_line, ExpectationRegistry, Verifier, EXIT_PASS};
use serde::Serialize;
use std::io::Write;

fn load_corpus(config: &Config) -> anyhow::Result<Vec<Fixture>> {
    if config.corpus.is_empty() {
        bail!("no corpus given: pass fixture paths or set `corpus` in the config");
    }
    let store = FixtureStore::with_extensions(&config.extensions);
    let fixtures = store.scan_all(&config.corpus).context("failed to load corpus")?;
    tracing::info!("Loaded {} fixtures from {} roots", fixtures.len(), config.corpus.len());
    Ok(fixtures)
}

fn extractor(config: &Config) -> anyhow::Result<Extractor> {
    let probes = config.probes.resolve()?;
    tracing::debug!("Probes: {}", probes.names().join(", "));
    Ok(Extractor::with_probes(probes))
}

/// `jfix verify`: fingerprint the corpus and compare against expectations
///
/// # Errors
/// Fatal for an unreadable fixture or table, a malformed table, or an
/// invalid probe selection.
pub fn verify(config: &Config, out: &mut dyn Write) -> anyhow::Result<u8> {
    let extractor = extractor(config)?;
    let fixtures = load_corpus(config)?;

    if config.expectations.is_empty() {
        tracing::warn!("No expectation tables given; every fixture will be unchecked");
    }
    let registry =
        ExpectationRegistry::from_files(&config.expectations).context("failed to load expectations")?;

    let report = Verifier::new()
        .with_extractor(extractor)
        .with_parallel(config.parallel)
        .run(&fixtures, &registry);

    match config.format {
        OutputFormat::Text => out.write_all(report.render_text().as_bytes())?,
        OutputFormat::Json => writeln!(out, "{}", report.render_json()?)?,
    }
    out.flush()?;
    Ok(report.exit_code())
}

#[derive(Serialize)]
struct FingerprintDocument<'a> {
    identifier: &'a str,
    hash: &'a ContentHash,
    fingerprint: &'a Fingerprint,
}

/// `jfix fingerprint`: print fingerprints as expectation-table lines
///
/// The text output can be saved and used directly as a line-format table.
///
/// # Errors
/// Fatal for an unreadable fixture or an invalid probe selection.
pub fn fingerprint(config: &Config, out: &mut dyn Write) -> anyhow::Result<u8> {
    let extractor = extractor(config)?;
    let fixtures = load_corpus(config)?;
    let fingerprints = extractor.extract_all(&fixtures, config.parallel);

    match config.format {
        OutputFormat::Text => {
            for (fixture, fp) in fixtures.iter().zip(&fingerprints) {
                writeln!(out, "{}", format_line(fixture.identifier(), fp))?;
            }
        }
        OutputFormat::Json => {
            let documents: Vec<FingerprintDocument<'_>> = fixtures
                .iter()
                .zip(&fingerprints)
                .map(|(fixture, fp)| FingerprintDocument {
                    identifier: fixture.identifier(),
                    hash: fixture.hash(),
                    fingerprint: fp,
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&documents)?)?;
        }
    }
    out.flush()?;
    Ok(EXIT_PASS)
}

/// `jfix probes`: list the probe catalog, marking the selected probes
///
/// # Errors
/// Fatal for an invalid probe selection or a failed write.
pub fn probes(config: &Config, out: &mut dyn Write) -> anyhow::Result<u8> {
    let selected = config.probes.resolve()?;
    let catalog = jfix_fingerprint::ProbeSet::catalog();
    let width = catalog.iter().map(|p| p.name().len()).max().unwrap_or(0);

    for probe in catalog {
        let mark = if selected.contains(probe.name()) { '*' } else { ' ' };
        writeln!(
            out,
            "{mark} {:<width$}  {:<8}  {}",
            probe.name(),
            probe.tier().name(),
            probe.description()
        )?;
    }
    out.flush()?;
    Ok(EXIT_PASS)
}
