//! jfix command-line front end
//!
//! Subcommands:
//! - `verify`: load a corpus and expectation tables, print a report
//! - `fingerprint`: print extracted fingerprints in expectation-line format
//! - `probes`: list available feature probes
//!
//! [`run`] writes the report to the given writer and returns the process
//! exit code; fatal errors are returned to the caller.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod logging;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use std::path::PathBuf;

pub use config::{Config, ConfigError, OutputFormat, ProbeSelection};

/// Exit code for fatal errors (unreadable fixture, bad table, bad config)
pub const EXIT_ERROR: u8 = 2;

fn paths_arg() -> Arg {
    Arg::new("paths")
        .value_name("PATH")
        .num_args(0..)
        .value_parser(value_parser!(PathBuf))
        .help("Fixture files or directories (defaults to `corpus` from the config)")
}

fn probes_arg() -> Arg {
    Arg::new("probes")
        .long("probes")
        .value_name("SET")
        .help("Probe set: core, extended, or comma-separated probe names")
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

/// Command-line definition
#[must_use]
pub fn cli() -> Command {
    Command::new("jfix")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Structural fingerprint verifier for Java fixture corpora")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (defaults to ./jfix.toml when present)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("verify")
                .about("Verify fixtures against expectation tables")
                .arg(paths_arg())
                .arg(
                    Arg::new("expect")
                        .long("expect")
                        .short('e')
                        .value_name("FILE")
                        .action(ArgAction::Append)
                        .value_parser(value_parser!(PathBuf))
                        .help("Expectation table (.toml, .json, .yaml, or line format); repeatable"),
                )
                .arg(probes_arg())
                .arg(
                    Arg::new("parallel")
                        .long("parallel")
                        .action(ArgAction::SetTrue)
                        .help("Extract fingerprints in parallel"),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("fingerprint")
                .about("Print extracted fingerprints in expectation-line format")
                .arg(paths_arg())
                .arg(probes_arg())
                .arg(json_arg()),
        )
        .subcommand(Command::new("probes").about("List available feature probes"))
}

/// Apply command-line overrides to `config`
///
/// # Errors
/// Returns [`ConfigError`] if the config file cannot be loaded.
pub fn resolve_config(matches: &ArgMatches) -> Result<Config, ConfigError> {
    let mut config = Config::discover(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    if let Some((_, sub)) = matches.subcommand() {
        if let Ok(Some(paths)) = sub.try_get_many::<PathBuf>("paths") {
            let paths: Vec<PathBuf> = paths.cloned().collect();
            if !paths.is_empty() {
                config.corpus = paths;
            }
        }
        if let Ok(Some(tables)) = sub.try_get_many::<PathBuf>("expect") {
            config.expectations = tables.cloned().collect();
        }
        if let Ok(Some(probes)) = sub.try_get_one::<String>("probes") {
            config.probes = ProbeSelection::Named(probes.clone());
        }
        if sub.try_get_one::<bool>("parallel").ok().flatten().copied().unwrap_or(false) {
            config.parallel = true;
        }
        if sub.try_get_one::<bool>("json").ok().flatten().copied().unwrap_or(false) {
            config.format = OutputFormat::Json;
        }
    }
    Ok(config)
}

/// Run a parsed command line
///
/// Logging must already be initialised (see [`logging::init`]).
///
/// # Errors
/// Returns an error for fatal conditions; the caller should exit with
/// [`EXIT_ERROR`].
pub fn run(matches: &ArgMatches, config: &Config, out: &mut dyn Write) -> anyhow::Result<u8> {
    match matches.subcommand() {
        Some(("verify", _)) => commands::verify(config, out),
        Some(("fingerprint", _)) => commands::fingerprint(config, out),
        Some(("probes", _)) => commands::probes(config, out),
        _ => {
            write!(out, "{}", cli().render_help())?;
            Ok(EXIT_ERROR)
        }
    }
}
