//! Log subscriber setup
//!
//! Logs go to stderr so stdout carries nothing but the report.

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count, falling back to `configured`
#[must_use]
pub fn level_for(verbosity: u8, configured: &str) -> &str {
    match verbosity {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `level`. Installing twice is a no-op.
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        tracing::debug!("Log subscriber already installed");
    }
}
