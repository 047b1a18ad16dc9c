//! `jfix` binary

use jfix_cli::{cli, logging, resolve_config, run, EXIT_ERROR};
use std::process::ExitCode;

fn main() -> ExitCode {
    let matches = cli().get_matches();
    let verbosity = matches.get_count("verbose");

    let config = match resolve_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    logging::init(
        logging::level_for(verbosity, &config.log_level),
        config.log_json || matches.get_flag("log-json"),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&matches, &config, &mut out) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
