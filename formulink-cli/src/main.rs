//! Formulink command line
//!
//! Imports the bundled formulary and lists, describes or calls the
//! registered entries. Logs go to stderr; results go to stdout.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::Cli;
use formulink::Verbosity;
use logging::LogConfig;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = if cli.quiet {
        LogConfig::quiet()
    } else {
        LogConfig::from_verbosity(cli.verbose)
    };
    logging::init_logging(&log_config.with_ansi(io::stderr().is_terminal()));

    let verbosity = match (cli.quiet, cli.verbose) {
        (true, _) => Verbosity::Quiet,
        (false, 0) => Verbosity::Normal,
        _ => Verbosity::Detailed,
    };

    let result = commands::load_config(cli.config.as_deref())
        .and_then(|config| commands::run(cli.command, config, verbosity));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
