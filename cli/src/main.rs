//! `hsi-docs` binary: parse arguments, run, and map the result to an exit code.
use std::process::ExitCode;

use clap::Parser;

use hsi_docs::{cli, commands, error, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    match commands::run(&args, &log) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::from(error::exit_code(&e))
        }
    }
}
