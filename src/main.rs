//! tw: short git and review-request aliases with branch-topology awareness.
//!
//! This is the main entry point for the `tw` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes. Every mutation is delegated to `git` or `gh`; any
//! failure or violated invariant aborts the whole operation, since the
//! partially-applied state is itself inspectable and fixable with further
//! commands.

mod cli;
mod commands;
pub mod branch;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod exit_codes;
pub mod gh;
pub mod git;
pub mod prompt;
pub mod review;
pub mod sync;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_logging(cli.verbose);

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
