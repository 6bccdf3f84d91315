//! spcache: Spotify cache size limiter
//!
//! Entry point for the spcache binary.

use std::process::ExitCode;

use spcache::config::Cli;

mod app;
mod run;

use app::{print_error, print_error_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    match run::execute(&cli) {
        Ok(()) => app::exit_code::SUCCESS,
        Err(e) => {
            print_error(&e);
            print_error_hint(&e);
            e.exit_code()
        }
    }
}
