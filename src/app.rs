//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, terminal styles, and
//! error hints that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;

use spcache::env::EnvError;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Generic failure (exit code 1) - missing file, I/O error, declined prompt.
    pub const FAILURE: ExitCode = ExitCode::FAILURE;

    /// The prefs file could not be auto-detected (exit code 2).
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn detection_failure() -> ExitCode {
        ExitCode::from(2)
    }

    /// A prefs line failed to parse and --force was not given (exit code 3).
    pub fn invalid_line() -> ExitCode {
        ExitCode::from(3)
    }
}

/// Terminal styles for user-facing messages.
///
/// Rendered through `anstream`, so styling is dropped automatically when
/// the stream is not a terminal.
pub mod style {
    use anstyle::{AnsiColor, Style};

    /// Success messages (stdout).
    pub const SUCCESS: Style = AnsiColor::Green.on_default();

    /// Notices that need attention but are not failures (stdout).
    pub const NOTICE: Style = AnsiColor::Yellow.on_default();

    /// Warnings and errors (stderr).
    pub const ERROR: Style = AnsiColor::Red.on_default();
}

/// Prints a runtime error to stderr.
pub fn print_error(error: &RunError) {
    let style = style::ERROR;
    anstream::eprintln!("{style}Error: {error}{style:#}");
}

/// Prints helpful hints for recoverable errors.
pub fn print_error_hint(error: &RunError) {
    if matches!(error, RunError::Env(EnvError::InvalidLine { .. })) {
        anstream::eprintln!("To ignore this error, use the --force flag.");
    }
}

/// Sets up the tracing subscriber for logging.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
