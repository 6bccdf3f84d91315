//! Command execution logic.
//!
//! This module resolves the target prefs file (explicit path, environment
//! fallback, or platform auto-detection with confirmation) and runs the
//! requested subcommand against it.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dialoguer::Confirm;
use thiserror::Error;

use spcache::config::{Cli, Command, FileArgs};
use spcache::detect;
use spcache::env::{self, EnvError, QuoteMode, SetOptions, SetOutcome};

use crate::app::{exit_code, style};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// The single key this tool manipulates: the cache limit in megabytes.
pub const CACHE_KEY: &str = "storage.size";

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Auto-detection failed and an explicit path can still be given.
    #[error(
        "The Spotify prefs file couldn't be auto-detected.\n\
         Please specify a path to the prefs file using the --file option."
    )]
    DetectionWithFileOption,

    /// Auto-detection failed (detect subcommand, no fallback).
    #[error("The Spotify prefs file couldn't be auto-detected.")]
    Detection,

    /// The user declined the auto-detected path.
    #[error("Aborted!")]
    Aborted,

    /// Reading the confirmation prompt failed.
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// A prefs file operation failed.
    #[error(transparent)]
    Env(#[from] EnvError),
}

impl RunError {
    /// Maps the error to its process exit code.
    ///
    /// Detection failures and invalid-line failures get distinct codes so
    /// scripts can react to them.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::DetectionWithFileOption | Self::Detection => exit_code::detection_failure(),
            Self::Env(EnvError::InvalidLine { .. }) => exit_code::invalid_line(),
            Self::Aborted | Self::Prompt(_) | Self::Env(_) => exit_code::FAILURE,
        }
    }
}

/// Executes the requested subcommand.
///
/// # Errors
///
/// Returns an error when file resolution or the prefs file operation
/// fails; the caller maps it to an exit code via [`RunError::exit_code`].
pub fn execute(cli: &Cli) -> Result<(), RunError> {
    match &cli.command {
        Command::Set { file, size } => run_set(file, *size),
        Command::Get { file } => run_get(file),
        Command::Detect => run_detect(),
    }
}

/// Sets the cache size limit, reporting the previous value if any.
fn run_set(args: &FileArgs, size: u64) -> Result<(), RunError> {
    let path = resolve_file(args)?;
    let options = SetOptions {
        quote_mode: QuoteMode::Never,
        export: false,
        ignore_invalid: args.force,
    };

    let outcome = env::set_key(&path, CACHE_KEY, &size.to_string(), &options)?;
    match outcome {
        SetOutcome::Updated { previous } => report_success(&format!(
            "The cache size has been updated from {previous} MB to {size} MB."
        )),
        SetOutcome::Appended => {
            report_success(&format!("The cache size has been set to {size} MB."));
        }
    }
    Ok(())
}

/// Reports the current cache size limit.
fn run_get(args: &FileArgs) -> Result<(), RunError> {
    let path = resolve_file(args)?;

    match env::get_key(&path, CACHE_KEY, args.force)? {
        Some(limit) => report_success(&format!("The cache size is currently {limit} MB.")),
        None => report_notice("The cache size has not been set! Run 'spcache set' to set a limit."),
    }
    Ok(())
}

/// Prints the auto-detected prefs file path.
fn run_detect() -> Result<(), RunError> {
    let path = detect::detect_prefs_file().ok_or(RunError::Detection)?;
    report_success(&path.display().to_string());
    Ok(())
}

/// Resolves the target prefs file.
///
/// An explicit path (flag or environment fallback) is used as-is;
/// otherwise the file is auto-detected and, unless `--yes` was given,
/// confirmed interactively.
fn resolve_file(args: &FileArgs) -> Result<PathBuf, RunError> {
    let path = match &args.file {
        Some(path) => path.clone(),
        None => {
            let detected =
                detect::detect_prefs_file().ok_or(RunError::DetectionWithFileOption)?;
            if !args.yes {
                confirm_detected(&detected)?;
            }
            detected
        }
    };

    warn_unusual_name(&path);
    Ok(path)
}

/// Asks the user to confirm an auto-detected path.
fn confirm_detected(path: &Path) -> Result<(), RunError> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Auto-detected Spotify prefs file: {}\nIs this correct?",
            path.display()
        ))
        .interact()?;

    if confirmed {
        Ok(())
    } else {
        Err(RunError::Aborted)
    }
}

/// Warns when the target file is not named `prefs`.
///
/// A wrong path here usually means the rewrite will silently edit the
/// wrong file, so the warning goes to stderr but execution continues.
fn warn_unusual_name(path: &Path) {
    let Some(name) = path.file_name() else {
        return;
    };
    if name != "prefs" {
        report_warning(&format!(
            "The given file should be named 'prefs', not '{}'. Is the path correct?",
            name.to_string_lossy()
        ));
    }
}

fn report_success(message: &str) {
    let style = style::SUCCESS;
    anstream::println!("{style}{message}{style:#}");
}

fn report_notice(message: &str) {
    let style = style::NOTICE;
    anstream::println!("{style}{message}{style:#}");
}

fn report_warning(message: &str) {
    let style = style::ERROR;
    anstream::eprintln!("{style}{message}{style:#}");
}
