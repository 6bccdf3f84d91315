//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default cache limit in megabytes.
pub const DEFAULT_SIZE_MB: u64 = 1024;

/// Set a limit on the Spotify cache size.
#[derive(Debug, Parser)]
#[command(name = "spcache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for spcache
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the cache size limit on the Spotify prefs file.
    ///
    /// If a file is not specified, it will be auto-detected.
    Set {
        #[command(flatten)]
        file: FileArgs,

        /// Cache limit [MB]
        #[arg(
            long,
            short,
            default_value_t = DEFAULT_SIZE_MB,
            env = "SPOTIFY_CACHE_SIZE"
        )]
        size: u64,
    },

    /// Get the current cache size limit from the Spotify prefs file.
    ///
    /// If a file is not specified, it will be auto-detected.
    Get {
        #[command(flatten)]
        file: FileArgs,
    },

    /// Auto-detect the Spotify prefs file.
    Detect,
}

/// Options shared by the commands that operate on a prefs file.
#[derive(Debug, Args)]
pub struct FileArgs {
    /// Path to the Spotify prefs file
    #[arg(long, short, env = "SPOTIFY_PREFS_FILE")]
    pub file: Option<PathBuf>,

    /// Do not prompt for confirmation after auto-detecting a path
    #[arg(long, short, env = "SPOTIFY_YES")]
    pub yes: bool,

    /// Ignore syntax errors in the prefs file
    #[arg(long, env = "SPOTIFY_IGNORE_ERRORS")]
    pub force: bool,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
