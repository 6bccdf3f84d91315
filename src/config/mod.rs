//! Command-line surface for spcache.
//!
//! This module provides CLI argument parsing ([`Cli`], [`Command`],
//! [`FileArgs`]). Every option has an environment-variable fallback so the
//! tool can run unattended:
//!
//! | Option    | Variable                |
//! |-----------|-------------------------|
//! | `--file`  | `SPOTIFY_PREFS_FILE`    |
//! | `--size`  | `SPOTIFY_CACHE_SIZE`    |
//! | `--yes`   | `SPOTIFY_YES`           |
//! | `--force` | `SPOTIFY_IGNORE_ERRORS` |

mod cli;


pub use cli::{Cli, Command, DEFAULT_SIZE_MB, FileArgs};
