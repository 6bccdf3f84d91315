//! Error types for prefs file parsing and rewriting.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for prefs file operations.
///
/// The rewriter never recovers from these internally; they always surface
/// to the caller with enough context to act. The only recovery path is
/// caller-requested tolerance of invalid lines
/// ([`SetOptions::ignore_invalid`](super::SetOptions)).
#[derive(Debug, Error)]
pub enum EnvError {
    /// The target file does not exist or is not a regular file.
    ///
    /// The rewriter never creates a file from nothing, to avoid leaving
    /// an orphan prefs file somewhere in the filesystem.
    #[error("File '{}' does not exist", path.display())]
    FileNotFound {
        /// The missing path
        path: PathBuf,
    },

    /// A textual quote-mode spelling was not recognized.
    #[error("Unknown quote mode '{0}': expected always, auto, or never")]
    UnknownQuoteMode(String),

    /// A line failed to parse as `KEY=VALUE` and tolerance was not requested.
    ///
    /// The original file is left untouched when this is returned.
    #[error("Line {number} is invalid. ({preview})")]
    InvalidLine {
        /// 1-based line number of the offending line
        number: usize,
        /// Truncated preview of the raw line text (at most 80 characters)
        preview: String,
    },

    /// An I/O failure while reading, writing, or committing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
