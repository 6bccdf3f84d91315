//! Key/value rewriting with atomic commit.
//!
//! The rewrite is a single streaming forward pass: every line not holding
//! the target key is copied to a temporary file byte-for-byte, the target
//! line is replaced in place (or appended at the end), and the temporary
//! file then atomically replaces the original. Failure is all-or-nothing:
//! the original file is never left partially rewritten.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::EnvError;
use super::parser::{LineKind, Parser};

/// Policy controlling whether a written value is wrapped in quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMode {
    /// Always quote the value.
    #[default]
    Always,
    /// Quote only if the value is not purely alphanumeric.
    Auto,
    /// Never quote the value.
    Never,
}

impl FromStr for QuoteMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            other => Err(EnvError::UnknownQuoteMode(other.to_string())),
        }
    }
}

impl fmt::Display for QuoteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Always => "always",
            Self::Auto => "auto",
            Self::Never => "never",
        };
        f.write_str(name)
    }
}

/// Formatting and tolerance options for [`set_key`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Quoting policy for the written value.
    pub quote_mode: QuoteMode,

    /// Prepend `export ` to the written key.
    pub export: bool,

    /// Skip and preserve malformed lines verbatim instead of rejecting
    /// the whole file.
    pub ignore_invalid: bool,
}

/// Result of a [`set_key`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key existed before; its line was replaced in place.
    Updated {
        /// The value the key held before this call.
        previous: String,
    },

    /// The key was not found; a new line was appended at the end.
    Appended,
}

impl SetOutcome {
    /// Returns the previous value, or `None` if the key was newly appended.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        match self {
            Self::Updated { previous } => Some(previous),
            Self::Appended => None,
        }
    }

    /// Returns `true` if an existing line was replaced.
    #[must_use]
    pub const fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Adds or updates a key/value pair in the prefs file at `path`.
///
/// Lines not holding `key` are preserved byte-for-byte, in their original
/// order. A matching line (exact, case-sensitive key) is replaced in place;
/// when the key is absent, the new line is appended at the end, with a
/// newline inserted first if the file did not end in one.
///
/// The new content is written to a temporary file in the same directory and
/// committed with an atomic rename, so the original is either fully
/// replaced or untouched.
///
/// # Errors
///
/// - [`EnvError::FileNotFound`] if `path` does not exist or is not a
///   regular file — the rewriter never creates a file from nothing.
/// - [`EnvError::InvalidLine`] if a line fails to parse and
///   [`SetOptions::ignore_invalid`] is not set.
/// - [`EnvError::Io`] on any read, write, or rename failure.
pub fn set_key(
    path: &Path,
    key: &str,
    value: &str,
    options: &SetOptions,
) -> Result<SetOutcome, EnvError> {
    if !path.is_file() {
        return Err(EnvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let replacement = format_line(key, value, options);
    let source = File::open(path)?;

    // Temp file lives next to the target so the finalizing rename stays on
    // one filesystem. Append .tmp instead of replacing the extension to
    // avoid clobbering an unrelated sibling.
    let temp_path = PathBuf::from(format!("{}.tmp", path.display()));
    let temp = File::create(&temp_path)?;

    let result = rewrite_stream(
        Parser::new(BufReader::new(source)),
        &mut BufWriter::new(temp),
        key,
        &replacement,
        options.ignore_invalid,
    );

    match result {
        Ok(outcome) => {
            fs::rename(&temp_path, path).map_err(|e| {
                let _ = fs::remove_file(&temp_path);
                EnvError::Io(e)
            })?;
            tracing::debug!(path = %path.display(), updated = outcome.is_updated(), "prefs file committed");
            Ok(outcome)
        }
        Err(e) => {
            // Discard the temp file; the original stays exactly as it was.
            let _ = fs::remove_file(&temp_path);
            Err(e)
        }
    }
}

/// Runs the per-line copy/replace pass and flushes the destination.
fn rewrite_stream<R: BufRead, W: Write>(
    parser: Parser<R>,
    dest: &mut W,
    key: &str,
    replacement: &str,
    ignore_invalid: bool,
) -> Result<SetOutcome, EnvError> {
    let mut previous = None;
    let mut missing_newline = false;

    for record in parser {
        let record = record?;
        if record.is_invalid() && !ignore_invalid {
            return Err(EnvError::InvalidLine {
                number: record.number,
                preview: record.preview(),
            });
        }

        match &record.kind {
            LineKind::Binding { key: k, value, .. } if k.as_str() == key => {
                dest.write_all(replacement.as_bytes())?;
                previous = Some(value.clone());
            }
            _ => {
                dest.write_all(&record.raw)?;
                missing_newline = !record.raw.ends_with(b"\n");
            }
        }
    }

    let outcome = match previous {
        Some(previous) => SetOutcome::Updated { previous },
        None => {
            if missing_newline {
                dest.write_all(b"\n")?;
            }
            dest.write_all(replacement.as_bytes())?;
            SetOutcome::Appended
        }
    };

    dest.flush()?;
    Ok(outcome)
}

/// Reads the current value of `key` from the prefs file at `path`.
///
/// Scans the whole file; when a key repeats, the last binding wins. Never
/// writes.
///
/// # Errors
///
/// - [`EnvError::FileNotFound`] if `path` does not exist or is not a
///   regular file.
/// - [`EnvError::InvalidLine`] if a line fails to parse and
///   `ignore_invalid` is `false`.
/// - [`EnvError::Io`] on read failure.
pub fn get_key(path: &Path, key: &str, ignore_invalid: bool) -> Result<Option<String>, EnvError> {
    if !path.is_file() {
        return Err(EnvError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut found = None;
    for record in Parser::new(BufReader::new(File::open(path)?)) {
        let record = record?;
        if record.is_invalid() && !ignore_invalid {
            return Err(EnvError::InvalidLine {
                number: record.number,
                preview: record.preview(),
            });
        }
        match record.kind {
            LineKind::Binding { key: k, value, .. } if k == key => found = Some(value),
            _ => {}
        }
    }
    Ok(found)
}

/// Formats the line written for the target key, trailing newline included.
fn format_line(key: &str, value: &str, options: &SetOptions) -> String {
    let quote = match options.quote_mode {
        QuoteMode::Always => true,
        QuoteMode::Auto => value.is_empty() || !value.chars().all(char::is_alphanumeric),
        QuoteMode::Never => false,
    };

    let rendered = if quote {
        format!("'{}'", value.replace('\'', "\\'"))
    } else {
        value.to_string()
    };

    if options.export {
        format!("export {key}={rendered}\n")
    } else {
        format!("{key}={rendered}\n")
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    fn options(quote_mode: QuoteMode) -> SetOptions {
        SetOptions {
            quote_mode,
            ..SetOptions::default()
        }
    }

    #[test]
    fn always_quotes_alphanumeric_values() {
        let line = format_line("storage.size", "1024", &options(QuoteMode::Always));
        assert_eq!(line, "storage.size='1024'\n");
    }

    #[test]
    fn auto_quotes_only_non_alphanumeric_values() {
        assert_eq!(
            format_line("k", "1024", &options(QuoteMode::Auto)),
            "k=1024\n"
        );
        assert_eq!(
            format_line("k", "12 MB", &options(QuoteMode::Auto)),
            "k='12 MB'\n"
        );
        assert_eq!(format_line("k", "", &options(QuoteMode::Auto)), "k=''\n");
    }

    #[test]
    fn never_leaves_spaces_unquoted() {
        let line = format_line("k", "12 MB", &options(QuoteMode::Never));
        assert_eq!(line, "k=12 MB\n");
    }

    #[test]
    fn quoting_escapes_embedded_single_quotes() {
        let line = format_line("k", "it's", &options(QuoteMode::Always));
        assert_eq!(line, "k='it\\'s'\n");
    }

    #[test]
    fn export_prefixes_the_key() {
        let opts = SetOptions {
            quote_mode: QuoteMode::Never,
            export: true,
            ignore_invalid: false,
        };
        assert_eq!(format_line("k", "1", &opts), "export k=1\n");
    }

    #[test]
    fn quote_mode_parses_known_spellings() {
        assert_eq!("always".parse::<QuoteMode>().unwrap(), QuoteMode::Always);
        assert_eq!("auto".parse::<QuoteMode>().unwrap(), QuoteMode::Auto);
        assert_eq!("never".parse::<QuoteMode>().unwrap(), QuoteMode::Never);
    }

    #[test]
    fn quote_mode_rejects_unknown_spellings() {
        let error = "sometimes".parse::<QuoteMode>().unwrap_err();
        assert!(matches!(error, EnvError::UnknownQuoteMode(s) if s == "sometimes"));
    }

    #[test]
    fn quote_mode_displays_its_spelling() {
        assert_eq!(QuoteMode::Auto.to_string(), "auto");
    }
}
