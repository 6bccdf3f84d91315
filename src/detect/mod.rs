//! Best-effort detection of the Spotify prefs file location.
//!
//! Detection is an ordered list of platform-specific candidate paths,
//! each tested for existence; the first hit wins. This is caller-side
//! glue: the rewriter in [`crate::env`] never detects anything itself,
//! it only receives a path.

mod platform;


use std::path::PathBuf;

/// Returns the path to the Spotify prefs file, if one can be found on
/// this platform.
///
/// Pure lookup: probes the filesystem but never modifies it.
#[must_use]
pub fn detect_prefs_file() -> Option<PathBuf> {
    first_existing(platform::candidate_paths())
}

/// Returns the first candidate that exists as a regular file, resolved.
fn first_existing(candidates: Vec<PathBuf>) -> Option<PathBuf> {
    for candidate in candidates {
        tracing::debug!(path = %candidate.display(), "probing prefs candidate");
        if candidate.is_file() {
            return Some(normalize(candidate));
        }
    }
    None
}

/// Resolves symlinks and relative components.
///
/// Falls back to the path as given when resolution fails (e.g. a
/// permission error on a parent directory).
fn normalize(path: PathBuf) -> PathBuf {
    path.canonicalize().unwrap_or(path)
}
