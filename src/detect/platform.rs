//! Platform-specific candidate paths for the Spotify prefs file.
//!
//! # Platform Support
//!
//! - **Windows**: direct installations under `%APPDATA%`, plus Microsoft
//!   Store installations under `AppData/Local/Packages`.
//! - **Linux**: native, Flatpak, and Snap installations.
//! - **macOS**: the standard `Application Support` location.
//!
//! Other platforms yield no candidates.

use std::path::PathBuf;

#[cfg(any(target_os = "windows", test))]
use std::path::Path;

/// Candidate prefs paths for a Windows installation, in probe order.
///
/// Covers direct installations and Microsoft Store installations.
#[cfg(target_os = "windows")]
pub(super) fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // %APPDATA%\Spotify\prefs (direct and Winget installations)
    if let Some(roaming) = dirs::config_dir() {
        candidates.push(roaming.join("Spotify").join("prefs"));
    }

    // Microsoft Store installations keep state under a versioned package
    // directory, so the package name has to be scanned for.
    if let Some(home) = dirs::home_dir() {
        let packages = home.join("AppData").join("Local").join("Packages");
        candidates.extend(store_package_prefs(&packages));
    }

    candidates
}

/// Candidate prefs paths for a Linux installation, in probe order.
#[cfg(target_os = "linux")]
pub(super) fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // ~/.config/spotify/prefs (native packages)
    if let Some(config) = dirs::config_dir() {
        candidates.push(config.join("spotify").join("prefs"));
    }

    if let Some(home) = dirs::home_dir() {
        // Flatpak
        candidates.push(
            home.join(".var")
                .join("app")
                .join("com.spotify.Client")
                .join("config")
                .join("spotify")
                .join("prefs"),
        );
        // Snap
        candidates.push(
            home.join("snap")
                .join("spotify")
                .join("current")
                .join(".config")
                .join("spotify")
                .join("prefs"),
        );
    }

    candidates
}

/// Candidate prefs paths for a macOS installation.
#[cfg(target_os = "macos")]
pub(super) fn candidate_paths() -> Vec<PathBuf> {
    // ~/Library/Application Support/Spotify/prefs
    dirs::config_dir()
        .map(|support| support.join("Spotify").join("prefs"))
        .into_iter()
        .collect()
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub(super) fn candidate_paths() -> Vec<PathBuf> {
    Vec::new()
}

/// Prefs paths inside Spotify Store packages under `packages`.
///
/// Scans for package directories whose name starts with `Spotify` and maps
/// each to its `LocalState/Spotify/prefs` file. An unreadable or missing
/// packages directory yields no candidates.
#[cfg(any(target_os = "windows", test))]
pub(super) fn store_package_prefs(packages: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(packages) else {
        return Vec::new();
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("Spotify"))
        .map(|entry| {
            entry
                .path()
                .join("LocalState")
                .join("Spotify")
                .join("prefs")
        })
        .collect();

    // read_dir order is platform-dependent; sort for a stable probe order.
    found.sort();
    found
}
