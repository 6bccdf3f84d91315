//! spcache: Spotify cache size limiter
//!
//! A library for editing the line-oriented Spotify prefs file,
//! with platform auto-detection of the file's location.

pub mod config;
pub mod detect;
pub mod env;
