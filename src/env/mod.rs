//! Core layer for reading and rewriting the prefs file.
//!
//! This module provides:
//! - Line-by-line parsing of `KEY=VALUE` files ([`Parser`], [`Line`])
//! - Key/value rewriting with atomic commit ([`set_key`], [`SetOptions`])
//! - Key lookup ([`get_key`])
//! - Error handling ([`EnvError`])
//!
//! The file format is one `KEY=VALUE` pair per line, optionally prefixed
//! with `export `. Blank lines and `#`-comments are preserved verbatim,
//! as is every line not holding the target key.

mod error;
mod parser;
mod rewrite;


pub use error::EnvError;
pub use parser::{Line, LineKind, Parser, parse};
pub use rewrite::{QuoteMode, SetOptions, SetOutcome, get_key, set_key};
