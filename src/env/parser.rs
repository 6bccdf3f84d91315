//! Line-by-line parsing of `KEY=VALUE` prefs files.
//!
//! The parser is a lazy iterator over raw lines. It never fails the whole
//! file: each line carries its own validity tag, and the caller decides
//! whether invalid lines are fatal. Raw bytes are kept per line so that
//! untouched lines round-trip exactly, including newline quirks and
//! non-UTF-8 content.

use std::io::{self, BufRead};

/// How a single line is classified during parsing.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - A key/value binding
/// - A valid line with no key (blank or comment)
/// - An invalid line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A valid `KEY=VALUE` binding.
    Binding {
        /// The key, trimmed of surrounding whitespace.
        key: String,
        /// The value, unquoted and unescaped.
        value: String,
        /// Whether the line carried a leading `export ` prefix.
        export: bool,
    },

    /// A blank line or `#`-comment. Skipped for key matching, preserved
    /// verbatim on output.
    Blank,

    /// The line failed to parse as `KEY=VALUE`.
    Invalid,
}

/// One logical line from the source file.
///
/// Created once per parse pass, read-only, discarded after the rewrite
/// completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,

    /// Exact original bytes, including the trailing newline if present.
    pub raw: Vec<u8>,

    /// Classification of the line's content.
    pub kind: LineKind,
}

/// Width limit for [`Line::preview`] output.
const PREVIEW_WIDTH: usize = 80;

impl Line {
    /// Returns `true` if the line failed to parse.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self.kind, LineKind::Invalid)
    }

    /// Returns the key if the line is a valid binding.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Binding { key, .. } => Some(key),
            LineKind::Blank | LineKind::Invalid => None,
        }
    }

    /// Returns the value if the line is a valid binding.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Binding { value, .. } => Some(value),
            LineKind::Blank | LineKind::Invalid => None,
        }
    }

    /// Returns a truncated, whitespace-collapsed preview of the raw text,
    /// at most 80 characters, suitable for error messages.
    #[must_use]
    pub fn preview(&self) -> String {
        let text = String::from_utf8_lossy(&self.raw);
        let mut collapsed = String::with_capacity(text.len().min(PREVIEW_WIDTH));
        for word in text.split_whitespace() {
            if !collapsed.is_empty() {
                collapsed.push(' ');
            }
            collapsed.push_str(word);
        }
        if collapsed.chars().count() > PREVIEW_WIDTH {
            let cut: String = collapsed.chars().take(PREVIEW_WIDTH - 6).collect();
            collapsed = format!("{} [...]", cut.trim_end());
        }
        collapsed
    }
}

/// Lazy parser over the lines of a prefs file.
///
/// Yields one [`Line`] per raw line, finite, not restartable: each call to
/// [`parse`] (or [`Parser::new`]) rescans from the start of the given input.
/// Reading streams through the underlying reader, so memory stays bounded
/// for very large files.
#[derive(Debug)]
pub struct Parser<R> {
    reader: R,
    number: usize,
    failed: bool,
}

impl<R: BufRead> Parser<R> {
    /// Creates a parser over the given reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            number: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for Parser<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut raw = Vec::new();
        match self.reader.read_until(b'\n', &mut raw) {
            Ok(0) => None,
            Ok(_) => {
                self.number += 1;
                Some(Ok(classify(self.number, raw)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Parses a string into a sequence of [`Line`] records.
///
/// Convenience wrapper over [`Parser::new`] for in-memory input.
pub fn parse(source: &str) -> Parser<&[u8]> {
    Parser::new(source.as_bytes())
}

/// Classifies one raw line into a [`Line`] record.
fn classify(number: usize, raw: Vec<u8>) -> Line {
    let kind = match std::str::from_utf8(&raw) {
        Ok(text) => classify_text(text),
        // Non-UTF-8 content can't hold the target key; tolerance decides
        // whether it is preserved verbatim or rejected.
        Err(_) => LineKind::Invalid,
    };
    Line { number, raw, kind }
}

fn classify_text(text: &str) -> LineKind {
    let content = strip_newline(text);
    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return LineKind::Blank;
    }

    let Some(eq) = find_unescaped_eq(content) else {
        return LineKind::Invalid;
    };
    let lhs = content[..eq].trim();
    let rhs = &content[eq + 1..];

    let (key, export) = match lhs.strip_prefix("export ") {
        Some(rest) => (rest.trim_start(), true),
        None => (lhs, false),
    };
    if key.is_empty() || !is_valid_key(key) {
        return LineKind::Invalid;
    }

    match unquote(rhs) {
        Some(value) => LineKind::Binding {
            key: key.to_string(),
            value,
            export,
        },
        None => LineKind::Invalid,
    }
}

/// Strips a trailing `\n` or `\r\n` from the line text.
fn strip_newline(text: &str) -> &str {
    text.strip_suffix('\n')
        .map_or(text, |rest| rest.strip_suffix('\r').unwrap_or(rest))
}

/// Returns the byte index of the first `=` not preceded by a backslash.
fn find_unescaped_eq(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '=' {
            return Some(index);
        }
    }
    None
}

/// A key may not contain whitespace, `#`, or quote characters.
fn is_valid_key(key: &str) -> bool {
    key.chars()
        .all(|ch| !ch.is_whitespace() && !matches!(ch, '#' | '\'' | '"'))
}

/// Interprets the right-hand side of a binding.
///
/// A value wrapped in matching single or double quotes is unwrapped, with
/// `\'` and `\"` unescaped inside. An unquoted value is taken verbatim.
/// Returns `None` for an unterminated quote or trailing garbage after the
/// closing quote.
fn unquote(rhs: &str) -> Option<String> {
    let trimmed = rhs.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(quote @ ('\'' | '"')) => unescape_quoted(chars.as_str(), quote),
        _ => Some(rhs.to_string()),
    }
}

/// Unescapes the interior of a quoted value, up to the closing quote.
///
/// Only `\'` and `\"` collapse; any other escape sequence is kept verbatim.
fn unescape_quoted(inner: &str, quote: char) -> Option<String> {
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if escaped {
            if !matches!(ch, '\'' | '"') {
                out.push('\\');
            }
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            // The closing quote must end the (trimmed) value.
            return chars.next().is_none().then_some(out);
        } else {
            out.push(ch);
        }
    }
    None
}
