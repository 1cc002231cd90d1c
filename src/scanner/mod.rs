//! Line-oriented directive scanning.
//!
//! A [`DialectScanner`] looks at one line of a resource at a time and reports at
//! most one dependency reference for it. Scanners never parse the language: they
//! match directive patterns and keep just enough state between lines to know
//! whether the current line sits inside a block comment.
//!
//! # Scan state
//!
//! The state that crosses line boundaries lives in [`ScanState`], owned by the
//! caller and passed in for every line. Scanners themselves hold no data, so the
//! same scanner can be used for any number of resources at once.
//!
//! ```text
//!            "/*"                        stop signal
//!   Normal ---------> InBlockComment      (any state) ----------> done
//!          <---------
//!            "*/"
//! ```
//!
//! # Stop signal
//!
//! Directives are only honored in a resource's header. As soon as a scanner sees
//! real content (a selector for stylesheets, code for scripts) it returns
//! [`LineScan::Stop`] and the caller must not scan any further lines.

pub mod script;
pub mod stylesheet;

pub use script::ScriptScanner;
pub use stylesheet::StylesheetScanner;

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Mutable per-resource state carried from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    /// Whether the previous line ended inside an unterminated `/* ... */` comment.
    pub in_block_comment: bool,
}

/// Result of scanning a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineScan {
    /// Nothing of interest on this line.
    Nothing,

    /// The line carries a directive referencing another resource.
    Reference(String),

    /// The header is over; no further lines of this resource are scanned.
    Stop,
}

/// A line could not be scanned.
///
/// These errors are reported with the resource name and line number and then
/// skipped; they never abort a resolution.
#[derive(Error, Debug, Clone)]
pub enum ScanError {
    /// A directive pattern failed to compile.
    #[error("Invalid {dialect} directive pattern: {source}")]
    Pattern {
        /// Dialect whose pattern is broken
        dialect: &'static str,
        /// The regex compilation error
        source: regex::Error,
    },

    /// The raw line is not valid UTF-8.
    #[error("Line is not valid UTF-8: {source}")]
    Encoding {
        /// The decoding error
        source: std::str::Utf8Error,
    },
}

/// Extracts dependency references from the lines of one dialect.
pub trait DialectScanner: Send + Sync {
    /// Name of the dialect, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Scan one line (with or without its trailing newline).
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if one of the scanner's patterns is unusable.
    fn scan_line(&self, line: &str, state: &mut ScanState) -> Result<LineScan, ScanError>;
}

/// A lazily compiled pattern whose compilation error is kept instead of panicking.
pub(crate) type LazyPattern = LazyLock<Result<Regex, regex::Error>>;

pub(crate) fn compiled(
    pattern: &'static LazyPattern,
    dialect: &'static str,
) -> Result<&'static Regex, ScanError> {
    pattern.as_ref().map_err(|source| ScanError::Pattern {
        dialect,
        source: source.clone(),
    })
}

/// Decode a raw line read from a resource.
///
/// # Errors
///
/// Returns [`ScanError::Encoding`] when the bytes are not valid UTF-8.
pub fn decode_line(bytes: &[u8]) -> Result<&str, ScanError> {
    std::str::from_utf8(bytes).map_err(|source| ScanError::Encoding {
        source,
    })
}
