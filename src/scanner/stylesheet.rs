//! `@import` scanning for stylesheets.
//!
//! Recognised forms (case-insensitive, query strings are discarded):
//!
//! ```css
//! @import url(reset.css);
//! @import url("layout.css?v=3");
//! @import 'theme.css' screen;
//! @import "print.css";
//! ```
//!
//! Imports inside `/* ... */` comments are ignored, including comments spanning
//! several lines. The first line that starts with something selector-like (`.`,
//! `#`, `:` or a letter) ends the header.

use super::{DialectScanner, LazyPattern, LineScan, ScanError, ScanState, compiled};
use regex::Regex;
use std::sync::LazyLock;

const DIALECT: &str = "stylesheet";

/// A comment opened and closed on the same line.
static INLINE_COMMENT: LazyPattern = LazyLock::new(|| Regex::new(r"/\*.*\*/"));

/// Everything up to the end of a comment closed on this line.
static COMMENT_TAIL: LazyPattern = LazyLock::new(|| Regex::new(r"^.*\*/"));

// The quoted forms are spelled out separately because the regex crate has no
// backreferences; each alternative requires its own closing quote.
static IMPORT: LazyPattern = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^\s*@import(?:\s+url\(|\s+)?(?:"([^?'")\s]+)(?:\?[^'")]*)?"|'([^?'")\s]+)(?:\?[^'")]*)?'|([^?'")\s]+)(?:\?[^'")]*)?)\)?[^?;]*;?"#,
    )
});

static SELECTOR: LazyPattern = LazyLock::new(|| Regex::new(r"^\s*[.#a-zA-Z:]"));

/// Scanner for the stylesheet dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylesheetScanner;

impl DialectScanner for StylesheetScanner {
    fn name(&self) -> &'static str {
        DIALECT
    }

    fn scan_line(&self, line: &str, state: &mut ScanState) -> Result<LineScan, ScanError> {
        let line = compiled(&INLINE_COMMENT, DIALECT)?.replace_all(line, "");

        track_block_comments(&line, state);
        if state.in_block_comment {
            return Ok(LineScan::Nothing);
        }

        let line = compiled(&COMMENT_TAIL, DIALECT)?.replace(&line, "");

        if let Some(captures) = compiled(&IMPORT, DIALECT)?.captures(&line) {
            let reference = captures.get(1).or_else(|| captures.get(2)).or_else(|| captures.get(3));
            if let Some(reference) = reference {
                return Ok(LineScan::Reference(reference.as_str().to_string()));
            }
        }

        if compiled(&SELECTOR, DIALECT)?.is_match(&line) {
            return Ok(LineScan::Stop);
        }

        Ok(LineScan::Nothing)
    }
}

/// Walk the line pairwise and flip the block comment flag on `/*` and `*/`.
fn track_block_comments(line: &str, state: &mut ScanState) {
    let mut previous = None;

    for ch in line.chars() {
        match (previous, ch) {
            (Some('/'), '*') => state.in_block_comment = true,
            (Some('*'), '/') => state.in_block_comment = false,
            _ => {}
        }
        previous = Some(ch);
    }
}
