//! `@depend` tag scanning for scripts.
//!
//! Scripts declare their dependencies in the comments at the top of the file:
//!
//! ```js
//! /**
//!  * @depend util/dom.js
//!  */
//! // @depends events.js
//! ```
//!
//! Only text inside comments is searched for tags. The first character outside
//! a comment that is neither whitespace nor a slash marks the start of code, and
//! scanning stops right there, even mid-line.

use super::{DialectScanner, LazyPattern, LineScan, ScanError, ScanState, compiled};
use regex::Regex;
use std::sync::LazyLock;

const DIALECT: &str = "script";

static DEPEND_TAG: LazyPattern = LazyLock::new(|| Regex::new(r#"(?i)@depends?\s+([^\s'";]+)"#));

/// Scanner for the script dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptScanner;

impl DialectScanner for ScriptScanner {
    fn name(&self) -> &'static str {
        DIALECT
    }

    fn scan_line(&self, line: &str, state: &mut ScanState) -> Result<LineScan, ScanError> {
        let tag = compiled(&DEPEND_TAG, DIALECT)?;

        let mut comment = String::new();
        let mut line_comment = false;
        let mut previous = None;

        for ch in line.chars() {
            match (previous, ch) {
                (Some('/'), '*') => state.in_block_comment = true,
                (Some('*'), '/') => state.in_block_comment = false,
                (Some('/'), '/') if !state.in_block_comment => line_comment = true,
                _ => {}
            }

            if state.in_block_comment || line_comment {
                comment.push(ch);
            } else if !(ch.is_whitespace() || ch == '/') {
                return Ok(LineScan::Stop);
            }

            previous = Some(ch);
        }

        Ok(tag
            .captures(&comment)
            .and_then(|captures| captures.get(1))
            .map_or(LineScan::Nothing, |reference| {
                LineScan::Reference(reference.as_str().to_string())
            }))
    }
}
