//! Resource dialects.
//!
//! A dialect is the set of directive-syntax rules for one kind of resource. The
//! dialect decides which [`DialectScanner`] reads a resource's header, and every
//! dependency discovered while scanning inherits the dialect of the resource that
//! referenced it.

use crate::core::LinkcatError;
use crate::scanner::{DialectScanner, ScriptScanner, StylesheetScanner};
use std::fmt;
use std::path::Path;

/// The kind of text resource being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// CSS, linked with `@import` directives.
    Stylesheet,

    /// JavaScript, linked with `@depend` tags inside leading comments.
    Script,
}

static STYLESHEET_SCANNER: StylesheetScanner = StylesheetScanner;
static SCRIPT_SCANNER: ScriptScanner = ScriptScanner;

impl Dialect {
    /// Guess the dialect from a file extension.
    ///
    /// `js`, `mjs` and `cjs` map to [`Dialect::Script`], `css` to
    /// [`Dialect::Stylesheet`]. Anything else returns `None`.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "js" | "mjs" | "cjs" => Some(Self::Script),
            "css" => Some(Self::Stylesheet),
            _ => None,
        }
    }

    /// The line scanner for this dialect.
    #[must_use]
    pub fn scanner(self) -> &'static dyn DialectScanner {
        match self {
            Self::Stylesheet => &STYLESHEET_SCANNER,
            Self::Script => &SCRIPT_SCANNER,
        }
    }

    /// Short name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stylesheet => "css",
            Self::Script => "js",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = LinkcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "css" | "stylesheet" => Ok(Self::Stylesheet),
            "js" | "javascript" | "script" => Ok(Self::Script),
            _ => Err(LinkcatError::UnknownDialect {
                name: s.to_string(),
            }),
        }
    }
}
