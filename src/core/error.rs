//! Error handling for linkcat
//!
//! This module provides the typed error kinds raised by the resolver and the
//! user-facing reporting used by the command line. The error system follows two
//! rules:
//! 1. **Strongly-typed errors** ([`LinkcatError`]) for failures callers may want to
//!    match on, carried inside [`anyhow::Error`] so they can be downcast
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and a suggestion
//!
//! # Error Categories
//!
//! - **Invalid input**: [`LinkcatError::InvalidInput`] covers unusable sources and
//!   output targets that cannot be written
//! - **Missing references**: [`LinkcatError::MissingReference`] is fatal, since a
//!   concatenation without the dependency would be silently wrong
//! - **Configuration**: [`LinkcatError::ConfigError`], [`LinkcatError::UnknownDialect`]
//!
//! Malformed directives are not part of this enum. They are reported to the
//! resolver's diagnostic sink as [`crate::scanner::ScanError`] and scanning
//! continues with the next line.
//!
//! # Examples
//!
//! ```rust,no_run
//! use linkcat::core::{ErrorContext, LinkcatError, user_friendly_error};
//!
//! let error = LinkcatError::MissingReference {
//!     reference: "reset.css".to_string(),
//!     referrer: "/site/main.css".to_string(),
//!     searched: vec!["/site".to_string()],
//! };
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for linkcat operations.
///
/// Variants carry plain strings so the enum stays `Clone` and can be rebuilt into an
/// [`ErrorContext`] without consuming the original error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkcatError {
    /// A source or output target could not be used.
    ///
    /// Raised for inputs that are neither a readable file, a content string, nor a
    /// readable stream, and for export targets that cannot be opened or written.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input
        message: String,
    },

    /// A dependency reference found in a resource could not be located.
    #[error("Dependency '{reference}' referenced from {referrer} could not be found")]
    MissingReference {
        /// The raw reference token extracted from the source text
        reference: String,
        /// Display name of the resource containing the reference
        referrer: String,
        /// Base directories that were searched, in order
        searched: Vec<String>,
    },

    /// A dialect name given on the command line or in configuration is unknown.
    #[error("Unknown dialect '{name}'")]
    UnknownDialect {
        /// The name that failed to parse
        name: String,
    },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Catch-all for failures without a dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// An error paired with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LinkcatError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context without details or suggestion.
    #[must_use]
    pub const fn new(error: LinkcatError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional details about the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for the terminal.
///
/// Known [`LinkcatError`] kinds get a tailored suggestion. Standard I/O errors are
/// recognised by kind. Anything else is wrapped in [`LinkcatError::Other`] with the
/// full `anyhow` context chain as details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(linkcat_error) = error.downcast_ref::<LinkcatError>() {
        return create_error_context(linkcat_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(LinkcatError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check file ownership and permissions");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(LinkcatError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let ctx = ErrorContext::new(LinkcatError::Other {
        message: error.to_string(),
    });

    if chain.is_empty() { ctx } else { ctx.with_details(chain.join("\n  caused by: ")) }
}

fn create_error_context(error: LinkcatError) -> ErrorContext {
    match &error {
        LinkcatError::MissingReference { searched, .. } => {
            let details = if searched.is_empty() {
                "No search directories were configured".to_string()
            } else {
                format!("Searched: {}", searched.join(", "))
            };
            ErrorContext::new(error)
                .with_details(details)
                .with_suggestion(
                    "Add the directory containing the file with --include or `search_paths` in config.toml",
                )
        }
        LinkcatError::InvalidInput { .. } => ErrorContext::new(error).with_suggestion(
            "Pass an existing file, pipe content on standard input, or choose a writable output path",
        ),
        LinkcatError::UnknownDialect { .. } => {
            ErrorContext::new(error).with_suggestion("Use one of: css, stylesheet, js, javascript, script")
        }
        LinkcatError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the syntax of your config.toml or pass a different file with --config"),
        LinkcatError::Other { .. } => ErrorContext::new(error),
    }
}
