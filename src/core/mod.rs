//! Core types for linkcat
//!
//! This module holds the types shared by every other module:
//!
//! - [`LinkcatError`] - typed failure kinds, carried inside [`anyhow::Error`]
//! - [`ErrorContext`] and [`user_friendly_error`] - terminal error reporting
//! - [`Dialect`] - the kind of resource (stylesheet or script) and its scanner

pub mod dialect;
pub mod error;

pub use dialect::Dialect;
pub use error::{ErrorContext, LinkcatError, user_friendly_error};
