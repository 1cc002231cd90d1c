//! linkcat - in-source dependency resolution for stylesheets and scripts
//!
//! Stylesheets and scripts declare what they need at the top of the file:
//!
//! ```text
//! /* main.css */                        // app.js
//! @import url("reset.css");             /**
//! @import 'layout/grid.css';             * @depend util/dom.js
//!                                        */
//! body { margin: 0 }                    // @depends events.js
//! ```
//!
//! linkcat finds those directives, locates the referenced files, and produces a
//! single output with every dependency placed before the code that needs it.
//!
//! # Architecture Overview
//!
//! - A [`loader::Loader`] turns paths, strings and streams into content handles
//!   and locates referenced files in an ordered list of search directories.
//! - A [`scanner::DialectScanner`] extracts references line by line and tells
//!   the caller where the directive header ends.
//! - The [`resolver::DependencyResolver`] walks references depth-first, skipping
//!   anything already visited, and returns dependencies before dependents.
//! - A [`resource::Resource`] ties content, dialect and explicitly attached
//!   dependencies together and caches its resolved dependency list.
//! - [`concat`] flattens a resource into text and writes it out.
//!
//! # Example
//!
//! ```rust,no_run
//! use linkcat::concat::ReadOptions;
//! use linkcat::core::Dialect;
//! use linkcat::loader::{Loader, Source};
//! use linkcat::resolver::DependencyResolver;
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let resolver = Arc::new(DependencyResolver::new(Loader::with_current_dir()?));
//! let main = resolver.open(Dialect::Stylesheet, Source::path("main.css"))?;
//!
//! for dependency in main.dependencies(true)? {
//!     println!("{dependency}");
//! }
//! print!("{}", main.read(ReadOptions::flattened())?);
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Flatten a stylesheet
//! linkcat cat main.css -o dist/main.css
//!
//! # List the files a script pulls in
//! linkcat deps -r app.js
//! ```

// Resolution
pub mod concat;
pub mod core;
pub mod loader;
pub mod resolver;
pub mod resource;
pub mod scanner;

// Command line
pub mod cli;
pub mod config;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
