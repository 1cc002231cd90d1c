//! Integration test suite for linkcat
//!
//! End-to-end tests that drive the `linkcat` binary, plus library-level checks
//! of resolution properties that span several modules.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cat**: Concatenation output, inputs, and failures
//! - **config**: Config file, package directories, and environment selection
//! - **deps**: Dependency listing in text and JSON
//! - **resolution**: Ordering, cycles, duplicates, and caching through the library API

use assert_cmd::Command;
use linkcat::test_utils::TestProject;

mod cat;
mod config;
mod deps;
mod resolution;

/// The binary, run inside the project with an isolated home directory.
pub fn linkcat(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("linkcat").unwrap();
    cmd.current_dir(&project.project_dir)
        .env("LINKCAT_HOME", &project.home_dir)
        .env_remove("LINKCAT_ENV")
        .env_remove("LINKCAT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}
