//! Configuration for linkcat.
//!
//! Settings come from an optional TOML file. The file is taken from `--config`,
//! then the `LINKCAT_CONFIG` environment variable, then `<home>/config.toml`:
//!
//! ```toml
//! # Extra directories searched for referenced files
//! search_paths = ["~/src/shared/css", "$VENDOR/js"]
//!
//! # `cat` follows dependencies of dependencies
//! recursive = true
//!
//! # Drop @import / @depend lines from the output
//! strip_directives = false
//! ```
//!
//! A missing file at the default location means defaults. A file named
//! explicitly must exist.
//!
//! # Search order
//!
//! [`Config::search_paths`] builds the directories a reference is looked up in,
//! after the referencing file's own directory:
//!
//! 1. the current working directory
//! 2. `--include` directories, in the order given
//! 3. `search_paths` from the config file
//! 4. every `lib` directory under `<home>/packages/<env>/`

pub mod environment;

pub use environment::{DEFAULT_ENV, ENV_ENV, Environment, HOME_ENV};

use crate::core::LinkcatError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Names a config file to use instead of `<home>/config.toml`.
pub const CONFIG_ENV: &str = "LINKCAT_CONFIG";

const fn default_recursive() -> bool {
    true
}

/// Contents of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Extra base directories. `~` and environment variables are expanded.
    #[serde(default)]
    pub search_paths: Vec<String>,

    /// Default traversal mode for `cat`.
    #[serde(default = "default_recursive")]
    pub recursive: bool,

    /// Strip directive lines from concatenated output.
    #[serde(default)]
    pub strip_directives: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            recursive: default_recursive(),
            strip_directives: false,
        }
    }
}

impl Config {
    /// Load from `path` if given, else from `LINKCAT_CONFIG`, else from the environment's default location.
    ///
    /// # Errors
    ///
    /// Returns [`LinkcatError::ConfigError`] if an explicitly named file is missing
    /// or any file cannot be parsed.
    pub fn load_with_optional(path: Option<PathBuf>, environment: &Environment) -> Result<Self> {
        let explicit = path.or_else(|| {
            std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()).map(PathBuf::from)
        });

        match explicit {
            Some(path) if !path.is_file() => Err(LinkcatError::ConfigError {
                message: format!("Config file {} does not exist", path.display()),
            }
            .into()),
            Some(path) => Self::load_from(&path),
            None => {
                let path = environment.config_path();
                if path.is_file() {
                    Self::load_from(&path)
                } else {
                    debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and parse a specific file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read. Invalid TOML or unknown keys are
    /// [`LinkcatError::ConfigError`].
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|err| LinkcatError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), err.message()),
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The configured `search_paths`, expanded and made absolute against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkcatError::ConfigError`] if an entry names an unset variable.
    pub fn expanded_search_paths(&self, cwd: &Path) -> Result<Vec<PathBuf>> {
        self.search_paths
            .iter()
            .map(|entry| {
                let expanded = shellexpand::full(entry).map_err(|err| LinkcatError::ConfigError {
                    message: format!("Cannot expand search path '{entry}': {err}"),
                })?;
                Ok(cwd.join(&*expanded))
            })
            .collect()
    }

    /// Every base directory for reference lookup, in order, without duplicates.
    ///
    /// # Errors
    ///
    /// Fails if a configured entry cannot be expanded or the package directories
    /// cannot be listed.
    pub fn search_paths(
        &self,
        cwd: &Path,
        includes: &[PathBuf],
        environment: &Environment,
    ) -> Result<Vec<PathBuf>> {
        let mut paths = vec![cwd.to_path_buf()];
        paths.extend(includes.iter().map(|include| cwd.join(include)));
        paths.extend(self.expanded_search_paths(cwd)?);
        paths.extend(environment.package_lib_dirs()?);

        let mut unique: Vec<PathBuf> = Vec::with_capacity(paths.len());
        for path in paths {
            if !unique.contains(&path) {
                unique.push(path);
            }
        }

        Ok(unique)
    }
}
