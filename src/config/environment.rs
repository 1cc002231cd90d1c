//! The linkcat home directory and package environment.
//!
//! Shared packages live under `<home>/packages/<env>/`. Every `lib` directory
//! found below that root is added to the search paths, so a package can be
//! referenced by name from any project:
//!
//! ```text
//! ~/.linkcat/
//! ├── config.toml
//! └── packages/
//!     └── default/
//!         ├── reset/1.0/lib/reset.css
//!         └── widgets/lib/widgets.js
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Overrides the home directory.
pub const HOME_ENV: &str = "LINKCAT_HOME";

/// Selects the package environment.
pub const ENV_ENV: &str = "LINKCAT_ENV";

/// Package environment used when none is selected.
pub const DEFAULT_ENV: &str = "default";

/// Where linkcat keeps its configuration and packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    home: PathBuf,
    env: String,
}

impl Environment {
    /// Create an environment with an explicit home and package environment.
    pub fn new(home: impl Into<PathBuf>, env: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            env: env.into(),
        }
    }

    /// Read `LINKCAT_HOME` and `LINKCAT_ENV`, falling back to `~/.linkcat` and `default`.
    ///
    /// # Errors
    ///
    /// Returns an error if `LINKCAT_HOME` is unset and the home directory cannot be determined.
    pub fn from_env() -> Result<Self> {
        let home = match std::env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            Some(home) => PathBuf::from(home),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".linkcat"),
        };

        let env = std::env::var(ENV_ENV)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENV.to_string());

        debug!("Using home {} with package environment '{}'", home.display(), env);
        Ok(Self::new(home, env))
    }

    /// The home directory.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The package environment name.
    #[must_use]
    pub fn env(&self) -> &str {
        &self.env
    }

    /// `<home>/config.toml`.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// `<home>/packages/<env>`.
    #[must_use]
    pub fn packages_dir(&self) -> PathBuf {
        self.home.join("packages").join(&self.env)
    }

    /// Every `lib` directory below [`Environment::packages_dir`], sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the glob pattern cannot be built from the packages path.
    pub fn package_lib_dirs(&self) -> Result<Vec<PathBuf>> {
        let root = self.packages_dir();
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let pattern = format!("{}/**/lib", glob::Pattern::escape(&root.to_string_lossy()));
        let mut dirs: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("Invalid package pattern: {pattern}"))?
            .filter_map(Result::ok)
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        debug!("Found {} package lib dirs under {}", dirs.len(), root.display());
        Ok(dirs)
    }
}
