//! Command-line interface for linkcat.
//!
//! # Available Commands
//!
//! - `cat` (alias `concat`) - Resolve dependencies and write the concatenated result
//! - `deps` - Print the resolved dependency list
//!
//! # Global Options
//!
//! - `--verbose` - Log progress information
//! - `--debug` - Log every resolution step
//! - `--silent` - Only log errors
//! - `--config` - Path to a config file
//!
//! Logging goes to stderr so it never mixes with concatenated output. `RUST_LOG`
//! takes precedence over the flags.
//!
//! # Example
//!
//! ```bash
//! # Flatten a stylesheet and everything it imports
//! linkcat cat site/main.css -o dist/site.css
//!
//! # Two scripts, their dependencies first, with shared packages in vendor/
//! linkcat cat -I vendor app.js admin.js > bundle.js
//!
//! # What would be included?
//! linkcat deps --recursive site/main.css
//! ```

mod cat;
pub mod common;
mod deps;

use crate::config::{Config, Environment};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Runtime configuration derived from the global flags.
///
/// Tests build this directly to run commands without touching process-wide state.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    /// Config file given on the command line.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with no logging and the default config location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolve in-source dependencies of stylesheets and scripts.
#[derive(Parser, Debug)]
#[command(
    name = "linkcat",
    about = "Resolve @import and @depend directives and concatenate stylesheets and scripts",
    version,
    long_about = "linkcat follows the dependency directives at the top of CSS and JavaScript files \
                  and writes a single file with every dependency placed before the code that needs it."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Be more informative
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log debug information
    #[arg(long, global = true)]
    debug: bool,

    /// Only log errors
    #[arg(short = 'q', long, global = true)]
    silent: bool,

    /// Path to a config file (default: ~/.linkcat/config.toml)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Concatenate files with their dependencies
    #[command(visible_alias = "concat")]
    Cat(cat::CatCommand),

    /// List the dependencies of files
    Deps(deps::DepsCommand),
}

impl Cli {
    /// Install logging from the global flags and run the command.
    ///
    /// # Errors
    ///
    /// Returns whatever the command fails with.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(config.log_level.as_deref());
        self.execute_with_config(config)
    }

    /// Map the global flags to a [`CliConfig`].
    ///
    /// `--silent` wins over `--debug`, which wins over `--verbose`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let level = if self.silent {
            "error"
        } else if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Run the command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration cannot be loaded or the command fails.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let environment = Environment::from_env()?;
        let settings = Config::load_with_optional(config.config_path, &environment)?;
        debug!("Running with {:?}", settings);

        match self.command {
            Commands::Cat(cmd) => cmd.execute(&settings, &environment),
            Commands::Deps(cmd) => cmd.execute(&settings, &environment),
        }
    }
}

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` is used when set; otherwise `level`. Nothing is installed when
/// both are absent, and a second call is a no-op.
pub fn init_logging(level: Option<&str>) {
    let filter = match (EnvFilter::try_from_default_env(), level) {
        (Ok(filter), _) => filter,
        (Err(_), Some(level)) => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
        (Err(_), None) => return,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
