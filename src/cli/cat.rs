//! Concatenate input files with their dependencies.

use super::common::InputArgs;
use crate::concat::{ReadOptions, Sink};
use crate::config::{Config, Environment};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Resolve dependencies and write one flattened file.
#[derive(Args, Debug)]
pub struct CatCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Write to this file instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Only inline direct dependencies
    #[arg(long)]
    shallow: bool,

    /// Leave @import / @depend lines out of the output
    #[arg(long)]
    strip_directives: bool,
}

impl CatCommand {
    /// Options for this invocation; flags override the config file.
    fn read_options(&self, settings: &Config) -> ReadOptions {
        ReadOptions {
            inline_dependencies: true,
            recursive: settings.recursive && !self.shallow,
            strip_directives: settings.strip_directives || self.strip_directives,
        }
    }

    /// Concatenate the inputs and write the result to `--output` or stdout.
    pub fn execute(self, settings: &Config, environment: &Environment) -> Result<()> {
        let resolver = self.input.resolver(settings, environment)?;
        let resource = self.input.open(&resolver)?;
        let options = self.read_options(settings);

        match self.output {
            Some(path) => {
                resource.export(Sink::Path(path.clone()), options)?;
                info!("Wrote {}", path.display());
            }
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                resource.export(Sink::Writer(&mut handle), options)?;
            }
        }

        Ok(())
    }
}
