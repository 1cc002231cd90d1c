//! List the dependencies of input files.

use super::common::InputArgs;
use crate::config::{Config, Environment};
use crate::loader::UNSAVED;
use crate::resource::Resource;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::Write;

/// Output format for `deps`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One path per line
    #[default]
    Text,
    /// A JSON array
    Json,
}

/// Print dependencies in the order they would be concatenated.
#[derive(Args, Debug)]
pub struct DepsCommand {
    #[command(flatten)]
    input: InputArgs,

    /// Include dependencies of dependencies
    #[arg(short, long)]
    recursive: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct DependencyEntry {
    path: Option<String>,
    anonymous: bool,
}

impl From<&Resource> for DependencyEntry {
    fn from(resource: &Resource) -> Self {
        let path = resource.path().map(|path| path.display().to_string());
        Self {
            anonymous: path.is_none(),
            path,
        }
    }
}

impl DepsCommand {
    /// Print the resolved dependencies of the inputs in the requested format.
    pub fn execute(self, settings: &Config, environment: &Environment) -> Result<()> {
        let resolver = self.input.resolver(settings, environment)?;
        let resource = self.input.open(&resolver)?;
        let dependencies = resource.dependencies(self.recursive)?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_dependencies(&mut handle, &dependencies, self.format)
    }
}

fn write_dependencies(out: &mut dyn Write, dependencies: &[Resource], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for dependency in dependencies {
                let line = dependency.path().map_or_else(|| UNSAVED.to_string(), |path| path.display().to_string());
                writeln!(out, "{line}").context("Failed to write output")?;
            }
        }
        OutputFormat::Json => {
            let entries: Vec<DependencyEntry> = dependencies.iter().map(DependencyEntry::from).collect();
            let json = serde_json::to_string_pretty(&entries).context("Failed to serialize dependencies")?;
            writeln!(out, "{json}").context("Failed to write output")?;
        }
    }

    Ok(())
}
