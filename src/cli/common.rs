//! Arguments shared by the commands that read input files.

use crate::config::{Config, Environment};
use crate::core::{Dialect, LinkcatError};
use crate::loader::{Loader, Source};
use crate::resolver::{DependencyResolver, TracingSink};
use crate::resource::Resource;
use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Input files, their dialect, and extra search directories.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input files (reads standard input when none are given)
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Dialect of the input: css or js (default: from the first file's extension)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub dialect: Option<Dialect>,

    /// Additional directory to look up referenced files in (repeatable)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub includes: Vec<PathBuf>,
}

impl InputArgs {
    /// The dialect given with `--type`, else guessed from the first file, else stylesheet.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
            .or_else(|| self.files.first().and_then(|file| Dialect::from_path(file)))
            .unwrap_or(Dialect::Stylesheet)
    }

    /// Build a resolver searching the working directory, includes, config paths and packages.
    ///
    /// # Errors
    ///
    /// Fails if the working directory is unavailable or the search paths cannot be built.
    pub fn resolver(&self, config: &Config, environment: &Environment) -> Result<Arc<DependencyResolver>> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let search_paths = config.search_paths(&cwd, &self.includes, environment)?;
        debug!("Search paths: {:?}", search_paths);

        Ok(Arc::new(
            DependencyResolver::new(Loader::new(search_paths)).with_diagnostics(Arc::new(TracingSink)),
        ))
    }

    /// Open the inputs as a single resource.
    ///
    /// No files means standard input; several files are bundled in order.
    ///
    /// # Errors
    ///
    /// Returns [`LinkcatError::InvalidInput`] if an input file does not exist.
    pub fn open(&self, resolver: &Arc<DependencyResolver>) -> Result<Resource> {
        let dialect = self.dialect();

        for file in &self.files {
            check_input(file)?;
        }

        match self.files.as_slice() {
            [] => {
                info!("Reading {} from standard input", dialect);
                resolver.open(dialect, Source::stream(std::io::stdin()))
            }
            [file] => resolver.open(dialect, Source::path(file)),
            files => {
                info!("Bundling {} {} files", files.len(), dialect);
                resolver.bundle(dialect, files.iter().map(Source::path))
            }
        }
    }
}

fn check_input(file: &Path) -> Result<()> {
    if file.is_file() {
        return Ok(());
    }

    Err(LinkcatError::InvalidInput {
        message: format!("Input file {} does not exist", file.display()),
    }
    .into())
}
