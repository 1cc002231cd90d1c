//! Temporary project directories for tests.

use crate::loader::Loader;
use crate::resolver::DependencyResolver;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary project with its own linkcat home.
///
/// ```text
/// <tmp>/
/// ├── project/   files under test
/// └── home/      LINKCAT_HOME (config.toml, packages/)
/// ```
pub struct TestProject {
    pub temp_dir: TempDir,
    pub project_dir: PathBuf,
    pub home_dir: PathBuf,
}

impl TestProject {
    /// Create empty project and home directories.
    pub fn new() -> Result<Self> {
        super::init_test_logging(None);

        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("project");
        let home_dir = temp_dir.path().join("home");

        fs::create_dir_all(&project_dir)?;
        fs::create_dir_all(&home_dir)?;

        Ok(Self {
            temp_dir,
            project_dir,
            home_dir,
        })
    }

    /// Write a file below the project directory, creating parent directories.
    pub fn write(&self, relative: impl AsRef<Path>, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        write_below(&self.project_dir, relative.as_ref(), content.as_ref())
    }

    /// Write a file into a package under `home/packages/<env>/<package>/lib/`.
    pub fn write_package(&self, env: &str, package: &str, file: &str, content: &str) -> Result<PathBuf> {
        let relative = Path::new("packages").join(env).join(package).join("lib").join(file);
        write_below(&self.home_dir, &relative, content.as_bytes())
    }

    /// Write `home/config.toml`.
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        write_below(&self.home_dir, Path::new("config.toml"), content.as_bytes())
    }

    /// Absolute path of a project file.
    #[must_use]
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.project_dir.join(relative)
    }

    /// Canonical path of a project file, as reported for resolved resources.
    pub fn canonical(&self, relative: impl AsRef<Path>) -> Result<PathBuf> {
        let path = self.path(relative);
        path.canonicalize().with_context(|| format!("Failed to canonicalize {}", path.display()))
    }

    /// Read a project file.
    pub fn read(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.path(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// A resolver searching only the project directory.
    #[must_use]
    pub fn resolver(&self) -> Arc<DependencyResolver> {
        Arc::new(DependencyResolver::new(Loader::new(vec![self.project_dir.clone()])))
    }
}

fn write_below(root: &Path, relative: &Path, content: &[u8]) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
