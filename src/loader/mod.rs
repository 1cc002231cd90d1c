//! Resource loading.
//!
//! The loader turns the different things a caller can hand us (an existing
//! resource, a file path, a raw string, an open stream) into a [`Content`]
//! handle, and resolves dependency references found in source text against an
//! ordered list of base directories.
//!
//! # Search order
//!
//! A reference found inside a file is looked up first relative to that file's
//! directory, then in each configured search path in order. The first regular
//! file that exists wins.
//!
//! ```rust,no_run
//! use linkcat::loader::{Content, Loader};
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let loader = Loader::new(vec![PathBuf::from("vendor/css")]);
//! let referrer = Content::file("site/main.css".as_ref())?;
//! let reset = loader.resolve_reference("reset.css", &referrer)?;
//! println!("{reset}");
//! # Ok(())
//! # }
//! ```

pub mod content;

pub use content::{Content, ResourceId, UNSAVED};

use crate::core::LinkcatError;
use crate::resource::Resource;
use anyhow::{Context, Result};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Anything a resource can be created from.
pub enum Source {
    /// An existing resource; its content handle is reused as is.
    Existing(Resource),

    /// A file name, looked up relative to the working directory or the search paths.
    Path(PathBuf),

    /// Raw text.
    Content(String),

    /// An open stream, drained once into memory.
    Stream(Box<dyn Read>),
}

impl Source {
    /// A file path source.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// A raw content source.
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content(text.into())
    }

    /// A stream source.
    pub fn stream(reader: impl Read + 'static) -> Self {
        Self::Stream(Box::new(reader))
    }
}

impl From<Resource> for Source {
    fn from(resource: Resource) -> Self {
        Self::Existing(resource)
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(resource) => f.debug_tuple("Existing").field(resource).finish(),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Content(text) => f.debug_tuple("Content").field(&text.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Locates and opens resource content.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    search_paths: Vec<PathBuf>,
}

impl Loader {
    /// Create a loader searching the given directories, in order.
    #[must_use]
    pub const fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
        }
    }

    /// Create a loader whose only search path is the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn with_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Ok(Self::new(vec![cwd]))
    }

    /// The configured search paths.
    #[must_use]
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Candidate base directories for a reference, in lookup order.
    #[must_use]
    pub fn candidates(&self, base_dir: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = Vec::with_capacity(self.search_paths.len() + 1);

        for dir in base_dir.into_iter().chain(self.search_paths.iter().map(PathBuf::as_path)) {
            if !candidates.iter().any(|existing| existing == dir) {
                candidates.push(dir.to_path_buf());
            }
        }

        candidates
    }

    /// Find `name` in the candidate directories.
    ///
    /// Absolute names are checked as-is. Returns the first existing regular file.
    #[must_use]
    pub fn locate(&self, name: &Path, base_dir: Option<&Path>) -> Option<PathBuf> {
        if name.is_absolute() {
            return name.is_file().then(|| name.to_path_buf());
        }

        self.candidates(base_dir).into_iter().map(|dir| dir.join(name)).find(|path| {
            trace!("Trying {}", path.display());
            path.is_file()
        })
    }

    /// Resolve a dependency reference found in `referrer`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkcatError::MissingReference`] if no candidate directory holds
    /// the referenced file.
    pub fn resolve_reference(&self, reference: &str, referrer: &Content) -> Result<Content> {
        let base_dir = referrer.base_dir();

        match self.locate(Path::new(reference), base_dir) {
            Some(path) => {
                debug!("Resolved '{}' from {} to {}", reference, referrer, path.display());
                Content::file(&path)
            }
            None => Err(LinkcatError::MissingReference {
                reference: reference.to_string(),
                referrer: referrer.to_string(),
                searched: self
                    .candidates(base_dir)
                    .iter()
                    .map(|dir| dir.display().to_string())
                    .collect(),
            }
            .into()),
        }
    }

    /// Turn a caller-supplied source into content.
    ///
    /// # Errors
    ///
    /// Returns [`LinkcatError::InvalidInput`] for paths that do not name an existing
    /// file, and for streams that fail to read or do not hold UTF-8 text.
    pub fn content(&self, source: Source) -> Result<Content> {
        match source {
            Source::Existing(resource) => Ok(resource.content().clone()),
            Source::Path(path) => {
                let found = if path.is_file() { Some(path.clone()) } else { self.locate(&path, None) };

                match found {
                    Some(found) => Content::file(&found),
                    None if path.is_dir() => Err(LinkcatError::InvalidInput {
                        message: format!("{} is a directory, not a file", path.display()),
                    }
                    .into()),
                    None => Err(LinkcatError::InvalidInput {
                        message: format!("Input file {} does not exist", path.display()),
                    }
                    .into()),
                }
            }
            Source::Content(text) => Ok(Content::memory(text)),
            Source::Stream(mut reader) => {
                let mut text = String::new();
                reader.read_to_string(&mut text).map_err(|err| LinkcatError::InvalidInput {
                    message: format!("Failed to read stream: {err}"),
                })?;
                Ok(Content::memory(text))
            }
        }
    }
}
