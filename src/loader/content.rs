//! Content handles and resource identity.

use anyhow::{Context, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Display name used for resources that are not backed by a file.
pub const UNSAVED: &str = "[unsaved]";

/// The readable, rewindable text behind a resource.
///
/// File content is re-opened for every read and closed when the reader is
/// dropped. In-memory content (raw strings and drained streams) is shared between
/// clones, which all carry the same handle.
#[derive(Debug, Clone)]
pub enum Content {
    /// A file on disk, stored as a canonical absolute path.
    File(PathBuf),

    /// Text held in memory.
    Memory {
        /// Unique handle, shared by clones of this content
        handle: u64,
        /// The text itself
        text: Arc<str>,
    },
}

/// The key used for resource equality and cycle detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// Canonical path of a file-backed resource.
    Path(PathBuf),

    /// Handle of in-memory content.
    Handle(u64),
}

impl Content {
    /// Wrap text in a new in-memory handle.
    ///
    /// Two calls with identical text produce two distinct identities.
    pub fn memory(text: impl Into<Arc<str>>) -> Self {
        Self::Memory {
            handle: NEXT_HANDLE.fetch_add(1, Ordering::Relaxed),
            text: text.into(),
        }
    }

    /// Wrap an existing file, canonicalizing its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be canonicalized.
    pub fn file(path: &Path) -> Result<Self> {
        let canonical = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
        Ok(Self::File(canonical))
    }

    /// Identity of this content.
    #[must_use]
    pub fn id(&self) -> ResourceId {
        match self {
            Self::File(path) => ResourceId::Path(path.clone()),
            Self::Memory { handle, .. } => ResourceId::Handle(*handle),
        }
    }

    /// Canonical path, if file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Memory { .. } => None,
        }
    }

    /// Directory containing the file, if file-backed.
    #[must_use]
    pub fn base_dir(&self) -> Option<&Path> {
        self.path().and_then(Path::parent)
    }

    /// Open a reader positioned at the start of the content.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be opened.
    pub fn reader(&self) -> Result<Box<dyn BufRead + '_>> {
        match self {
            Self::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
            Self::Memory { text, .. } => Ok(Box::new(Cursor::new(text.as_bytes()))),
        }
    }

    /// Read the whole content as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        match self {
            Self::File(path) => {
                let mut text = String::new();
                self.reader()?
                    .read_to_string(&mut text)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(text)
            }
            Self::Memory { text, .. } => Ok(text.to_string()),
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Content {}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory { .. } => f.write_str(UNSAVED),
        }
    }
}
