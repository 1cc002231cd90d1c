//! Flattening resources into a single text.
//!
//! [`Resource::read`] produces a resource's text, optionally preceded by the text
//! of every dependency in resolution order. [`Resource::export`] writes that text
//! to a [`Sink`], and [`Resource::concat`] wraps it back into a new resource.
//!
//! Output is the byte-for-byte concatenation of each dependency's own content
//! followed by the resource's own content. No separators are inserted. Directive
//! lines are kept unless [`ReadOptions::strip_directives`] is set.
//!
//! ```rust,no_run
//! use linkcat::concat::{ReadOptions, Sink};
//! use linkcat::core::Dialect;
//! use linkcat::loader::{Loader, Source};
//! use linkcat::resolver::DependencyResolver;
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let resolver = Arc::new(DependencyResolver::new(Loader::with_current_dir()?));
//! let app = resolver.open(Dialect::Script, Source::path("app.js"))?;
//! app.export(Sink::Path("dist/app.js".into()), ReadOptions::flattened())?;
//! # Ok(())
//! # }
//! ```

use crate::core::LinkcatError;
use crate::loader::Source;
use crate::resource::Resource;
use crate::scanner::{LineScan, ScanState, decode_line};
use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Controls what [`Resource::read`] includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Prepend the content of every dependency.
    pub inline_dependencies: bool,

    /// Include dependencies of dependencies. Only meaningful with `inline_dependencies`.
    pub recursive: bool,

    /// Drop the lines carrying directives from each resource's own content.
    pub strip_directives: bool,
}

impl ReadOptions {
    /// Own content only.
    #[must_use]
    pub const fn raw() -> Self {
        Self {
            inline_dependencies: false,
            recursive: false,
            strip_directives: false,
        }
    }

    /// Direct dependencies inlined before the own content.
    #[must_use]
    pub const fn inline() -> Self {
        Self {
            inline_dependencies: true,
            recursive: false,
            strip_directives: false,
        }
    }

    /// All transitive dependencies inlined before the own content.
    #[must_use]
    pub const fn flattened() -> Self {
        Self {
            inline_dependencies: true,
            recursive: true,
            strip_directives: false,
        }
    }

    /// Set whether directive lines are stripped.
    #[must_use]
    pub const fn with_strip_directives(mut self, strip_directives: bool) -> Self {
        self.strip_directives = strip_directives;
        self
    }

    /// Options used to read each entry of an already resolved dependency list.
    const fn for_dependency(self) -> Self {
        Self::raw().with_strip_directives(self.strip_directives)
    }
}

/// Where [`Resource::export`] writes to.
pub enum Sink<'a> {
    /// A file, created if missing and replaced otherwise.
    Path(PathBuf),

    /// Any writer, such as standard output.
    Writer(&'a mut dyn Write),

    /// An in-memory buffer; text is appended.
    Buffer(&'a mut String),
}

impl fmt::Display for Sink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Writer(_) => f.write_str("<stream>"),
            Self::Buffer(_) => f.write_str("<buffer>"),
        }
    }
}

impl Resource {
    /// The resource's text, with dependencies inlined if requested.
    ///
    /// # Errors
    ///
    /// Fails if dependencies cannot be resolved or content cannot be read.
    pub fn read(&self, options: ReadOptions) -> Result<String> {
        let mut contents = String::new();

        if options.inline_dependencies {
            for dependency in self.dependencies(options.recursive)? {
                contents.push_str(&dependency.read(options.for_dependency())?);
            }
        }

        contents.push_str(&self.own_content(options.strip_directives)?);
        Ok(contents)
    }

    /// Write [`Resource::read`] output to `sink`.
    ///
    /// # Errors
    ///
    /// Resolution errors are returned as they are. Failing to write the sink is
    /// reported as [`LinkcatError::InvalidInput`] naming the target.
    pub fn export(&self, sink: Sink<'_>, options: ReadOptions) -> Result<()> {
        let contents = self.read(options)?;
        let target = sink.to_string();

        write_sink(sink, &contents).map_err(|err| {
            anyhow::Error::from(LinkcatError::InvalidInput {
                message: format!("Invalid output target, {target}: {err:#}"),
            })
        })
    }

    /// A new in-memory resource of the same dialect holding the flattened text.
    ///
    /// Dependencies are always inlined recursively; only
    /// [`ReadOptions::strip_directives`] is taken from `options`.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::read`].
    pub fn concat(&self, options: ReadOptions) -> Result<Resource> {
        let flattened = self.read(ReadOptions::flattened().with_strip_directives(options.strip_directives))?;
        self.resolver().open(self.dialect(), Source::content(flattened))
    }

    fn own_content(&self, strip_directives: bool) -> Result<String> {
        if !strip_directives {
            return self.content().read_to_string();
        }

        let scanner = self.dialect().scanner();
        let mut reader = self.content().reader()?;
        let mut state = ScanState::default();
        let mut scanning = true;
        let mut output = Vec::new();
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).with_context(|| format!("Failed to read {self}"))? == 0 {
                break;
            }

            if scanning {
                let opened_in_comment = state.in_block_comment;
                match decode_line(&line).and_then(|text| scanner.scan_line(text, &mut state)) {
                    // A line that opens or closes a comment stays, or the comment would break.
                    Ok(LineScan::Reference(reference)) if state.in_block_comment == opened_in_comment => {
                        debug!("Stripping directive for '{}' from {}", reference, self);
                        continue;
                    }
                    Ok(LineScan::Stop) => scanning = false,
                    _ => {}
                }
            }

            output.extend_from_slice(&line);
        }

        String::from_utf8(output).with_context(|| format!("{self} is not valid UTF-8"))
    }
}

fn write_sink(sink: Sink<'_>, contents: &str) -> Result<()> {
    match sink {
        Sink::Path(path) => write_file(&path, contents),
        Sink::Writer(writer) => {
            writer.write_all(contents.as_bytes()).context("Failed to write output")?;
            writer.flush().context("Failed to flush output")
        }
        Sink::Buffer(buffer) => {
            buffer.push_str(contents);
            Ok(())
        }
    }
}

/// Replace `path` through a sibling temporary file and a rename.
///
/// A symlinked target is followed. An existing target keeps its permissions.
fn write_file(path: &Path, contents: &str) -> Result<()> {
    if path.is_dir() {
        anyhow::bail!("{} is a directory", path.display());
    }

    let target = if path.exists() {
        fs::canonicalize(path).with_context(|| format!("Failed to resolve {}", path.display()))?
    } else {
        path.to_path_buf()
    };
    let name = target
        .file_name()
        .with_context(|| format!("{} has no file name", path.display()))?;
    let temp_path = target.with_file_name(format!(".{}.linkcat-tmp", name.to_string_lossy()));

    let written = write_temp(&temp_path, &target, contents).and_then(|()| {
        fs::rename(&temp_path, &target)
            .with_context(|| format!("Failed to rename temp file to {}", target.display()))
    });
    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written?;

    debug!("Wrote {} bytes to {}", contents.len(), target.display());
    Ok(())
}

fn write_temp(temp_path: &Path, target: &Path, contents: &str) -> Result<()> {
    let mut file = fs::File::create(temp_path)
        .with_context(|| format!("Failed to create temp file {}", temp_path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write temp file {}", temp_path.display()))?;
    file.sync_all().context("Failed to sync file to disk")?;

    if let Ok(metadata) = fs::metadata(target) {
        fs::set_permissions(temp_path, metadata.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", target.display()))?;
    }
    Ok(())
}
