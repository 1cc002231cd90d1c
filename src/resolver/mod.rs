//! Dependency resolution.
//!
//! The resolver reads a resource line by line with its dialect's scanner, turns
//! each extracted reference into a resource through the [`Loader`], and builds an
//! ordered, de-duplicated dependency list.
//!
//! # Ordering
//!
//! In recursive mode a dependency's own dependencies are placed before it, so the
//! list can be concatenated front to back:
//!
//! ```text
//! main.css ──@import──> layout.css ──@import──> grid.css
//!          └─@import──> theme.css
//!
//! recursive:     [grid.css, layout.css, theme.css]
//! non-recursive: [layout.css, theme.css]
//! ```
//!
//! # Cycles and duplicates
//!
//! Each call keeps its own set of visited identities, seeded with the root. A
//! reference to anything already visited is skipped entirely: it is neither
//! traversed again nor listed twice. Two resolutions never share that set.
//!
//! # Traversal
//!
//! Traversal uses an explicit stack instead of recursion, so deep chains cannot
//! exhaust the call stack. A resource's references are all collected in one pass
//! over its content, and the file is closed again before any of them is visited.

pub mod diagnostics;

pub use diagnostics::{DiagnosticSink, NoopSink, TracingSink};

use crate::core::Dialect;
use crate::loader::{Loader, ResourceId, Source};
use crate::resource::Resource;
use crate::scanner::{LineScan, ScanState, decode_line};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;
use std::sync::Arc;
use tracing::{debug, trace};

/// Resolves dependency directives between resources.
///
/// Resources keep a handle to the resolver that created them, so build one and
/// share it through an [`Arc`]:
///
/// ```rust,no_run
/// use linkcat::core::Dialect;
/// use linkcat::loader::{Loader, Source};
/// use linkcat::resolver::{DependencyResolver, TracingSink};
/// use std::sync::Arc;
///
/// # fn example() -> anyhow::Result<()> {
/// let resolver = Arc::new(
///     DependencyResolver::new(Loader::with_current_dir()?).with_diagnostics(Arc::new(TracingSink)),
/// );
/// let main = resolver.open(Dialect::Stylesheet, Source::path("main.css"))?;
/// for dependency in main.dependencies(true)? {
///     println!("{dependency}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct DependencyResolver {
    loader: Loader,
    diagnostics: Arc<dyn DiagnosticSink>,
}

/// One resource whose references are being visited.
struct Frame {
    resource: Resource,
    references: std::vec::IntoIter<String>,
    depth: usize,
}

impl DependencyResolver {
    /// Create a resolver that discards malformed-directive reports.
    #[must_use]
    pub fn new(loader: Loader) -> Self {
        Self {
            loader,
            diagnostics: Arc::new(NoopSink),
        }
    }

    /// Replace the diagnostic sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The loader used to locate references.
    #[must_use]
    pub const fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Create a resource from a source.
    ///
    /// An [`Source::Existing`] resource is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LinkcatError::InvalidInput`] if the source cannot be read.
    pub fn open(self: &Arc<Self>, dialect: Dialect, source: Source) -> Result<Resource> {
        if let Source::Existing(resource) = source {
            return Ok(resource);
        }

        let content = self.loader.content(source)?;
        Ok(Resource::from_content(dialect, content, Arc::clone(self)))
    }

    /// Create an anonymous, empty resource depending on each source in order.
    ///
    /// # Errors
    ///
    /// Fails if any of the sources cannot be opened.
    pub fn bundle(
        self: &Arc<Self>,
        dialect: Dialect,
        sources: impl IntoIterator<Item = Source>,
    ) -> Result<Resource> {
        let mut bundle = self.open(dialect, Source::content(String::new()))?;
        for source in sources {
            bundle.attach(source)?;
        }
        Ok(bundle)
    }

    /// All dependencies of `resource`: scanned ones, then attached ones.
    ///
    /// The scanned part comes from the resource's cache. In recursive mode each
    /// attached resource is preceded by its own recursive dependencies. Nothing is
    /// listed twice and the resource never lists itself.
    ///
    /// # Errors
    ///
    /// Propagates missing references and I/O failures.
    pub fn resolve(self: &Arc<Self>, resource: &Resource, recursive: bool) -> Result<Vec<Resource>> {
        let mut resolved = resource.scanned_dependencies(recursive)?;
        let mut seen: HashSet<ResourceId> = resolved.iter().map(Resource::id).collect();
        seen.insert(resource.id());

        for attached in resource.attached() {
            if recursive {
                for nested in attached.dependencies(true)? {
                    if seen.insert(nested.id()) {
                        resolved.push(nested);
                    }
                }
            }

            if seen.insert(attached.id()) {
                resolved.push(attached.clone());
            }
        }

        Ok(resolved)
    }

    /// Dependencies found by scanning `root`'s content, without attachments or caching.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LinkcatError::MissingReference`] for any reference the
    /// loader cannot locate, and I/O errors for unreadable files.
    pub fn scan(self: &Arc<Self>, root: &Resource, recursive: bool) -> Result<Vec<Resource>> {
        let mut visited: HashSet<ResourceId> = HashSet::from([root.id()]);
        let mut resolved = Vec::new();
        let mut stack = vec![Frame {
            resource: root.clone(),
            references: self.references(root)?.into_iter(),
            depth: 0,
        }];

        loop {
            let Some(frame) = stack.last_mut() else {
                break;
            };

            let Some(reference) = frame.references.next() else {
                match stack.pop() {
                    Some(done) if done.depth > 0 => resolved.push(done.resource),
                    _ => {}
                }
                continue;
            };

            let content = self.loader.resolve_reference(&reference, frame.resource.content())?;
            if !visited.insert(content.id()) {
                debug!("Skipping {} from {}: already included", content, frame.resource);
                continue;
            }

            let depth = frame.depth + 1;
            let dependency = Resource::from_content(frame.resource.dialect(), content, Arc::clone(self));

            if recursive {
                debug!("Descending into {} (depth {})", dependency, depth);
                let references = self.references(&dependency)?;
                stack.push(Frame {
                    resource: dependency,
                    references: references.into_iter(),
                    depth,
                });
            } else {
                resolved.push(dependency);
            }
        }

        Ok(resolved)
    }

    /// Raw references declared in the header of `resource`, in line order.
    ///
    /// Lines that fail to scan are reported to the diagnostic sink and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be opened or read.
    pub fn references(&self, resource: &Resource) -> Result<Vec<String>> {
        let scanner = resource.dialect().scanner();
        let mut reader = resource.content().reader()?;
        let mut state = ScanState::default();
        let mut references = Vec::new();
        let mut line = Vec::new();
        let mut line_number = 0;

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .with_context(|| format!("Failed to read {resource}"))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            match decode_line(&line).and_then(|text| scanner.scan_line(text, &mut state)) {
                Ok(LineScan::Reference(reference)) => {
                    trace!("{}:{} references '{}'", resource, line_number, reference);
                    references.push(reference);
                }
                Ok(LineScan::Stop) => {
                    trace!("{}:{} ends the {} header", resource, line_number, scanner.name());
                    break;
                }
                Ok(LineScan::Nothing) => {}
                Err(error) => self.diagnostics.malformed_directive(
                    &resource.to_string(),
                    line_number,
                    &String::from_utf8_lossy(&line),
                    &error,
                ),
            }
        }

        Ok(references)
    }
}

impl fmt::Debug for DependencyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyResolver").field("loader", &self.loader).finish_non_exhaustive()
    }
}
