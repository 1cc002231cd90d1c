//! Resources: named or anonymous units of text linked by directives.
//!
//! A [`Resource`] wraps a content handle, the dialect used to scan it, and the
//! dependencies a caller attached explicitly. Dependencies declared inside the
//! content are discovered lazily by the [`DependencyResolver`] that created the
//! resource.
//!
//! # Identity
//!
//! Two resources are equal when they point at the same file (by canonical path)
//! or share the same in-memory handle. Text is never compared:
//!
//! ```rust,no_run
//! use linkcat::core::Dialect;
//! use linkcat::loader::{Loader, Source};
//! use linkcat::resolver::DependencyResolver;
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let resolver = Arc::new(DependencyResolver::new(Loader::default()));
//! let a = resolver.open(Dialect::Script, Source::content("var a;"))?;
//! let b = resolver.open(Dialect::Script, Source::content("var a;"))?;
//! assert_ne!(a, b);
//! assert_eq!(a, a.clone());
//! # Ok(())
//! # }
//! ```
//!
//! # Caching
//!
//! The scanned dependencies are computed once per instance and per traversal mode
//! (direct or recursive) and never invalidated. Attached dependencies are not part
//! of that cache, so [`Resource::attach`] never causes a re-scan and is always
//! reflected by the next [`Resource::dependencies`] call.

use crate::core::Dialect;
use crate::loader::{Content, ResourceId, Source};
use crate::resolver::DependencyResolver;
use anyhow::Result;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// A stylesheet or script together with its dependencies.
#[derive(Clone)]
pub struct Resource {
    dialect: Dialect,
    content: Content,
    attached: Vec<Resource>,
    resolver: Arc<DependencyResolver>,
    direct: OnceLock<Vec<Resource>>,
    transitive: OnceLock<Vec<Resource>>,
}

impl Resource {
    pub(crate) fn from_content(
        dialect: Dialect,
        content: Content,
        resolver: Arc<DependencyResolver>,
    ) -> Self {
        Self {
            dialect,
            content,
            attached: Vec::new(),
            resolver,
            direct: OnceLock::new(),
            transitive: OnceLock::new(),
        }
    }

    /// The dialect used to scan this resource.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The underlying content handle.
    #[must_use]
    pub const fn content(&self) -> &Content {
        &self.content
    }

    /// Identity used for equality and cycle detection.
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.content.id()
    }

    /// Canonical path of the backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.content.path()
    }

    /// The resolver this resource resolves its dependencies with.
    #[must_use]
    pub const fn resolver(&self) -> &Arc<DependencyResolver> {
        &self.resolver
    }

    /// Explicitly attached dependencies, in attachment order.
    #[must_use]
    pub fn attached(&self) -> &[Resource] {
        &self.attached
    }

    /// Attach a dependency that is not declared in the content.
    ///
    /// The source is opened with this resource's dialect. Scanned dependencies are
    /// not recomputed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::core::LinkcatError::InvalidInput`] if the source cannot be opened.
    pub fn attach(&mut self, source: Source) -> Result<()> {
        let dependency = self.resolver.open(self.dialect, source)?;
        self.attached.push(dependency);
        Ok(())
    }

    /// Scanned dependencies followed by attached ones.
    ///
    /// With `recursive` the dependencies of dependencies are included, each placed
    /// before the resource that needs it.
    ///
    /// # Errors
    ///
    /// Fails if a reference cannot be located or a file cannot be read.
    pub fn dependencies(&self, recursive: bool) -> Result<Vec<Resource>> {
        self.resolver.resolve(self, recursive)
    }

    /// [`Resource::dependencies`] followed by this resource itself.
    ///
    /// # Errors
    ///
    /// Same as [`Resource::dependencies`].
    pub fn resources(&self, recursive: bool) -> Result<Vec<Resource>> {
        let mut resources = self.dependencies(recursive)?;
        resources.push(self.clone());
        Ok(resources)
    }

    /// Dependencies declared in the content, cached per traversal mode.
    pub(crate) fn scanned_dependencies(&self, recursive: bool) -> Result<Vec<Resource>> {
        let cache = if recursive { &self.transitive } else { &self.direct };

        if let Some(cached) = cache.get() {
            return Ok(cached.clone());
        }

        let scanned = self.resolver.scan(self, recursive)?;
        Ok(cache.get_or_init(|| scanned).clone())
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Resource {}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("dialect", &self.dialect)
            .field("content", &format_args!("{}", self.content))
            .field("attached", &self.attached.len())
            .finish_non_exhaustive()
    }
}
