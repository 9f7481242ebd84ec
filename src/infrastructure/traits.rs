//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Binding, Filters, Layer};
use crate::infrastructure::sparql;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Producer of already-fetched bindings.
///
/// One call, one finite sequence: no paging and no retries.
pub trait BindingSource: Send + Sync {
    /// Bindings matching `filters`, in source order.
    fn fetch(&self, filters: &Filters) -> ApplicationResult<Vec<Binding>>;
}

/// Equality constraints of `filters` against the binding's layer fields.
///
/// A binding without a value for a filtered layer does not match.
pub fn matches_filters(binding: &Binding, filters: &Filters) -> bool {
    Layer::ORDER.iter().all(|&layer| match filters.get(layer) {
        Some(wanted) => layer.field(binding) == Some(wanted),
        None => true,
    })
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Bindings read from a SPARQL JSON results file and filtered in memory.
pub struct SparqlResultsFile {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl SparqlResultsFile {
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }
}

impl BindingSource for SparqlResultsFile {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn fetch(&self, filters: &Filters) -> ApplicationResult<Vec<Binding>> {
        if !self.fs.exists(&self.path) {
            return Err(ApplicationError::SourceNotFound(self.path.clone()));
        }
        let content = self
            .fs
            .read_to_string(&self.path)
            .with_path_context("read results", &self.path)?;
        let bindings = sparql::decode_results(&content)?;
        let total = bindings.len();
        let selected: Vec<Binding> = bindings
            .into_iter()
            .filter(|b| matches_filters(b, filters))
            .collect();
        debug!(total, selected = selected.len(), "fetched bindings");
        Ok(selected)
    }
}

/// Fixed bindings, filtered like a results file.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    bindings: Vec<Binding>,
}

impl InMemorySource {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self { bindings }
    }
}

impl BindingSource for InMemorySource {
    fn fetch(&self, filters: &Filters) -> ApplicationResult<Vec<Binding>> {
        Ok(self
            .bindings
            .iter()
            .filter(|b| matches_filters(b, filters))
            .cloned()
            .collect())
    }
}
