//! Content lookup over a mirrored site
//!
//! A read-only view of a persisted site map that a serving process can call
//! into: list every page, read a page's Markdown or HTML, and search by
//! title/description. The serving protocol itself lives outside this crate.

mod search;

pub use search::{search, Relevance, SearchHit};

use crate::config::OutputConfig;
use crate::storage::{JsonSiteMapStore, PageRecord, SiteMap, SiteMapStore};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors surfaced to lookup callers
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Page not found: {id} ({reason})")]
    NotFound { id: String, reason: String },
}

impl LookupError {
    fn not_found(id: &str, reason: impl Into<String>) -> Self {
        LookupError::NotFound {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for lookup operations
pub type LookupResult<T> = Result<T, LookupError>;

/// Listing entry for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&PageRecord> for PageSummary {
    fn from(record: &PageRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
        }
    }
}

/// Read-only lookup service over a loaded site map
///
/// File locations in records are resolved against `root`.
#[derive(Debug, Clone)]
pub struct ContentLookup {
    site_map: SiteMap,
    root: PathBuf,
    store: Option<JsonSiteMapStore>,
}

impl ContentLookup {
    /// Loads the site map described by an output configuration
    ///
    /// A missing or malformed site map yields an empty service.
    pub fn open(output: &OutputConfig) -> Self {
        let store = JsonSiteMapStore::new(output.site_map_path());
        let site_map = store.load();
        tracing::debug!("Loaded {} pages from {}", site_map.len(), store.path().display());

        Self {
            site_map,
            root: output.root().to_path_buf(),
            store: Some(store),
        }
    }

    /// Wraps an in-memory site map
    pub fn new(site_map: SiteMap, root: impl Into<PathBuf>) -> Self {
        Self {
            site_map,
            root: root.into(),
            store: None,
        }
    }

    /// Re-reads the site map from its store; returns the page count
    pub fn reload(&mut self) -> usize {
        if let Some(store) = &self.store {
            self.site_map = store.load();
        }
        self.site_map.len()
    }

    pub fn site_map(&self) -> &SiteMap {
        &self.site_map
    }

    /// Lists every page with its title and description
    pub fn list_pages(&self) -> Vec<PageSummary> {
        self.site_map.iter().map(PageSummary::from).collect()
    }

    /// Returns the Markdown text of a page
    ///
    /// Fails with `NotFound` when the id is unknown, when the page has no
    /// Markdown rendering, or when the file cannot be read.
    pub fn get_page_content(&self, id: &str) -> LookupResult<String> {
        let record = self.record(id)?;
        let markdown_path = record
            .markdown_path
            .as_deref()
            .ok_or_else(|| LookupError::not_found(id, "no markdown rendering"))?;
        self.read(id, markdown_path)
    }

    /// Returns the raw HTML of a page
    pub fn get_page_html(&self, id: &str) -> LookupResult<String> {
        let record = self.record(id)?;
        if record.html_path.is_empty() {
            return Err(LookupError::not_found(id, "no html file"));
        }
        self.read(id, &record.html_path)
    }

    /// Searches titles and descriptions; see [`search`]
    pub fn search_pages(&self, query: &str) -> Vec<SearchHit> {
        search(&self.site_map, query)
    }

    fn record(&self, id: &str) -> LookupResult<&PageRecord> {
        self.site_map
            .get(id)
            .ok_or_else(|| LookupError::not_found(id, "unknown page"))
    }

    fn read(&self, id: &str, relative: &str) -> LookupResult<String> {
        let path = self
            .resolve(relative)
            .ok_or_else(|| LookupError::not_found(id, format!("unsafe path {}", relative)))?;

        std::fs::read_to_string(&path).map_err(|e| {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            LookupError::not_found(id, format!("cannot read {}: {}", path.display(), e))
        })
    }

    /// Resolves a record location under the root, refusing upward paths
    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        (!escapes).then(|| self.root.join(path))
    }
}
