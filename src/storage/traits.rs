//! Storage traits and error types
//!
//! This module defines the trait interface for site map stores and
//! associated error types.

use crate::storage::SiteMap;
use thiserror::Error;

/// Errors that can occur while persisting a site map
///
/// Loading never fails: a missing or malformed document is read as an
/// empty site map.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for site map persistence backends
pub trait SiteMapStore {
    /// Loads the persisted site map
    ///
    /// Returns an empty map when nothing usable is stored. Callers treat an
    /// empty map as "no data available", not as a failure.
    fn load(&self) -> SiteMap;

    /// Persists the complete site map, replacing any previous copy
    fn save(&self, site_map: &SiteMap) -> StoreResult<()>;
}
