//! Sumi-Mirror: a single-site mirroring crawler
//!
//! This crate walks one website breadth-first, stores every reachable page as
//! both HTML and Markdown, records a site map keyed by page identifier, and
//! answers list/read/search queries over that site map.

pub mod config;
pub mod convert;
pub mod crawler;
pub mod lookup;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Site map error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Unsafe page identifier: {0}")]
    UnsafeIdentifier(String),
}

/// Result type alias for Sumi-Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use lookup::{ContentLookup, LookupError, Relevance};
pub use storage::{PageRecord, SiteMap};
pub use url::{normalize_identifier, LinkScope};
