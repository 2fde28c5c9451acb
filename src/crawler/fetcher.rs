//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings and timeouts
//! - GET requests for site paths resolved against the base origin
//! - Persisting the raw response body to the HTML tree
//! - Error classification

use crate::config::Config;
use crate::crawler::parser::{parse_html, ParsedPage};
use crate::url::{same_origin, validate_identifier};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// Reasons a page could not be fetched and stored
///
/// Every variant is recovered by the crawler: the page is skipped and
/// never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Cannot resolve path {path}: {source}")]
    InvalidPath { path: String, source: url::ParseError },

    #[error("Unsafe page identifier: {0}")]
    UnsafeIdentifier(String),

    #[error("Failed to store {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

impl FetchError {
    fn from_reqwest(url: &Url, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The mirror configuration (user agent and timeout)
/// * `base_url` - The mirrored origin; redirects leaving it are not followed
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::load_config;
/// use sumi_mirror::crawler::build_http_client;
/// use std::path::Path;
/// use url::Url;
///
/// let config = load_config(Path::new("mirror.toml")).unwrap();
/// let base_url = Url::parse(&config.site.base_url).unwrap();
/// let client = build_http_client(&config, &base_url).unwrap();
/// ```
pub fn build_http_client(config: &Config, base_url: &Url) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.crawler.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent_string())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(same_origin_redirects(base_url.clone()))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Follows redirects only while they stay on the mirrored origin
///
/// A redirect to another origin is not followed; the 3xx response is then
/// reported as an HTTP status failure and the page is skipped.
fn same_origin_redirects(base_url: Url) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else if same_origin(attempt.url(), &base_url) {
            attempt.follow()
        } else {
            tracing::debug!("Not following offsite redirect to {}", attempt.url());
            attempt.stop()
        }
    })
}

/// Fetches site pages and mirrors their HTML to disk
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    base_url: Url,
    html_dir: PathBuf,
}

impl Fetcher {
    pub fn new(client: Client, base_url: Url, html_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            base_url,
            html_dir: html_dir.into(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Location of the mirrored HTML file for an identifier
    pub fn html_file(&self, id: &str) -> PathBuf {
        self.html_dir.join(format!("{}.html", id))
    }

    /// Fetches `path`, writes the body to `html/<id>.html`, and parses it
    ///
    /// # Request Flow
    ///
    /// 1. Reject identifiers that would land outside the HTML tree
    /// 2. Resolve `path` against the base origin
    /// 3. GET with the client's timeout; redirects are followed
    /// 4. Any non-2xx status is an error
    /// 5. Store the body (no file is left behind on failure)
    /// 6. Parse metadata and links
    pub async fn fetch(&self, path: &str, id: &str) -> Result<ParsedPage, FetchError> {
        validate_identifier(id).map_err(|_| FetchError::UnsafeIdentifier(id.to_string()))?;

        let url = self
            .base_url
            .join(path)
            .map_err(|source| FetchError::InvalidPath {
                path: path.to_string(),
                source,
            })?;
        tracing::info!("Downloading: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;

        let html_path = self.html_file(id);
        write_atomic(&html_path, body.as_bytes()).map_err(|source| FetchError::Io {
            path: html_path.clone(),
            source,
        })?;

        Ok(parse_html(&body, &self.base_url))
    }
}

/// Writes `contents` to `path` through a sibling `.part` file
///
/// Parent directories are created as needed. On failure the partial file
/// is removed and `path` is left untouched.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut part_name = path.file_name().unwrap_or_default().to_os_string();
    part_name.push(".part");
    let part = path.with_file_name(part_name);

    let result = fs::write(&part, contents).and_then(|()| fs::rename(&part, path));
    if result.is_err() {
        let _ = fs::remove_file(&part);
    }
    result
}
