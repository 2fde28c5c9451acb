//! Crawler module for mirroring a single site
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and HTML persistence
//! - HTML parsing for metadata and same-origin links
//! - The breadth-first frontier with duplicate suppression
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use frontier::{Frontier, QueuedPage};
pub use parser::{clean_text, extract_links, extract_metadata, parse_html, ParsedPage, NO_TITLE};

use crate::config::Config;
use crate::MirrorError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Prepare the HTML and Markdown output directories
/// 2. Build the HTTP client
/// 3. Fetch pages breadth-first from the start path
/// 4. Convert each page to Markdown and record it in the site map
/// 5. Save the site map
///
/// # Arguments
///
/// * `config` - The mirror configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed; holds the site map and run summary
/// * `Err(MirrorError)` - Setup or site map persistence failed
pub async fn crawl(config: Config) -> Result<CrawlOutcome, MirrorError> {
    run_crawl(config).await
}
