//! Output module for crawl reports
//!
//! This module handles:
//! - Counting what happened during a crawl run
//! - Summarizing a persisted site map for the `--stats` mode

mod stats;
mod summary;

pub use stats::{print_statistics, SiteMapStatistics};
pub use summary::{print_crawl_summary, CrawlSummary};
