//! Per-run crawl summary

use chrono::{DateTime, Utc};

/// Counters collected while a crawl runs
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages dequeued and attempted
    pub pages_visited: usize,

    /// Pages recorded in the site map
    pub pages_saved: usize,

    /// Pages skipped because the fetch failed
    pub fetch_failures: usize,

    /// Pages saved without Markdown
    pub conversion_failures: usize,

    /// Links that were new to the frontier when discovered
    pub links_queued: usize,

    /// Discovered links dropped for unsafe identifiers
    pub links_rejected: usize,
}

impl CrawlSummary {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_saved: 0,
            fetch_failures: 0,
            conversion_failures: 0,
            links_queued: 0,
            links_rejected: 0,
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration; measured up to now while still running
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at.unwrap_or_else(Utc::now) - self.started_at
    }

    /// Percentage of visited pages that made it into the site map
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            0.0
        } else {
            (self.pages_saved as f64 / self.pages_visited as f64) * 100.0
        }
    }
}

/// Prints a crawl summary to stdout
pub fn print_crawl_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    if let Some(finished) = summary.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    println!(
        "  Duration: {:.1}s",
        summary.duration().num_milliseconds() as f64 / 1000.0
    );
    println!();
    println!("  Pages visited: {}", summary.pages_visited);
    println!("  Pages saved: {}", summary.pages_saved);
    println!("  Fetch failures: {}", summary.fetch_failures);
    println!("  Saved without markdown: {}", summary.conversion_failures);
    println!("  Links queued: {}", summary.links_queued);
    if summary.links_rejected > 0 {
        println!("  Links rejected: {}", summary.links_rejected);
    }
    println!();
    println!("Success Rate: {:.1}%", summary.success_rate());
}
