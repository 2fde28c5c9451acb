//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Preparing the HTML and Markdown output trees
//! - Draining the frontier breadth-first, one page at a time
//! - Fetching, metadata extraction, Markdown conversion, link discovery
//! - Building the site map and persisting it at the end

use crate::config::Config;
use crate::convert::{convert_file, Html2MdConverter, MarkdownConverter};
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::crawler::frontier::{Frontier, QueuedPage};
use crate::output::CrawlSummary;
use crate::storage::{JsonSiteMapStore, PageRecord, SiteMap, SiteMapStore};
use crate::MirrorError;
use std::fs;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// What a finished crawl hands back
#[derive(Debug)]
pub struct CrawlOutcome {
    pub site_map: SiteMap,
    pub summary: CrawlSummary,
}

/// Result of processing one dequeued page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageOutcome {
    Saved,
    SavedWithoutMarkdown,
    FetchFailed,
}

/// Main crawler coordinator structure
///
/// Owns the frontier and the in-memory site map for the lifetime of one
/// crawl. Pages are processed strictly in sequence.
pub struct Coordinator {
    config: Config,
    fetcher: Fetcher,
    converter: Box<dyn MarkdownConverter>,
    frontier: Frontier,
    site_map: SiteMap,
    summary: CrawlSummary,
    html_dir: PathBuf,
    markdown_dir: PathBuf,
}

impl Coordinator {
    /// Creates a coordinator using the default `html2md` converter
    pub fn new(config: Config) -> Result<Self, MirrorError> {
        Self::with_converter(config, Box::new(Html2MdConverter))
    }

    /// Creates a coordinator with a caller-supplied Markdown converter
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(MirrorError)` - Bad base URL, bad start path, or HTTP client failure
    pub fn with_converter(
        config: Config,
        converter: Box<dyn MarkdownConverter>,
    ) -> Result<Self, MirrorError> {
        let base_url = Url::parse(&config.site.base_url)?;
        let client = build_http_client(&config, &base_url)?;
        let html_dir = config.output.html_dir();
        let markdown_dir = config.output.markdown_dir();
        let fetcher = Fetcher::new(client, base_url, html_dir.clone());
        let frontier = Frontier::new(&config.crawler.start_path)?;

        Ok(Self {
            config,
            fetcher,
            converter,
            frontier,
            site_map: SiteMap::new(),
            summary: CrawlSummary::start(),
            html_dir,
            markdown_dir,
        })
    }

    /// Runs the crawl until the frontier is empty
    ///
    /// Fetch and conversion failures are logged and skipped; only failing
    /// to prepare the output directories aborts the run.
    pub async fn run(mut self) -> Result<CrawlOutcome, MirrorError> {
        self.prepare_output_dirs()?;
        tracing::info!("Starting crawl of {}", self.fetcher.base_url());
        self.summary = CrawlSummary::start();

        while let Some(page) = self.frontier.next() {
            self.summary.pages_visited += 1;

            match self.process_page(&page).await {
                PageOutcome::Saved => self.summary.pages_saved += 1,
                PageOutcome::SavedWithoutMarkdown => {
                    self.summary.pages_saved += 1;
                    self.summary.conversion_failures += 1;
                }
                PageOutcome::FetchFailed => self.summary.fetch_failures += 1,
            }
        }

        self.summary.links_rejected = self.frontier.rejected();
        self.summary.finish();

        tracing::info!(
            "Crawl completed: {} pages saved, {} visited, in {}s",
            self.summary.pages_saved,
            self.summary.pages_visited,
            self.summary.duration().num_seconds()
        );

        Ok(CrawlOutcome {
            site_map: self.site_map,
            summary: self.summary,
        })
    }

    /// Processes a single page
    ///
    /// 1. Fetch and store the HTML
    /// 2. Convert the stored HTML to Markdown
    /// 3. Record the page in the site map
    /// 4. Queue newly discovered links
    async fn process_page(&mut self, page: &QueuedPage) -> PageOutcome {
        let parsed = match self.fetcher.fetch(&page.path, &page.id).await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Failed to download {}: {}", page.path, e);
                return PageOutcome::FetchFailed;
            }
        };

        let html_file = self.fetcher.html_file(&page.id);
        let markdown_file = self.markdown_dir.join(format!("{}.md", page.id));

        let markdown_path = match convert_file(self.converter.as_ref(), &html_file, &markdown_file) {
            Ok(()) => Some(record_path(&self.config.output.markdown_dir, &page.id, "md")),
            Err(e) => {
                tracing::warn!("Failed to convert {} to markdown: {}", html_file.display(), e);
                None
            }
        };
        let outcome = if markdown_path.is_some() {
            PageOutcome::Saved
        } else {
            PageOutcome::SavedWithoutMarkdown
        };

        let record = PageRecord {
            id: page.id.clone(),
            html_path: record_path(&self.config.output.html_dir, &page.id, "html"),
            markdown_path,
            title: parsed.title,
            description: parsed.description,
        };
        if self.site_map.insert(record).is_some() {
            tracing::debug!("Overwrote existing site map entry {}", page.id);
        }

        let queued = self.frontier.enqueue_all(&parsed.links);
        self.summary.links_queued += queued;

        tracing::info!(
            "Processed: {} ({} remaining)",
            page.path,
            self.frontier.pending_len()
        );

        outcome
    }

    /// Ensures both output trees exist, emptying them when configured to
    fn prepare_output_dirs(&self) -> std::io::Result<()> {
        for dir in [&self.html_dir, &self.markdown_dir] {
            if self.config.crawler.clear_output && dir.exists() {
                tracing::info!("Clearing directory: {}", dir.display());
                clear_directory(dir)?;
            } else {
                fs::create_dir_all(dir)?;
            }
        }
        Ok(())
    }

    /// Read-only view of the frontier
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }
}

/// Removes everything inside `dir`, keeping the directory itself
fn clear_directory(dir: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

/// Renders the file location stored in a site map record
///
/// Locations are relative to the output root, use `/` separators, and
/// start with `./` (e.g. `./html/blog/post-1.html`).
fn record_path(dir: &Path, id: &str, extension: &str) -> String {
    let mut rendered = String::from(".");
    for component in dir.components() {
        if let Component::Normal(part) = component {
            rendered.push('/');
            rendered.push_str(&part.to_string_lossy());
        }
    }
    format!("{}/{}.{}", rendered, id, extension)
}

/// Runs a complete crawl and persists the site map
///
/// # Steps
///
/// 1. Prepare the output trees
/// 2. Crawl breadth-first from the start path
/// 3. Save the site map as JSON
///
/// # Example
///
/// ```no_run
/// use sumi_mirror::config::load_config;
/// use sumi_mirror::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("mirror.toml"))?;
/// let outcome = run_crawl(config).await?;
/// println!("{} pages mirrored", outcome.site_map.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome, MirrorError> {
    let store = JsonSiteMapStore::new(config.output.site_map_path());
    let outcome = Coordinator::new(config)?.run().await?;
    store.save(&outcome.site_map)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, OutputConfig, SiteConfig, UserAgentConfig};
    use tempfile::TempDir;

    fn create_test_config(root: &Path) -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://example.com".to_string(),
            },
            user_agent: UserAgentConfig {
                crawler_name: "TestMirror".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            crawler: CrawlerConfig::default(),
            output: OutputConfig::rooted_at(root),
        }
    }

    #[test]
    fn test_record_path() {
        assert_eq!(record_path(Path::new("html"), "index", "html"), "./html/index.html");
        assert_eq!(
            record_path(Path::new("./out/markdown/"), "blog/post-1", "md"),
            "./out/markdown/blog/post-1.md"
        );
    }

    #[test]
    fn test_coordinator_creation() {
        let dir = TempDir::new().unwrap();
        let coordinator = Coordinator::new(create_test_config(dir.path())).unwrap();
        assert_eq!(coordinator.frontier().pending_len(), 1);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = create_test_config(dir.path());
        config.site.base_url = "not a url".to_string();
        assert!(Coordinator::new(config).is_err());
    }

    #[test]
    fn test_prepare_clears_previous_mirror() {
        let dir = TempDir::new().unwrap();
        let config = create_test_config(dir.path());
        let stale = config.output.html_dir().join("old/page.html");
        fs::create_dir_all(stale.parent().unwrap()).unwrap();
        fs::write(&stale, "stale").unwrap();

        let coordinator = Coordinator::new(config).unwrap();
        coordinator.prepare_output_dirs().unwrap();

        assert!(coordinator.html_dir.exists());
        assert!(coordinator.markdown_dir.exists());
        assert!(!stale.exists());
    }

    #[test]
    fn test_prepare_keeps_files_when_not_clearing() {
        let dir = TempDir::new().unwrap();
        let mut config = create_test_config(dir.path());
        config.crawler.clear_output = false;
        let kept = config.output.markdown_dir().join("kept.md");
        fs::create_dir_all(kept.parent().unwrap()).unwrap();
        fs::write(&kept, "kept").unwrap();

        let coordinator = Coordinator::new(config).unwrap();
        coordinator.prepare_output_dirs().unwrap();

        assert!(kept.exists());
    }
}
