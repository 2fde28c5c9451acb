use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure for Sumi-Mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Renders the User-Agent header sent with every request
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn user_agent_string(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.user_agent.crawler_name,
            self.user_agent.crawler_version,
            self.user_agent.contact_url,
            self.user_agent.contact_email
        )
    }
}

/// The site being mirrored
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base origin of the site; only links on this origin are followed
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path the crawl starts from
    #[serde(rename = "start-path", default = "default_start_path")]
    pub start_path: String,

    /// Empty the HTML and Markdown trees before crawling
    #[serde(rename = "clear-output", default = "default_clear_output")]
    pub clear_output: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            start_path: default_start_path(),
            clear_output: default_clear_output(),
        }
    }
}

/// Output locations
///
/// `html-dir`, `markdown-dir` and `site-map` are resolved against `root`.
/// Site map records store file locations relative to `root`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(rename = "html-dir", default = "default_html_dir")]
    pub html_dir: PathBuf,

    #[serde(rename = "markdown-dir", default = "default_markdown_dir")]
    pub markdown_dir: PathBuf,

    #[serde(rename = "site-map", default = "default_site_map")]
    pub site_map: PathBuf,
}

impl OutputConfig {
    /// Creates an output layout with default directory names under `root`
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Absolute (or CWD-relative) directory holding the HTML tree
    pub fn html_dir(&self) -> PathBuf {
        self.root.join(&self.html_dir)
    }

    /// Absolute (or CWD-relative) directory holding the Markdown tree
    pub fn markdown_dir(&self) -> PathBuf {
        self.root.join(&self.markdown_dir)
    }

    /// Location of the persisted site map
    pub fn site_map_path(&self) -> PathBuf {
        self.root.join(&self.site_map)
    }

    /// Output root that record paths are relative to
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            html_dir: default_html_dir(),
            markdown_dir: default_markdown_dir(),
            site_map: default_site_map(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_start_path() -> String {
    "/".to_string()
}

fn default_clear_output() -> bool {
    true
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_html_dir() -> PathBuf {
    PathBuf::from("html")
}

fn default_markdown_dir() -> PathBuf {
    PathBuf::from("markdown")
}

fn default_site_map() -> PathBuf {
    PathBuf::from("site_map.json")
}
