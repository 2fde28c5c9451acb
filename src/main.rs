//! Sumi-Mirror main entry point
//!
//! This is the command-line interface for the Sumi-Mirror site mirroring crawler.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use sumi_mirror::config::{load_config_with_hash, Config};
use sumi_mirror::crawler::crawl;
use sumi_mirror::lookup::ContentLookup;
use sumi_mirror::output::{print_crawl_summary, print_statistics, SiteMapStatistics};
use sumi_mirror::url::{normalize_identifier, request_path};
use tracing_subscriber::EnvFilter;

/// Sumi-Mirror: mirror one website as HTML and Markdown
///
/// Sumi-Mirror crawls a single site breadth-first, saves every reachable
/// page as HTML and Markdown, and writes a JSON site map that can be
/// listed, read, and searched.
#[derive(Parser, Debug)]
#[command(name = "sumi-mirror")]
#[command(version = "1.0.0")]
#[command(about = "Mirror one website as HTML and Markdown", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "list", "search", "show"])]
    dry_run: bool,

    /// Show statistics for the saved site map and exit
    #[arg(long, conflicts_with_all = ["dry_run", "list", "search", "show"])]
    stats: bool,

    /// List saved pages as JSON and exit
    #[arg(long, conflicts_with_all = ["dry_run", "stats", "search", "show"])]
    list: bool,

    /// Search saved pages by title/description and print JSON results
    #[arg(long, value_name = "QUERY", conflicts_with_all = ["dry_run", "stats", "list", "show"])]
    search: Option<String>,

    /// Print the Markdown of a saved page
    #[arg(long, value_name = "ID", conflicts_with_all = ["dry_run", "stats", "list", "search"])]
    show: Option<String>,

    /// With --show, print the stored HTML instead of Markdown
    #[arg(long, requires = "show")]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config);
    } else if cli.list {
        handle_list(&config)?;
    } else if let Some(query) = &cli.search {
        handle_search(&config, query)?;
    } else if let Some(id) = &cli.show {
        handle_show(&config, id, cli.html)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_mirror=info,warn"),
            1 => EnvFilter::new("sumi_mirror=debug,info"),
            2 => EnvFilter::new("sumi_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Sumi-Mirror Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Start path: {}", config.crawler.start_path);
    match normalize_identifier(&config.crawler.start_path) {
        Ok(id) => println!("  Start page: {} (requested as {})", id, request_path(&id)),
        Err(e) => println!("  Start page: unusable ({})", e),
    }

    println!("\nCrawler:");
    println!("  Timeout: {}s", config.crawler.timeout_secs);
    println!("  Clear output first: {}", config.crawler.clear_output);
    println!("  User agent: {}", config.user_agent_string());

    println!("\nOutput:");
    println!("  HTML: {}", config.output.html_dir().display());
    println!("  Markdown: {}", config.output.markdown_dir().display());
    println!("  Site map: {}", config.output.site_map_path().display());

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: summarizes the saved site map
fn handle_stats(config: &Config) {
    println!("Site map: {}\n", config.output.site_map_path().display());

    let lookup = ContentLookup::open(&config.output);
    let stats = SiteMapStatistics::from_site_map(lookup.site_map());
    print_statistics(&stats);
}

/// Handles the --list mode
fn handle_list(config: &Config) -> Result<()> {
    let lookup = ContentLookup::open(&config.output);
    println!("{}", serde_json::to_string_pretty(&lookup.list_pages())?);
    Ok(())
}

/// Handles the --search mode
fn handle_search(config: &Config, query: &str) -> Result<()> {
    let lookup = ContentLookup::open(&config.output);
    println!("{}", serde_json::to_string_pretty(&lookup.search_pages(query))?);
    Ok(())
}

/// Handles the --show mode
fn handle_show(config: &Config, id: &str, html: bool) -> Result<()> {
    let lookup = ContentLookup::open(&config.output);
    let content = if html {
        lookup.get_page_html(id)?
    } else {
        lookup.get_page_content(id)?
    };
    println!("{}", content);
    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<()> {
    tracing::info!(
        "Mirroring {} into {}",
        config.site.base_url,
        config.output.root().display()
    );

    let outcome = crawl(config).await.context("crawl failed")?;
    tracing::info!(
        "Crawling complete. Downloaded {} pages.",
        outcome.site_map.len()
    );
    print_crawl_summary(&outcome.summary);

    Ok(())
}
