//! Statistics over a persisted site map
//!
//! This module provides functionality for summarizing a site map and
//! displaying it on the terminal.

use crate::storage::SiteMap;
use std::collections::BTreeMap;

/// Site map statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteMapStatistics {
    /// Number of pages in the site map
    pub total_pages: usize,

    /// Pages with a Markdown rendering
    pub with_markdown: usize,

    /// Pages kept without a Markdown rendering (conversion failed)
    pub without_markdown: usize,

    /// Pages whose description is empty
    pub without_description: usize,

    /// Page count per top-level path segment (`index` counts as its own section)
    pub sections: BTreeMap<String, usize>,
}

impl SiteMapStatistics {
    /// Computes statistics for a site map
    pub fn from_site_map(site_map: &SiteMap) -> Self {
        let mut stats = Self {
            total_pages: site_map.len(),
            ..Self::default()
        };

        for record in site_map {
            if record.markdown_path.is_some() {
                stats.with_markdown += 1;
            } else {
                stats.without_markdown += 1;
            }

            if record.description.is_empty() {
                stats.without_description += 1;
            }

            let section = record.id.split('/').next().unwrap_or(&record.id);
            *stats.sections.entry(section.to_string()).or_insert(0) += 1;
        }

        stats
    }

    /// Share of pages that have Markdown, as a percentage
    pub fn markdown_coverage(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            (self.with_markdown as f64 / self.total_pages as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &SiteMapStatistics) {
    println!("=== Site Map Statistics ===\n");

    println!("Overview:");
    println!("  Total pages: {}", stats.total_pages);
    println!("  With markdown: {}", stats.with_markdown);
    println!("  Without markdown: {}", stats.without_markdown);
    println!("  Without description: {}", stats.without_description);
    println!();

    if !stats.sections.is_empty() {
        println!("Pages by Section:");
        // Sort sections by count (descending), then by name
        let mut section_counts: Vec<_> = stats.sections.iter().collect();
        section_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (section, count) in section_counts {
            println!("  {}: {}", section, count);
        }
        println!();
    }

    println!(
        "Markdown Coverage: {:.1}% ({} / {} pages)",
        stats.markdown_coverage(),
        stats.with_markdown,
        stats.total_pages
    );
}
