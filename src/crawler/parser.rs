//! HTML parser for extracting page metadata and links
//!
//! This module handles parsing HTML content to extract:
//! - Page title and meta description, whitespace-cleaned
//! - Same-origin link paths to follow

use crate::url::{classify_link, LinkScope};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Title recorded for pages without a `<title>` element
pub const NO_TITLE: &str = "No Title";

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Cleaned `<title>` text, or [`NO_TITLE`] when absent
    pub title: String,

    /// Cleaned `<meta name="description">` content, or empty
    pub description: String,

    /// Same-origin link paths in document order, first occurrence only
    pub links: Vec<String>,
}

/// Parses HTML content and extracts metadata and followable links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The site's base origin; relative links resolve against it
///
/// # Example
///
/// ```
/// use sumi_mirror::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title> Test
///   Page </title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, "Test Page");
/// assert_eq!(parsed.links, vec!["/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);
    let (title, description) = extract_metadata(&document);
    let links = extract_links(&document, base_url);

    ParsedPage {
        title,
        description,
        links,
    }
}

/// Extracts the cleaned `(title, description)` pair from a document
pub fn extract_metadata(document: &Html) -> (String, String) {
    let title = extract_title(document)
        .map(|t| clean_text(&t))
        .unwrap_or_else(|| NO_TITLE.to_string());
    let description = extract_description(document)
        .map(|d| clean_text(&d))
        .unwrap_or_default();

    (title, description)
}

/// Extracts the raw text of the first `<title>` element
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

/// Extracts the `content` of the first `<meta name="description">`
fn extract_description(document: &Html) -> Option<String> {
    let meta_selector = Selector::parse("meta[name][content]").ok()?;

    document
        .select(&meta_selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Extracts same-origin link paths from every `<a href>` in the document
///
/// Offsite links, non-HTTP schemes, and fragment-only anchors are dropped.
/// A path is returned once even if the page links to it repeatedly.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match classify_link(href, base_url) {
            LinkScope::SameOrigin(path) => {
                if seen.insert(path.clone()) {
                    links.push(path);
                }
            }
            LinkScope::Offsite => tracing::trace!("Skipping offsite link {}", href),
            LinkScope::Unsupported => tracing::trace!("Skipping unsupported link {}", href),
        }
    }

    links
}

/// Normalizes whitespace in extracted text
///
/// Carriage returns and newlines become spaces, whitespace runs collapse to
/// one space, and the ends are trimmed. Already-clean text is unchanged.
pub fn clean_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
