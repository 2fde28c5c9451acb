//! URL handling module for Sumi-Mirror
//!
//! This module maps URLs to page identifiers, checks origins, and decides
//! which hyperlinks stay inside the mirrored site.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::same_origin;
pub use normalize::{normalize_identifier, request_path, validate_identifier, ROOT_IDENTIFIER};

/// Where a hyperlink points relative to the mirrored site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkScope {
    /// Same origin as the base; carries the resolved URL path
    SameOrigin(String),
    /// HTTP(S) link to another origin
    Offsite,
    /// Not a crawlable link (scripts, mail, anchors, malformed)
    Unsupported,
}

impl LinkScope {
    /// Returns the path if the link should be followed
    pub fn into_path(self) -> Option<String> {
        match self {
            Self::SameOrigin(path) => Some(path),
            Self::Offsite | Self::Unsupported => None,
        }
    }
}

/// Classifies a hyperlink destination against the base origin
///
/// Relative destinations are resolved against `base`, never against the
/// page they appear on.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_mirror::url::{classify_link, LinkScope};
///
/// let base = Url::parse("https://example.com").unwrap();
/// assert_eq!(
///     classify_link("/local-page", &base),
///     LinkScope::SameOrigin("/local-page".to_string())
/// );
/// assert_eq!(classify_link("https://other.example.com/x", &base), LinkScope::Offsite);
/// assert_eq!(classify_link("mailto:me@example.com", &base), LinkScope::Unsupported);
/// ```
pub fn classify_link(href: &str, base: &Url) -> LinkScope {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return LinkScope::Unsupported;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return LinkScope::Unsupported;
    }

    let absolute = match base.join(href) {
        Ok(url) => url,
        Err(_) => return LinkScope::Unsupported,
    };

    if absolute.scheme() != "http" && absolute.scheme() != "https" {
        return LinkScope::Unsupported;
    }

    if !same_origin(&absolute, base) {
        return LinkScope::Offsite;
    }

    let path = absolute.path();
    if path.is_empty() {
        LinkScope::Unsupported
    } else {
        LinkScope::SameOrigin(path.to_string())
    }
}
