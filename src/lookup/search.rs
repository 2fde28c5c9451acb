//! Substring search over page titles and descriptions

use crate::storage::SiteMap;
use serde::Serialize;

/// How strongly a page matched a query
///
/// Ordering follows rank: `High` sorts before `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    /// Query found in the title
    High,
    /// Query found only in the description
    Medium,
}

impl Relevance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
        }
    }
}

/// One search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub relevance: Relevance,
}

/// Case-insensitive substring search over titles and descriptions
///
/// Title matches rank `High`, description-only matches rank `Medium`. All
/// `High` hits come first; within a tier, site map order is kept. The query
/// is matched as given, whitespace included. An empty query matches nothing.
pub fn search(site_map: &SiteMap, query: &str) -> Vec<SearchHit> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let mut hits: Vec<SearchHit> = site_map
        .iter()
        .filter_map(|record| {
            let relevance = if record.title.to_lowercase().contains(&needle) {
                Relevance::High
            } else if record.description.to_lowercase().contains(&needle) {
                Relevance::Medium
            } else {
                return None;
            };

            Some(SearchHit {
                id: record.id.clone(),
                title: record.title.clone(),
                description: record.description.clone(),
                relevance,
            })
        })
        .collect();

    // Stable sort keeps site map order within each tier
    hits.sort_by_key(|hit| hit.relevance);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PageRecord;

    fn record(id: &str, title: &str, description: &str) -> PageRecord {
        PageRecord {
            id: id.to_string(),
            html_path: format!("./html/{}.html", id),
            markdown_path: Some(format!("./markdown/{}.md", id)),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_title_match_precedes_description_match() {
        // "a" sorts before "b" in the site map, so put the description match first
        let site_map: SiteMap = vec![
            record("a", "y", "Widgets are great"),
            record("b", "Widgets", "x"),
        ]
        .into_iter()
        .collect();

        let hits = search(&site_map, "widgets");
        let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(hits[0].relevance, Relevance::High);
        assert_eq!(hits[1].relevance, Relevance::Medium);
    }

    #[test]
    fn test_tiers_keep_site_map_order() {
        let site_map: SiteMap = vec![
            record("a", "rust intro", ""),
            record("b", "other", "about rust"),
            record("c", "Rust advanced", ""),
            record("d", "misc", "RUST tips"),
            record("e", "unrelated", "nothing"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<String> = search(&site_map, "Rust").into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_title_and_description_match_counts_once_as_high() {
        let site_map: SiteMap = vec![record("a", "Widgets", "All about widgets")]
            .into_iter()
            .collect();

        let hits = search(&site_map, "WIDGET");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].relevance, Relevance::High);
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let site_map: SiteMap = vec![record("a", "Widgets", "")].into_iter().collect();
        assert!(search(&site_map, "").is_empty());
    }

    #[test]
    fn test_whitespace_in_query_is_significant() {
        let site_map: SiteMap = vec![record("a", "foobar", ""), record("b", "foo bar", "")]
            .into_iter()
            .collect();

        let ids: Vec<String> = search(&site_map, "foo ").into_iter().map(|h| h.id).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(search(&site_map, "   ").is_empty());
    }

    #[test]
    fn test_relevance_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Relevance::High).unwrap(), "\"high\"");
        assert_eq!(Relevance::Medium.as_str(), "medium");
    }
}
