//! Storage module for the crawl's site map
//!
//! This module handles:
//! - The per-page record written for every successfully fetched page
//! - The site map keyed by page identifier
//! - JSON persistence of the site map

mod json;
mod traits;

pub use json::JsonSiteMapStore;
pub use traits::{SiteMapStore, StoreError, StoreResult};

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Represents one mirrored page
///
/// Serialized field names follow the persisted site map format:
/// `base`, `html`, `markdown`, `name`, `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page identifier; also the site map key
    #[serde(rename = "base")]
    pub id: String,

    /// HTML file location, relative to the output root
    #[serde(rename = "html")]
    pub html_path: String,

    /// Markdown file location; `None` when conversion failed
    #[serde(rename = "markdown", default, with = "empty_as_none")]
    pub markdown_path: Option<String>,

    /// Cleaned page title
    #[serde(rename = "name")]
    pub title: String,

    /// Cleaned meta description
    #[serde(default)]
    pub description: String,
}

/// Maps the persisted empty-string convention onto `Option`
mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }
}

/// Mapping from page identifier to page record
///
/// Keys iterate in sorted order, which keeps listings and search results
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteMap {
    pages: BTreeMap<String, PageRecord>,
}

impl SiteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its identifier, returning any record it replaced
    pub fn insert(&mut self, record: PageRecord) -> Option<PageRecord> {
        self.pages.insert(record.id.clone(), record)
    }

    pub fn get(&self, id: &str) -> Option<&PageRecord> {
        self.pages.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterates records in identifier order
    pub fn iter(&self) -> btree_map::Values<'_, String, PageRecord> {
        self.pages.values()
    }

    /// Rewrites each record's `id` to match its key
    ///
    /// The `base` field is a redundant copy of the key; the key wins when a
    /// hand-edited document disagrees.
    pub(crate) fn reconcile_ids(&mut self) {
        for (key, record) in self.pages.iter_mut() {
            if record.id != *key {
                record.id = key.clone();
            }
        }
    }
}

impl<'a> IntoIterator for &'a SiteMap {
    type Item = &'a PageRecord;
    type IntoIter = btree_map::Values<'a, String, PageRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PageRecord> for SiteMap {
    fn from_iter<I: IntoIterator<Item = PageRecord>>(iter: I) -> Self {
        let mut site_map = SiteMap::new();
        for record in iter {
            site_map.insert(record);
        }
        site_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, markdown: Option<&str>) -> PageRecord {
        PageRecord {
            id: id.to_string(),
            html_path: format!("./html/{}.html", id),
            markdown_path: markdown.map(str::to_string),
            title: "Title".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_record_field_names() {
        let json = serde_json::to_value(record("about", Some("./markdown/about.md"))).unwrap();
        assert_eq!(json["base"], "about");
        assert_eq!(json["html"], "./html/about.html");
        assert_eq!(json["markdown"], "./markdown/about.md");
        assert_eq!(json["name"], "Title");
        assert_eq!(json["description"], "");
    }

    #[test]
    fn test_missing_markdown_serializes_empty() {
        let json = serde_json::to_value(record("about", None)).unwrap();
        assert_eq!(json["markdown"], "");

        let parsed: PageRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.markdown_path, None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut site_map = SiteMap::new();
        assert!(site_map.insert(record("a", None)).is_none());
        let previous = site_map.insert(record("a", Some("./markdown/a.md")));

        assert_eq!(previous.unwrap().markdown_path, None);
        assert_eq!(site_map.len(), 1);
        assert!(site_map.get("a").unwrap().markdown_path.is_some());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let site_map: SiteMap = ["c", "a", "b"].into_iter().map(|id| record(id, None)).collect();
        let ids: Vec<&str> = site_map.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reconcile_ids() {
        let json = r#"{"about": {"base": "stale", "html": "./html/about.html", "markdown": "", "name": "About", "description": ""}}"#;
        let mut site_map: SiteMap = serde_json::from_str(json).unwrap();
        site_map.reconcile_ids();
        assert_eq!(site_map.get("about").unwrap().id, "about");
    }
}
