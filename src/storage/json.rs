//! JSON file backend for the site map

use crate::storage::traits::{SiteMapStore, StoreResult};
use crate::storage::SiteMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Site map persisted as a pretty-printed JSON document
///
/// The document is a single object keyed by page identifier, indented with
/// two spaces, and written through a sibling temp file so readers never see
/// a half-written map.
#[derive(Debug, Clone)]
pub struct JsonSiteMapStore {
    path: PathBuf,
}

impl JsonSiteMapStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "site_map.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SiteMapStore for JsonSiteMapStore {
    fn load(&self) -> SiteMap {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No site map at {}", self.path.display());
                return SiteMap::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read site map {}: {}", self.path.display(), e);
                return SiteMap::new();
            }
        };

        match serde_json::from_str::<SiteMap>(&content) {
            Ok(mut site_map) => {
                site_map.reconcile_ids();
                site_map
            }
            Err(e) => {
                tracing::warn!("Malformed site map {}: {}", self.path.display(), e);
                SiteMap::new()
            }
        }
    }

    fn save(&self, site_map: &SiteMap) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(site_map)?;
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        tracing::info!(
            "Site map with {} pages saved to {}",
            site_map.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::PageRecord;
    use tempfile::TempDir;

    fn sample_site_map() -> SiteMap {
        vec![
            PageRecord {
                id: "index".to_string(),
                html_path: "./html/index.html".to_string(),
                markdown_path: Some("./markdown/index.md".to_string()),
                title: "Home".to_string(),
                description: "Welcome home".to_string(),
            },
            PageRecord {
                id: "blog/post-1".to_string(),
                html_path: "./html/blog/post-1.html".to_string(),
                markdown_path: None,
                title: "First Post".to_string(),
                description: String::new(),
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonSiteMapStore::new(dir.path().join("site_map.json"));
        let site_map = sample_site_map();

        store.save(&site_map).unwrap();
        assert_eq!(store.load(), site_map);
        assert!(!dir.path().join("site_map.json.tmp").exists());
    }

    #[test]
    fn test_two_space_indent() {
        let dir = TempDir::new().unwrap();
        let store = JsonSiteMapStore::new(dir.path().join("site_map.json"));
        store.save(&sample_site_map()).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("{\n  \"blog/post-1\": {\n    \"base\": \"blog/post-1\""));
        assert!(content.contains("\"markdown\": \"\""));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let store = JsonSiteMapStore::new(dir.path().join("nested/out/site_map.json"));
        store.save(&sample_site_map()).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonSiteMapStore::new(dir.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site_map.json");

        for content in ["not json at all", "[1, 2, 3]", r#"{"a": {"base": 7}}"#, ""] {
            std::fs::write(&path, content).unwrap();
            assert!(JsonSiteMapStore::new(&path).load().is_empty(), "{:?}", content);
        }
    }
}
