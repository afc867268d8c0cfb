//! Saved search-filter presets.
//!
//! Named [`SearchFilters`] snapshots, stored together in one JSON file
//! as a name-to-filters map.

use jobscout_core::SearchFilters;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::persistence::{default_presets_path, load_json_or_default, save_json};

/// Handle on the filter-presets file.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    /// Store backed by the default presets path.
    pub fn new() -> Self {
        Self {
            path: default_presets_path(),
        }
    }

    /// Store backed by an explicit path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all presets. Missing or corrupt file yields an empty map.
    pub async fn load(&self) -> BTreeMap<String, SearchFilters> {
        load_json_or_default(&self.path).await
    }

    /// Save or replace the preset under `name`.
    pub async fn save(&self, name: &str, filters: &SearchFilters) -> Result<(), StoreError> {
        let mut presets = self.load().await;
        presets.insert(name.to_string(), filters.clone());
        save_json(&self.path, &presets).await
    }

    /// Delete the preset under `name`.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut presets = self.load().await;
        if presets.remove(name).is_none() {
            return Err(StoreError::PresetNotFound(name.to_string()));
        }
        save_json(&self.path, &presets).await
    }
}

impl Default for PresetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> PresetStore {
        PresetStore::with_path(dir.path().join("filter_presets.json"))
    }

    #[tokio::test]
    async fn test_save_and_load_preset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        let mut filters = SearchFilters::default();
        filters.locations = vec!["Berlin".to_string()];
        store.save("berlin-remote", &filters).await.unwrap();

        let presets = store.load().await;
        assert_eq!(presets.len(), 1);
        assert_eq!(presets["berlin-remote"].locations, vec!["Berlin"]);
    }

    #[tokio::test]
    async fn test_delete_missing_preset_errors() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        let err = store.delete("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::PresetNotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_only_named_preset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        store.save("a", &SearchFilters::default()).await.unwrap();
        store.save("b", &SearchFilters::default()).await.unwrap();
        store.delete("a").await.unwrap();

        let presets = store.load().await;
        assert!(!presets.contains_key("a"));
        assert!(presets.contains_key("b"));
    }
}
