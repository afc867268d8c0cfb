//! Model settings persistence.
//!
//! The whole [`GlobalSettings`] record is saved and loaded as one JSON
//! document. No partial updates: callers mutate an in-memory copy and
//! save it back.

use jobscout_llm::GlobalSettings;
use std::path::PathBuf;
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

/// Handle on the settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store backed by the default settings path.
    pub fn new() -> Self {
        Self {
            path: default_settings_path(),
        }
    }

    /// Store backed by an explicit path. Used by tests.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load settings, falling back to defaults when the file is missing
    /// or unreadable.
    pub async fn load(&self) -> GlobalSettings {
        let settings = load_json_or_default(&self.path).await;
        debug!(path = %self.path.display(), "Settings loaded");
        settings
    }

    /// Persist the whole settings record.
    pub async fn save(&self, settings: &GlobalSettings) -> Result<(), StoreError> {
        save_json(&self.path, settings).await
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_llm::{ModelConfig, Provider, TaskKind};

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(temp_dir.path().join("settings.json"));

        let settings = store.load().await;
        assert_eq!(settings.defaults.provider, Provider::Gemini);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_overrides() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::with_path(temp_dir.path().join("settings.json"));

        let mut settings = GlobalSettings::default();
        settings.set_override(
            TaskKind::Matching,
            ModelConfig::new(Provider::Groq, "llama-3.3-70b-versatile"),
        );
        store.save(&settings).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(
            loaded.effective(Some(TaskKind::Matching)).provider,
            Provider::Groq
        );
        assert_eq!(loaded.effective(None).provider, Provider::Gemini);
    }
}
