//! File persistence helpers.
//!
//! Loading and saving JSON state to disk. Settings files can hold API
//! keys, so writes are atomic and files get owner-only permissions on
//! Unix.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - Linux: `~/.config/jobscout`
/// - macOS: `~/Library/Application Support/jobscout`
/// - Windows: `%APPDATA%\jobscout`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("jobscout"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}

/// Returns the default filter-presets file path.
pub fn default_presets_path() -> PathBuf {
    default_config_dir().join("filter_presets.json")
}

// ============================================================================
// Security: File Permissions
// ============================================================================

/// Sets restrictive file permissions (0o600) on Unix systems so config
/// files containing API keys are only readable by the owner.
#[cfg(unix)]
async fn set_restrictive_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path).await?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0600", "Set restrictive permissions");
    Ok(())
}

/// Sets restrictive directory permissions (0o700) on Unix systems.
#[cfg(unix)]
async fn set_restrictive_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path).await?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o700);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0700", "Set restrictive directory permissions");
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn set_restrictive_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn set_restrictive_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Creates parent directories with restrictive permissions.
async fn create_secure_parent_dirs(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            debug!(path = %parent.display(), "Creating secure directory");
            tokio::fs::create_dir_all(parent).await?;
            set_restrictive_dir_permissions(parent).await?;
        }
    }
    Ok(())
}

/// Saves data to a JSON file with secure permissions.
///
/// Creates parent directories if they don't exist, writes atomically
/// (via temp file + rename), and sets restrictive permissions on Unix.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    create_secure_parent_dirs(path).await?;

    let json = serde_json::to_string_pretty(data)?;

    // Write to a temp file first, then rename over the target. The
    // temp file is restricted before the rename so the content is never
    // visible under default umask permissions.
    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    set_restrictive_permissions(&temp_path).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Loads data from a JSON file, returning default if missing or corrupt.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) => {
            // A missing file is the normal first-run case; only a
            // corrupt one is worth mentioning.
            if !matches!(e, StoreError::Io(_)) {
                warn!(path = %path.display(), error = %e, "Failed to load, using defaults");
            }
            T::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings_path() {
        assert!(default_settings_path().ends_with("settings.json"));
    }

    #[test]
    fn test_default_presets_path() {
        assert!(default_presets_path().ends_with("filter_presets.json"));
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("data.json");

        let mut data = HashMap::new();
        data.insert("key".to_string(), 42u32);

        save_json(&path, &data).await.unwrap();
        let loaded: HashMap<String, u32> = load_json(&path).await.unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn test_load_or_default_on_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.json");

        let loaded: HashMap<String, u32> = load_json_or_default(&path).await;
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_load_or_default_on_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        tokio::fs::write(&path, "not json{{").await.unwrap();

        let loaded: HashMap<String, u32> = load_json_or_default(&path).await;
        assert!(loaded.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_file_has_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("secret.json");

        save_json(&path, &HashMap::from([("k", "v")])).await.unwrap();

        let metadata = tokio::fs::metadata(&path).await.unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "File should have 0600 permissions");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_resave_keeps_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("secret.json");

        // The rename carries the temp file's mode over, so a resave
        // must end restricted without a post-rename chmod.
        save_json(&path, &HashMap::from([("k", 1)])).await.unwrap();
        save_json(&path, &HashMap::from([("k", 2)])).await.unwrap();

        let metadata = tokio::fs::metadata(&path).await.unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        let loaded: HashMap<String, u32> = load_json(&path).await.unwrap();
        assert_eq!(loaded["k"], 2);
    }

    #[tokio::test]
    async fn test_save_leaves_no_temp_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.json");

        save_json(&path, &HashMap::from([("k", 1)])).await.unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
