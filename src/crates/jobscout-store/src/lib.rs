//! On-disk persistence for jobscout.
//!
//! Two small JSON stores under the user's config directory:
//!
//! - **SettingsStore**: the whole model-settings record
//! - **PresetStore**: named search-filter presets
//!
//! Both stores write atomically and keep files owner-only on Unix,
//! since settings carry API keys. Loads never fail: missing or corrupt
//! files fall back to defaults.

pub mod error;
pub mod persistence;
pub mod presets;
pub mod settings;

pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_presets_path, default_settings_path, load_json,
    load_json_or_default, save_json,
};
pub use presets::PresetStore;
pub use settings::SettingsStore;
