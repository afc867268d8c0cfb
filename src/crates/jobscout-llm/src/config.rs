//! Model configuration and per-task resolution.

use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The model used when no settings were ever persisted.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// One fully-specified way to call an LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Which backend to call.
    pub provider: Provider,
    /// API key. May be empty (local endpoints, public catalogs).
    #[serde(default)]
    pub api_key: String,
    /// Model name/identifier.
    pub model: String,
    /// Base URL override. `None` means the provider's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whether the model accepts document/image input.
    pub supports_vision: bool,
    /// Whether the model can run a grounded live web search.
    pub supports_search: bool,
    /// Attribution URL sent to providers that want one (OpenRouter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// Attribution name sent to providers that want one (OpenRouter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
}

impl ModelConfig {
    /// Create a config for the given provider and model with empty key
    /// and capabilities off.
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: String::new(),
            model: model.into(),
            base_url: None,
            supports_vision: false,
            supports_search: false,
            site_url: None,
            site_name: None,
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set a base URL override.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the vision capability flag.
    pub fn with_vision(mut self, supports_vision: bool) -> Self {
        self.supports_vision = supports_vision;
        self
    }

    /// Set the search capability flag.
    pub fn with_search(mut self, supports_search: bool) -> Self {
        self.supports_search = supports_search;
        self
    }

    /// The effective base URL: the override when present, else the
    /// provider default.
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| self.provider.default_base_url().to_string())
    }
}

impl Default for ModelConfig {
    /// The hardcoded fallback used when no settings exist: Gemini with
    /// vision and search enabled and an empty key.
    fn default() -> Self {
        Self::new(Provider::Gemini, DEFAULT_MODEL)
            .with_vision(true)
            .with_search(true)
    }
}

// ============================================================================
// Task Kinds
// ============================================================================

/// The closed set of user-facing capabilities a model can be picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Resume parsing from an uploaded document.
    Parsing,
    /// Tailored resume generation.
    Tailoring,
    /// Resume-to-job match scoring.
    Matching,
    /// Live job search and extraction.
    Search,
}

impl TaskKind {
    /// Returns all task kinds.
    pub fn all() -> &'static [TaskKind] {
        &[Self::Parsing, Self::Tailoring, Self::Matching, Self::Search]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Parsing => "Resume parsing",
            Self::Tailoring => "Resume tailoring",
            Self::Matching => "Match scoring",
            Self::Search => "Job search",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Global Settings
// ============================================================================

/// The user's model settings: one default config plus optional
/// per-task overrides.
///
/// An override, when present, is a complete [`ModelConfig`] snapshot
/// taken when the user customized that task. Resolution returns it
/// verbatim; nothing is merged field-by-field with the defaults. A task
/// with no override inherits the defaults verbatim. Callers that want an
/// override to share the global API key must copy the key into the
/// snapshot when creating it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// The default model configuration.
    pub defaults: ModelConfig,
    /// Per-task full-replacement overrides. A missing key means
    /// "inherit the defaults".
    #[serde(default)]
    pub overrides: HashMap<TaskKind, ModelConfig>,
}

impl GlobalSettings {
    /// Create settings with the given defaults and no overrides.
    pub fn new(defaults: ModelConfig) -> Self {
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Resolve the effective config for a task.
    ///
    /// Pure snapshot read: the stored override verbatim when one exists,
    /// otherwise the defaults. `None` asks for the defaults directly.
    /// Never fails.
    pub fn effective(&self, task: Option<TaskKind>) -> ModelConfig {
        task.and_then(|t| self.overrides.get(&t))
            .unwrap_or(&self.defaults)
            .clone()
    }

    /// Store a full-replacement override for a task.
    pub fn set_override(&mut self, task: TaskKind, config: ModelConfig) {
        self.overrides.insert(task, config);
    }

    /// Remove a task's override so it inherits the defaults again.
    pub fn clear_override(&mut self, task: TaskKind) {
        self.overrides.remove(&task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();
        assert_eq!(config.provider, Provider::Gemini);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.supports_vision);
        assert!(config.supports_search);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_effective_without_override_equals_defaults() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.effective(Some(TaskKind::Matching)), settings.effective(None));
        assert_eq!(settings.effective(None), settings.defaults);
    }

    #[test]
    fn test_override_is_returned_verbatim() {
        let mut settings = GlobalSettings::default();
        let custom = ModelConfig::new(Provider::Groq, "llama-3.3-70b-versatile")
            .with_api_key("gsk-test");
        settings.set_override(TaskKind::Matching, custom.clone());

        // Changing the defaults afterwards must not leak into the
        // stored snapshot.
        settings.defaults.api_key = "rotated".into();
        settings.defaults.model = "gemini-2.5-pro".into();

        assert_eq!(settings.effective(Some(TaskKind::Matching)), custom);
        assert_eq!(settings.effective(Some(TaskKind::Search)), settings.defaults);
    }

    #[test]
    fn test_clear_override_restores_inheritance() {
        let mut settings = GlobalSettings::default();
        settings.set_override(TaskKind::Search, ModelConfig::new(Provider::OpenAi, "gpt-4o"));
        settings.clear_override(TaskKind::Search);
        assert_eq!(settings.effective(Some(TaskKind::Search)), settings.defaults);
    }

    #[test]
    fn test_effective_base_url() {
        let config = ModelConfig::new(Provider::Custom, "llama3");
        assert_eq!(config.effective_base_url(), "http://localhost:11434/v1");

        let config = config.with_base_url("http://10.0.0.5:8080/v1/");
        assert_eq!(config.effective_base_url(), "http://10.0.0.5:8080/v1");
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let mut settings = GlobalSettings::default();
        settings.set_override(
            TaskKind::Tailoring,
            ModelConfig::new(Provider::Anthropic, "claude-sonnet-4-5").with_api_key("sk-ant"),
        );
        let json = serde_json::to_string(&settings).unwrap();
        let back: GlobalSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }
}
