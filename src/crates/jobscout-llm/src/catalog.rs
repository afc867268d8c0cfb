//! Model catalog fetching.
//!
//! Per-provider strategy for listing available models. Gemini and
//! Anthropic ship fixed catalogs (no network call); the
//! OpenAI-compatible family is queried live and normalized. Capability
//! flags are inferred with deliberately approximate id heuristics that
//! live in isolated pure functions so they can be swapped without
//! touching the fetch path.
//!
//! [`list_models`] never fails: any network or parse problem falls back
//! to a small static catalog where one exists, else an empty list.

use crate::error::Result;
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

const CATALOG_TIMEOUT: Duration = Duration::from_secs(15);

/// One catalog entry. Ephemeral: fetched for display, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier as the provider knows it.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether the model is believed to accept image/document input.
    pub supports_vision: bool,
    /// Context window size, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u32>,
    /// Whether the model has a free tier. `None` when the provider's
    /// catalog carries no free-tier notion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_free: Option<bool>,
}

impl ModelInfo {
    /// Create an entry with the id doubling as the display name.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            supports_vision: false,
            context_length: None,
            is_free: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the vision flag.
    pub fn with_vision(mut self, supports_vision: bool) -> Self {
        self.supports_vision = supports_vision;
        self
    }

    /// Set the context window.
    pub fn with_context_length(mut self, context_length: u32) -> Self {
        self.context_length = Some(context_length);
        self
    }

    /// Set the free-tier flag.
    pub fn with_free(mut self, is_free: bool) -> Self {
        self.is_free = Some(is_free);
        self
    }
}

/// List the models a provider offers.
///
/// Resolves to a (possibly empty) list for any combination of provider,
/// key, and base URL, including malformed URLs. Free models sort first,
/// then lexicographically by id.
pub async fn list_models(provider: Provider, api_key: &str, base_url: Option<&str>) -> Vec<ModelInfo> {
    let mut models = match provider {
        Provider::Gemini => gemini_catalog(),
        Provider::Anthropic => anthropic_catalog(),
        _ => match fetch_openai_compat(provider, api_key, base_url).await {
            Ok(models) => models,
            Err(e) => {
                warn!(provider = %provider, error = %e, "model listing failed, using static catalog");
                fallback_catalog(provider)
            }
        },
    };

    models.sort_by(|a, b| {
        let a_free = a.is_free.unwrap_or(false);
        let b_free = b.is_free.unwrap_or(false);
        b_free.cmp(&a_free).then_with(|| a.id.cmp(&b.id))
    });
    models
}

async fn fetch_openai_compat(
    provider: Provider,
    api_key: &str,
    base_url: Option<&str>,
) -> Result<Vec<ModelInfo>> {
    let base = base_url
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|| provider.default_base_url().to_string());
    let url = format!("{}/models", base);

    let client = reqwest::Client::builder().timeout(CATALOG_TIMEOUT).build()?;
    let mut req = client.get(&url);
    // Public catalogs (OpenRouter without a key) work unauthenticated.
    if !api_key.is_empty() {
        req = req.header("Authorization", format!("Bearer {}", api_key));
    }

    let response = req.send().await?.error_for_status()?;
    let listing: ListResponse = response.json().await?;

    let models = listing
        .data
        .into_iter()
        .filter(|entry| provider != Provider::OpenAi || is_chat_capable(&entry.id))
        .map(|entry| {
            let pricing_zero = entry
                .pricing
                .as_ref()
                .is_some_and(|p| p.prompt.as_deref() == Some("0") && p.completion.as_deref() == Some("0"));
            let vision = infer_vision(provider, &entry.id);
            let free = infer_free(provider, &entry.id, pricing_zero);
            let mut info = ModelInfo::new(&entry.id).with_vision(vision);
            if let Some(name) = entry.name {
                info = info.with_name(name);
            }
            if let Some(context_length) = entry.context_length {
                info = info.with_context_length(context_length);
            }
            if let Some(free) = free {
                info = info.with_free(free);
            }
            info
        })
        .collect();

    Ok(models)
}

// ============================================================================
// Capability Heuristics
// ============================================================================

/// Ids that indicate a chat-capable OpenAI model, as opposed to the
/// embedding/audio/image entries its catalog mixes in.
fn is_chat_capable(id: &str) -> bool {
    let id = id.to_lowercase();
    let chat_family = id.starts_with("gpt-")
        || id.starts_with("o1")
        || id.starts_with("o3")
        || id.starts_with("o4")
        || id.starts_with("chatgpt");
    let excluded = [
        "embed", "audio", "tts", "whisper", "dall-e", "image", "moderation", "realtime",
        "transcribe",
    ];
    chat_family && !excluded.iter().any(|t| id.contains(t))
}

/// Guess whether a model accepts image input from its id.
///
/// Inherently approximate. The documented rules, checked
/// case-insensitively:
/// - any id containing `vision`, `llava`, `-vl`, `4o`, `multimodal`,
///   or `pixtral`;
/// - OpenRouter ids containing `gemini`, `claude`, or `gpt-4.1`;
/// - Groq ids containing `llama-4`.
pub fn infer_vision(provider: Provider, id: &str) -> bool {
    let id = id.to_lowercase();
    let tokens = ["vision", "llava", "-vl", "4o", "multimodal", "pixtral"];
    if tokens.iter().any(|t| id.contains(t)) {
        return true;
    }
    match provider {
        Provider::OpenRouter => {
            id.contains("gemini") || id.contains("claude") || id.contains("gpt-4.1")
        }
        Provider::Groq => id.contains("llama-4"),
        _ => false,
    }
}

/// Guess free-tier status.
///
/// Groq models are free by provider identity; OpenRouter models are
/// free when the id carries the `:free` suffix or pricing is zero.
/// Other family members report `None` (unknown).
pub fn infer_free(provider: Provider, id: &str, pricing_zero: bool) -> Option<bool> {
    match provider {
        Provider::Groq => Some(true),
        Provider::OpenRouter => Some(id.to_lowercase().ends_with(":free") || pricing_zero),
        _ => None,
    }
}

// ============================================================================
// Static Catalogs
// ============================================================================

fn gemini_catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("gemini-2.5-pro")
            .with_name("Gemini 2.5 Pro")
            .with_vision(true)
            .with_context_length(1_048_576)
            .with_free(false),
        ModelInfo::new("gemini-2.5-flash")
            .with_name("Gemini 2.5 Flash")
            .with_vision(true)
            .with_context_length(1_048_576)
            .with_free(true),
        ModelInfo::new("gemini-2.5-flash-lite")
            .with_name("Gemini 2.5 Flash-Lite")
            .with_vision(true)
            .with_context_length(1_048_576)
            .with_free(true),
        ModelInfo::new("gemini-2.0-flash")
            .with_name("Gemini 2.0 Flash")
            .with_vision(true)
            .with_context_length(1_048_576)
            .with_free(true),
    ]
}

fn anthropic_catalog() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new("claude-opus-4-1")
            .with_name("Claude Opus 4.1")
            .with_vision(true)
            .with_context_length(200_000),
        ModelInfo::new("claude-sonnet-4-5")
            .with_name("Claude Sonnet 4.5")
            .with_vision(true)
            .with_context_length(200_000),
        ModelInfo::new("claude-3-7-sonnet-latest")
            .with_name("Claude 3.7 Sonnet")
            .with_vision(true)
            .with_context_length(200_000),
        ModelInfo::new("claude-3-5-haiku-latest")
            .with_name("Claude 3.5 Haiku")
            .with_vision(true)
            .with_context_length(200_000),
    ]
}

fn fallback_catalog(provider: Provider) -> Vec<ModelInfo> {
    match provider {
        Provider::OpenAi => vec![
            ModelInfo::new("gpt-4o").with_vision(true).with_context_length(128_000),
            ModelInfo::new("gpt-4o-mini").with_vision(true).with_context_length(128_000),
            ModelInfo::new("gpt-4.1-mini").with_context_length(1_047_576),
            ModelInfo::new("o4-mini").with_vision(true).with_context_length(200_000),
        ],
        Provider::Groq => vec![
            ModelInfo::new("llama-3.3-70b-versatile")
                .with_context_length(131_072)
                .with_free(true),
            ModelInfo::new("llama-3.1-8b-instant")
                .with_context_length(131_072)
                .with_free(true),
            ModelInfo::new("meta-llama/llama-4-scout-17b-16e-instruct")
                .with_vision(true)
                .with_context_length(131_072)
                .with_free(true),
        ],
        Provider::Deepseek => vec![
            ModelInfo::new("deepseek-chat").with_context_length(65_536),
            ModelInfo::new("deepseek-reasoner").with_context_length(65_536),
        ],
        // No sensible static list for a router or an arbitrary endpoint.
        _ => Vec::new(),
    }
}

// Listing wire types
#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(alias = "models")]
    data: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "context_window")]
    context_length: Option<u32>,
    #[serde(default)]
    pricing: Option<Pricing>,
}

#[derive(Debug, Deserialize)]
struct Pricing {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    completion: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_tokens() {
        assert!(infer_vision(Provider::OpenAi, "gpt-4o-mini"));
        assert!(infer_vision(Provider::Custom, "llava-13b"));
        assert!(infer_vision(Provider::Custom, "qwen2-VL-7b"));
        assert!(!infer_vision(Provider::OpenAi, "gpt-3.5-turbo"));
    }

    #[test]
    fn test_vision_provider_combinations() {
        assert!(infer_vision(Provider::OpenRouter, "google/gemini-2.5-flash"));
        assert!(infer_vision(Provider::OpenRouter, "anthropic/claude-sonnet-4-5"));
        assert!(infer_vision(Provider::Groq, "meta-llama/llama-4-scout-17b-16e-instruct"));
        // The combinations apply only to their own provider.
        assert!(!infer_vision(Provider::OpenAi, "gemini-like-id"));
    }

    #[test]
    fn test_free_heuristics() {
        assert_eq!(infer_free(Provider::Groq, "llama-3.1-8b-instant", false), Some(true));
        assert_eq!(
            infer_free(Provider::OpenRouter, "meta-llama/llama-3.3-70b-instruct:free", false),
            Some(true)
        );
        assert_eq!(infer_free(Provider::OpenRouter, "openai/gpt-4o", true), Some(true));
        assert_eq!(infer_free(Provider::OpenRouter, "openai/gpt-4o", false), Some(false));
        assert_eq!(infer_free(Provider::OpenAi, "gpt-4o", false), None);
    }

    #[test]
    fn test_chat_capable_filter() {
        assert!(is_chat_capable("gpt-4o"));
        assert!(is_chat_capable("o4-mini"));
        assert!(!is_chat_capable("text-embedding-3-small"));
        assert!(!is_chat_capable("gpt-4o-audio-preview"));
        assert!(!is_chat_capable("whisper-1"));
    }

    #[test]
    fn test_list_response_accepts_both_field_names() {
        let data: ListResponse = serde_json::from_str(r#"{"data": [{"id": "a"}]}"#).unwrap();
        assert_eq!(data.data[0].id, "a");
        let models: ListResponse = serde_json::from_str(r#"{"models": [{"id": "b"}]}"#).unwrap();
        assert_eq!(models.data[0].id, "b");
    }

    #[tokio::test]
    async fn test_static_catalogs_skip_network() {
        let gemini = list_models(Provider::Gemini, "", None).await;
        assert!(!gemini.is_empty());
        assert!(gemini.iter().any(|m| m.is_free == Some(true)));
        assert!(gemini.iter().all(|m| m.supports_vision));

        let anthropic = list_models(Provider::Anthropic, "", None).await;
        assert!(!anthropic.is_empty());
        assert!(anthropic.iter().all(|m| m.is_free.is_none()));
    }

    #[tokio::test]
    async fn test_free_models_sort_first() {
        let models = list_models(Provider::Gemini, "", None).await;
        let first_paid = models.iter().position(|m| m.is_free == Some(false));
        let last_free = models.iter().rposition(|m| m.is_free == Some(true));
        assert!(last_free.unwrap() < first_paid.unwrap());
    }

    #[tokio::test]
    async fn test_never_throws_on_malformed_base_url() {
        // The request cannot even be built; the fetcher still resolves
        // to a list.
        let models = list_models(Provider::Custom, "key", Some("not a url")).await;
        assert!(models.is_empty());

        let models = list_models(Provider::Deepseek, "", Some("http://127.0.0.1:1/nope")).await;
        assert_eq!(models.len(), 2);
    }
}
