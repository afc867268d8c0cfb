//! Provider adapters.
//!
//! One adapter per backend family, all behind [`CompletionModel`].
//! [`model_for`] selects the adapter by exhaustive match over
//! [`Provider`], so a new backend is a compile-time-checked addition.

mod anthropic;
mod gemini;
mod openai_compat;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai_compat::OpenAiCompatClient;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::provider::Provider;
use crate::request::CompletionRequest;
use async_trait::async_trait;
use std::time::Duration;

/// Request timeout shared by all adapters. No retries: one attempt per
/// invocation, errors propagate to the task orchestrator.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

/// A backend that turns one normalized request into raw assistant text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Perform a single completion call and return the assistant text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Build the adapter for a config's provider.
pub fn model_for(config: &ModelConfig) -> Box<dyn CompletionModel> {
    match config.provider {
        Provider::Gemini => Box::new(GeminiClient::new(config.clone())),
        Provider::Anthropic => Box::new(AnthropicClient::new(config.clone())),
        Provider::OpenAi
        | Provider::OpenRouter
        | Provider::Groq
        | Provider::Deepseek
        | Provider::Custom => Box::new(OpenAiCompatClient::new(config.clone())),
    }
}

/// Pull a human-usable message out of a provider error body.
///
/// Both `{"error": {"message": "..."}}` and `{"error": "..."}` shapes
/// appear in the wild; anything else yields `None`.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    error.as_str().map(|s| s.to_string())
}
