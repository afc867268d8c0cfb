//! Anthropic Claude adapter.
//!
//! Header-authenticated messages API: `x-api-key` plus a version
//! header, one user message per call. The backend has no structured
//! output mode, so a schema request becomes an explicit JSON-only
//! instruction appended to the message text. Direct browser-origin
//! calls are rejected by this backend without a proxy, which shapes the
//! fallback error message.

use crate::config::ModelConfig;
use crate::error::{LlmError, Result};
use crate::providers::{extract_error_message, CompletionModel, REQUEST_TIMEOUT};
use crate::request::CompletionRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: usize = 4096;

/// Anthropic messages API client.
#[derive(Clone)]
pub struct AnthropicClient {
    config: ModelConfig,
    client: Client,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// The user text, with the JSON instruction appended when the
    /// caller asked for structured output.
    fn user_text(request: &CompletionRequest) -> String {
        match &request.schema {
            Some(schema) => format!(
                "{}\n\nRespond with only a JSON value matching this schema, no prose:\n{}",
                request.prompt, schema
            ),
            None if request.json_output => format!(
                "{}\n\nRespond with only a JSON value, no prose.",
                request.prompt
            ),
            None => request.prompt.clone(),
        }
    }

    fn build_body(&self, request: &CompletionRequest) -> AnthropicRequest {
        let text = Self::user_text(request);

        let content = match &request.attachment {
            Some(attachment) => AnthropicContent::Blocks(vec![
                AnthropicBlock::Image {
                    source: AnthropicImageSource {
                        source_type: "base64".to_string(),
                        media_type: attachment.mime_type.clone(),
                        data: attachment.base64(),
                    },
                },
                AnthropicBlock::Text { text },
            ]),
            None => AnthropicContent::Text(text),
        };

        AnthropicRequest {
            model: self.config.model.clone(),
            max_tokens: MAX_TOKENS,
            system: request.system.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content,
            }],
        }
    }
}

#[async_trait]
impl CompletionModel for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = self.build_body(&request);

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body).unwrap_or_else(|| {
                "Anthropic rejected the request. Direct browser-origin calls are \
                 blocked without a proxy; also check the x-api-key."
                    .to_string()
            });

            return Err(if status.as_u16() == 401 {
                LlmError::Authentication(message)
            } else if status.as_u16() == 429 {
                LlmError::RateLimited(message)
            } else {
                LlmError::Provider(format!("Anthropic API error {}: {}", status, message))
            });
        }

        let anthropic_resp: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        // Text lives in the first content block.
        anthropic_resp
            .content
            .first()
            .and_then(|block| block.text.clone())
            .ok_or_else(|| {
                LlmError::InvalidResponse("Anthropic returned no text content".to_string())
            })
    }
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: AnthropicContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AnthropicContent {
    Text(String),
    Blocks(Vec<AnthropicBlock>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum AnthropicBlock {
    Image { source: AnthropicImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct AnthropicImageSource {
    #[serde(rename = "type")]
    source_type: String,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponseBlock {
    #[serde(default)]
    text: Option<String>,
}
