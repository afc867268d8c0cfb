//! Google Gemini adapter.
//!
//! The one backend with native support for everything the tasks need:
//! inline binary parts for vision input, a structured-output schema via
//! `generationConfig`, and the grounded `googleSearch` tool.

use crate::config::ModelConfig;
use crate::error::{LlmError, Result};
use crate::providers::{extract_error_message, CompletionModel, REQUEST_TIMEOUT};
use crate::request::CompletionRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini generative-language API client.
#[derive(Clone)]
pub struct GeminiClient {
    config: ModelConfig,
    client: Client,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the request body from a normalized request.
    fn build_body(&self, request: &CompletionRequest) -> GeminiRequest {
        let mut parts = Vec::new();
        if let Some(attachment) = &request.attachment {
            parts.push(GeminiPart {
                text: None,
                inline_data: Some(GeminiInlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: attachment.base64(),
                }),
            });
        }
        parts.push(GeminiPart {
            text: Some(request.prompt.clone()),
            inline_data: None,
        });

        let generation_config = request.wants_json().then(|| GeminiGenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: request.schema.clone(),
        });

        let tools = request.use_search.then(|| {
            vec![GeminiTool {
                google_search: serde_json::json!({}),
            }]
        });

        GeminiRequest {
            system_instruction: request.system.as_ref().map(|s| GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: Some(s.clone()),
                    inline_data: None,
                }],
            }),
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config,
            tools,
        }
    }
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.effective_base_url(),
            self.config.model
        );

        let body = self.build_body(&request);

        // Gemini authenticates with the key as a query parameter.
        let response = self
            .client
            .post(&url)
            .query(&[("key", &self.config.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body).unwrap_or(body);

            return Err(if status.as_u16() == 401 || status.as_u16() == 403 {
                LlmError::Authentication(message)
            } else if status.as_u16() == 429 {
                LlmError::RateLimited(message)
            } else {
                LlmError::Provider(format!("Gemini API error {}: {}", status, message))
            });
        }

        let gemini_resp: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let candidate = gemini_resp
            .candidates
            .first()
            .ok_or_else(|| LlmError::InvalidResponse("Gemini returned no candidates".to_string()))?;

        let text = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    #[serde(rename = "googleSearch")]
    google_search: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}
