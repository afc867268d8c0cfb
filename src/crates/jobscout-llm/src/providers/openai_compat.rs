//! OpenAI-compatible family adapter.
//!
//! One client covers OpenAI, OpenRouter, Groq, Deepseek, and
//! user-defined custom endpoints: they all accept
//! `POST {base}/chat/completions` with the same body. The differences
//! are the base URL, whether a bearer token is sent, and OpenRouter's
//! attribution headers.

use crate::config::ModelConfig;
use crate::error::{LlmError, Result};
use crate::provider::Provider;
use crate::providers::{extract_error_message, CompletionModel, REQUEST_TIMEOUT};
use crate::request::CompletionRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_SITE_URL: &str = "https://github.com/jobscout/jobscout";
const DEFAULT_SITE_NAME: &str = "jobscout";

/// Chat-completions client for the OpenAI-compatible family.
#[derive(Clone)]
pub struct OpenAiCompatClient {
    config: ModelConfig,
    client: Client,
}

impl OpenAiCompatClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ModelConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn build_body(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: ChatContent::Text(system.clone()),
            });
        }

        let content = match &request.attachment {
            Some(attachment) => ChatContent::Parts(vec![
                ChatPart::ImageUrl {
                    image_url: ImageUrl {
                        url: attachment.to_data_url(),
                    },
                },
                ChatPart::Text {
                    text: request.prompt.clone(),
                },
            ]),
            None => ChatContent::Text(request.prompt.clone()),
        };
        messages.push(ChatMessage {
            role: "user".to_string(),
            content,
        });

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            response_format: request.wants_json().then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompatClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.effective_base_url());
        let body = self.build_body(&request);

        let mut req = self.client.post(&url).json(&body);

        if !self.config.api_key.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.config.api_key));
        }

        // OpenRouter asks callers to identify themselves.
        if self.config.provider == Provider::OpenRouter {
            let referer = self.config.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL);
            let title = self.config.site_name.as_deref().unwrap_or(DEFAULT_SITE_NAME);
            req = req.header("HTTP-Referer", referer).header("X-Title", title);
        }

        let response = req.send().await.map_err(LlmError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body).unwrap_or_else(|| status.to_string());

            return Err(if status.as_u16() == 401 {
                LlmError::Authentication(message)
            } else if status.as_u16() == 429 {
                LlmError::RateLimited(message)
            } else {
                LlmError::Provider(format!(
                    "{} API error {}: {}",
                    self.config.provider.display_name(),
                    status,
                    message
                ))
            });
        }

        let chat_resp: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        chat_resp
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".to_string()))
    }
}

// Chat-completions wire types
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: ChatContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ChatPart {
    ImageUrl { image_url: ImageUrl },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Attachment;

    fn client(provider: Provider) -> OpenAiCompatClient {
        OpenAiCompatClient::new(ModelConfig::new(provider, "test-model"))
    }

    #[test]
    fn test_plain_body() {
        let body = client(Provider::OpenAi).build_body(&CompletionRequest::new("Hello"));
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].role, "user");
        assert!(body.response_format.is_none());

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["content"], "Hello");
    }

    #[test]
    fn test_system_message_comes_first() {
        let request = CompletionRequest::new("Hello").with_system("Be terse");
        let body = client(Provider::Deepseek).build_body(&request);
        assert_eq!(body.messages[0].role, "system");
        assert_eq!(body.messages[1].role, "user");
    }

    #[test]
    fn test_json_output_sets_response_format() {
        let body = client(Provider::Groq).build_body(&CompletionRequest::new("Hi").json_object());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_schema_also_sets_response_format() {
        let request =
            CompletionRequest::new("Hi").with_schema(serde_json::json!({"type": "object"}));
        let body = client(Provider::OpenAi).build_body(&request);
        assert!(body.response_format.is_some());
    }

    #[test]
    fn test_attachment_becomes_image_url_part() {
        let request = CompletionRequest::new("Read this")
            .with_attachment(Attachment::new("image/jpeg", b"abc".to_vec()));
        let json =
            serde_json::to_value(client(Provider::OpenAi).build_body(&request)).unwrap();

        let content = &json["messages"][0]["content"];
        assert!(content.is_array());
        assert_eq!(content[0]["type"], "image_url");
        assert_eq!(content[0]["image_url"]["url"], "data:image/jpeg;base64,YWJj");
        assert_eq!(content[1]["type"], "text");
    }
}
