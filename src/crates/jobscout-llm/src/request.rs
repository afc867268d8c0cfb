//! The normalized completion request handed to every adapter.

use base64::Engine;

/// A binary document or image sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// MIME type, e.g. `image/png` or `application/pdf`.
    pub mime_type: String,
    /// Raw bytes.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Create an attachment.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Whether this is a PDF document. Only the Gemini backend accepts
    /// PDF input; orchestrators reject it for everyone else.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case("application/pdf")
    }

    /// Whether this is an image.
    pub fn is_image(&self) -> bool {
        self.mime_type.to_ascii_lowercase().starts_with("image/")
    }

    /// Base64 payload without the data-URL prefix.
    pub fn base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// `data:` URL form, as the OpenAI-compatible family wants it.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64())
    }
}

/// One normalized request for assistant text.
///
/// Adapters translate this into their backend's shape; fields a backend
/// cannot express are approximated (Anthropic turns `schema` into an
/// in-prompt instruction) or ignored where the orchestrator has already
/// gated on capability.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// The user prompt.
    pub prompt: String,
    /// Optional system instruction.
    pub system: Option<String>,
    /// Structured-output schema (JSON Schema subset the backends share).
    pub schema: Option<serde_json::Value>,
    /// Ask for a JSON object response without a full schema.
    pub json_output: bool,
    /// Enable the grounded web-search tool (Gemini only).
    pub use_search: bool,
    /// Inline document or image.
    pub attachment: Option<Attachment>,
}

impl CompletionRequest {
    /// Create a plain text request.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Request schema-validated structured output.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Request a JSON object response (no schema).
    pub fn json_object(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Enable grounded web search.
    pub fn with_search(mut self) -> Self {
        self.use_search = true;
        self
    }

    /// Attach a document or image.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Whether the caller expects JSON back, with or without a schema.
    pub fn wants_json(&self) -> bool {
        self.json_output || self.schema.is_some()
    }
}
