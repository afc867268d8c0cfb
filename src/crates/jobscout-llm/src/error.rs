//! Error types for LLM provider calls.

use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when calling an LLM provider.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// The provider answered with an error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The response arrived but its shape was not usable.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The assistant text could not be parsed into the expected JSON.
    #[error("Response parse error: {0}")]
    Parse(String),

    /// Failed to serialize or deserialize request data.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LlmError {
    /// Whether this error came from the model's text output rather than
    /// the transport or the provider. Task orchestrators use this to
    /// decide between a degraded default result and propagation.
    pub fn is_parse(&self) -> bool {
        matches!(self, LlmError::Parse(_))
    }

    /// Whether this error is an authentication failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, LlmError::Authentication(_))
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_predicate() {
        assert!(LlmError::Parse("bad json".into()).is_parse());
        assert!(!LlmError::Provider("500".into()).is_parse());
    }

    #[test]
    fn test_auth_predicate() {
        assert!(LlmError::Authentication("bad key".into()).is_auth());
        assert!(!LlmError::RateLimited("429".into()).is_auth());
    }
}
