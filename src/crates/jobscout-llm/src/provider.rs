//! Supported LLM backends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of supported backends.
///
/// Gemini speaks its own generative-language API, Anthropic its
/// header-authenticated messages API, and the rest are all
/// OpenAI-compatible chat-completions endpoints. `Custom` is the
/// user-supplied member of that family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Gemini (native API: vision, schema, grounded search).
    Gemini,
    /// Anthropic Claude (header-auth messages API).
    Anthropic,
    /// OpenAI.
    OpenAi,
    /// OpenRouter (OpenAI-compatible, attribution headers).
    OpenRouter,
    /// Groq.
    Groq,
    /// Deepseek.
    Deepseek,
    /// User-defined OpenAI-compatible endpoint.
    Custom,
}

impl Provider {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Google Gemini",
            Self::Anthropic => "Anthropic",
            Self::OpenAi => "OpenAI",
            Self::OpenRouter => "OpenRouter",
            Self::Groq => "Groq",
            Self::Deepseek => "Deepseek",
            Self::Custom => "Custom endpoint",
        }
    }

    /// Returns all provider variants.
    pub fn all() -> &'static [Provider] {
        &[
            Self::Gemini,
            Self::Anthropic,
            Self::OpenAi,
            Self::OpenRouter,
            Self::Groq,
            Self::Deepseek,
            Self::Custom,
        ]
    }

    /// Whether this backend speaks the OpenAI chat-completions dialect.
    pub fn is_openai_compatible(&self) -> bool {
        matches!(
            self,
            Self::OpenAi | Self::OpenRouter | Self::Groq | Self::Deepseek | Self::Custom
        )
    }

    /// The default base URL for this backend. `Custom` falls back to a
    /// local loopback endpoint when the user supplied none.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAi => "https://api.openai.com/v1",
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::Deepseek => "https://api.deepseek.com/v1",
            Self::Custom => "http://localhost:11434/v1",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    /// Parses the lowercase wire name, e.g. `openrouter`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "openrouter" => Ok(Self::OpenRouter),
            "groq" => Ok(Self::Groq),
            "deepseek" => Ok(Self::Deepseek),
            "custom" => Ok(Self::Custom),
            other => Err(format!(
                "unknown provider '{other}' (expected one of: gemini, anthropic, openai, openrouter, groq, deepseek, custom)"
            )),
        }
    }
}
