//! Response normalization.
//!
//! Models routinely wrap their JSON in Markdown code fences, with or
//! without a language tag. The normalizer strips that framing and
//! nothing else: surrounding prose is not tolerated, and the prompts are
//! written strongly enough that the model returns JSON only.

use crate::error::{LlmError, Result};
use serde::de::DeserializeOwned;

/// Strip a framing Markdown code fence from raw model output.
///
/// Handles a leading ``` with an optional language tag on the fence
/// line, and an optional trailing fence. Text without a leading fence
/// is returned trimmed and otherwise untouched.
pub fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    let Some(mut rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };

    // A language tag occupies the remainder of the fence line.
    if let Some(newline) = rest.find('\n') {
        let tag = rest[..newline].trim();
        if tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            rest = &rest[newline + 1..];
        }
    } else if rest.chars().all(|c| c.is_ascii_alphanumeric()) {
        // The whole output was a bare fence line.
        return String::new();
    }

    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim().to_string()
}

/// Strip fences and parse the remainder into a typed value.
pub fn parse_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| LlmError::Parse(e.to_string()))
}
