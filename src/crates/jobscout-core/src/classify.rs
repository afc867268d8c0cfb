//! User-facing error classification.
//!
//! Every backend reports the same failure modes with different
//! vocabulary. The classifier inspects an error's text for the
//! characteristic substrings of each kind, in a fixed precedence order,
//! and maps it to exactly one [`ErrorKind`] for user feedback.
//!
//! The checks run against the lowercased message. Ordering matters:
//! authentication vocabulary is checked before the generic network
//! catch-alls, and specific capability failures before the parse and
//! server buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The taxonomy of user-facing failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    CorsBlocked,
    RateLimit,
    Network,
    Timeout,
    VisionUnsupported,
    GroundingUnavailable,
    ResponseParse,
    Server,
    ModelUnavailable,
    ContentBlocked,
    Unknown,
}

impl ErrorKind {
    /// Short user-facing description of this failure kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Authentication => "The API key was rejected. Check the key in settings.",
            Self::CorsBlocked => "The provider blocked the request origin. A proxy is required.",
            Self::RateLimit => "The provider is rate limiting requests. Wait and retry.",
            Self::Network => "The provider could not be reached. Check your connection.",
            Self::Timeout => "The request timed out.",
            Self::VisionUnsupported => "The selected model cannot read documents or images.",
            Self::GroundingUnavailable => "The selected model cannot run a live web search.",
            Self::ResponseParse => "The model returned something unreadable. Try again.",
            Self::Server => "The provider reported an internal error. Try again later.",
            Self::ModelUnavailable => "The selected model is unavailable on this provider.",
            Self::ContentBlocked => "The provider blocked the response for safety reasons.",
            Self::Unknown => "Something went wrong. See logs for details.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// Ordered rules: first kind whose any-substring matches wins.
const RULES: &[(ErrorKind, &[&str])] = &[
    (
        ErrorKind::Authentication,
        &[
            "api key",
            "api_key",
            "unauthorized",
            "401",
            "403",
            "invalid key",
            "authentication",
            "permission denied",
        ],
    ),
    (
        ErrorKind::RateLimit,
        &[
            "rate limit",
            "rate_limit",
            "429",
            "quota",
            "resource_exhausted",
            "too many requests",
        ],
    ),
    (
        ErrorKind::ContentBlocked,
        &["safety", "content_filter", "content blocked", "prohibited content"],
    ),
    (
        ErrorKind::ModelUnavailable,
        &[
            "model not found",
            "model_not_found",
            "no such model",
            "does not exist",
            "404",
            "decommissioned",
        ],
    ),
    (
        ErrorKind::VisionUnsupported,
        &["vision", "image input", "does not support images"],
    ),
    (
        ErrorKind::GroundingUnavailable,
        &["grounding", "web search", "search tool"],
    ),
    (
        ErrorKind::Timeout,
        &["timeout", "timed out", "deadline exceeded"],
    ),
    (
        ErrorKind::CorsBlocked,
        &["cors", "cross-origin", "browser-origin"],
    ),
    (
        ErrorKind::ResponseParse,
        &["parse", "unexpected token", "invalid json", "eof while parsing"],
    ),
    (
        ErrorKind::Server,
        &["500", "502", "503", "overloaded", "internal server", "internal error"],
    ),
    (
        ErrorKind::Network,
        &[
            "network",
            "connection refused",
            "connection reset",
            "dns",
            "failed to fetch",
            "error sending request",
            "unreachable",
        ],
    ),
];

/// Map raw error text to exactly one [`ErrorKind`].
pub fn classify(message: &str) -> ErrorKind {
    let haystack = message.to_lowercase();
    for (kind, needles) in RULES {
        if needles.iter().any(|n| haystack.contains(n)) {
            return *kind;
        }
    }
    ErrorKind::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_vocabulary() {
        assert_eq!(classify("HTTP 401 Unauthorized"), ErrorKind::Authentication);
        assert_eq!(classify("Invalid API key provided"), ErrorKind::Authentication);
        assert_eq!(classify("PERMISSION DENIED"), ErrorKind::Authentication);
    }

    #[test]
    fn test_auth_wins_over_network() {
        // Message carries both auth and network vocabulary; auth is
        // checked first.
        assert_eq!(
            classify("network failure while validating api key"),
            ErrorKind::Authentication
        );
    }

    #[test]
    fn test_rate_limit() {
        assert_eq!(classify("429 Too Many Requests"), ErrorKind::RateLimit);
        assert_eq!(classify("RESOURCE_EXHAUSTED: quota"), ErrorKind::RateLimit);
    }

    #[test]
    fn test_model_unavailable() {
        assert_eq!(
            classify("The model `gpt-9` does not exist"),
            ErrorKind::ModelUnavailable
        );
    }

    #[test]
    fn test_timeout_and_cors() {
        assert_eq!(classify("request timed out after 60s"), ErrorKind::Timeout);
        assert_eq!(classify("blocked by CORS policy"), ErrorKind::CorsBlocked);
    }

    #[test]
    fn test_parse_and_server() {
        assert_eq!(
            classify("expected value at line 1: could not parse"),
            ErrorKind::ResponseParse
        );
        assert_eq!(classify("503 Service Unavailable"), ErrorKind::Server);
    }

    #[test]
    fn test_network_fallthrough() {
        assert_eq!(classify("connection refused"), ErrorKind::Network);
        assert_eq!(classify("error sending request"), ErrorKind::Network);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(classify("something odd happened"), ErrorKind::Unknown);
    }
}
