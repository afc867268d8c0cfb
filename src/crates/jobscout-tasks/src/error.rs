//! Task orchestrator error types.

use jobscout_llm::LlmError;
use thiserror::Error;

/// Errors surfaced by the task orchestrators.
#[derive(Debug, Error)]
pub enum TaskError {
    /// The underlying completion call failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The configured model cannot read documents or images.
    #[error("The selected model ({0}) does not support vision input. Choose a vision-capable model for resume parsing.")]
    VisionUnsupported(String),

    /// The document format is not accepted by the configured provider.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Live job search needs Gemini with grounded search enabled.
    #[error("Job search requires a Gemini model with web search enabled. Check the model settings for the search task.")]
    SearchUnavailable,

    /// The grounded extraction strategy failed and no fallback remained.
    #[error("Grounded lookup of the job posting failed: {0}")]
    GroundingFailed(String),

    /// The scrape-and-extract strategy failed.
    #[error("Could not read the job posting page: {0}. Ensure the URL is public.")]
    ScrapeFailed(String),
}

/// Convenience alias for task results.
pub type Result<T> = std::result::Result<T, TaskError>;
