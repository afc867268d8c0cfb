//! Resume parsing from an uploaded document.

use crate::error::{Result, TaskError};
use crate::prompts;
use jobscout_llm::{
    normalize, Attachment, CompletionModel, CompletionRequest, ModelConfig, Provider,
};
use serde::Deserialize;

/// Output of the resume parsing task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParsedResume {
    /// Candidate's name as read from the document.
    pub name: String,
    /// Full resume text.
    pub content: String,
    /// 0-100 estimate of capture completeness.
    pub confidence_score: u8,
}

/// Parse a resume document into text.
///
/// Gemini accepts PDF and image bytes inline and validates against a
/// schema, so its output is trusted and a parse failure propagates.
/// Every other provider must be vision-capable, gets the document as a
/// data-URL image part, and goes through the fence-stripping
/// normalizer. PDF input is rejected for non-Gemini providers before
/// any network traffic.
pub async fn parse_resume_from_document(
    model: &dyn CompletionModel,
    config: &ModelConfig,
    attachment: Attachment,
) -> Result<ParsedResume> {
    if config.provider != Provider::Gemini {
        if !config.supports_vision {
            return Err(TaskError::VisionUnsupported(config.model.clone()));
        }
        if attachment.is_pdf() {
            return Err(TaskError::UnsupportedFormat(
                "PDF resumes require a Gemini model; upload an image instead".to_string(),
            ));
        }
    }

    let request = if config.provider == Provider::Gemini {
        CompletionRequest::new(prompts::resume_parse_prompt())
            .with_schema(prompts::resume_schema())
            .with_attachment(attachment)
    } else {
        CompletionRequest::new(prompts::resume_parse_prompt())
            .json_object()
            .with_attachment(attachment)
    };

    let text = model.complete(request).await?;
    let parsed: ParsedResume = normalize::parse_json(&text)?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubModel;

    fn image() -> Attachment {
        Attachment::new("image/png", vec![1, 2, 3])
    }

    fn pdf() -> Attachment {
        Attachment::new("application/pdf", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_gemini_accepts_pdf() {
        let stub = StubModel::returning(
            r#"{"name": "Ada", "content": "Engineer", "confidence_score": 95}"#,
        );
        let config = ModelConfig::default();

        let parsed = parse_resume_from_document(&stub, &config, pdf()).await.unwrap();
        assert_eq!(parsed.name, "Ada");
        assert_eq!(parsed.confidence_score, 95);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_non_gemini_rejects_pdf_before_calling() {
        let stub = StubModel::returning("{}");
        let config = ModelConfig::new(Provider::OpenAi, "gpt-4o").with_vision(true);

        let err = parse_resume_from_document(&stub, &config, pdf()).await.unwrap_err();
        assert!(matches!(err, TaskError::UnsupportedFormat(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_vision_model_rejects_before_calling() {
        let stub = StubModel::returning("{}");
        let config = ModelConfig::new(Provider::Deepseek, "deepseek-chat");

        let err = parse_resume_from_document(&stub, &config, image()).await.unwrap_err();
        assert!(matches!(err, TaskError::VisionUnsupported(_)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_fenced_response_is_normalized() {
        let stub = StubModel::returning(
            "```json\n{\"name\": \"Ada\", \"content\": \"Engineer\", \"confidence_score\": 80}\n```",
        );
        let config = ModelConfig::new(Provider::OpenAi, "gpt-4o").with_vision(true);

        let parsed = parse_resume_from_document(&stub, &config, image()).await.unwrap();
        assert_eq!(parsed.name, "Ada");
    }

    #[tokio::test]
    async fn test_gemini_parse_failure_propagates() {
        let stub = StubModel::returning("I could not read the document.");
        let config = ModelConfig::default();

        let err = parse_resume_from_document(&stub, &config, pdf()).await.unwrap_err();
        assert!(matches!(err, TaskError::Llm(e) if e.is_parse()));
    }
}
