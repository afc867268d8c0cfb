//! Tailored resume rendering (LaTeX and HTML).

use crate::error::Result;
use crate::prompts;
use jobscout_core::{Job, Resume};
use jobscout_llm::{normalize, CompletionModel, CompletionRequest};

/// Generate a complete LaTeX resume document, optionally tailored to a
/// job. Output is a full source file with any wrapping code fence
/// removed.
pub async fn generate_latex_resume(
    model: &dyn CompletionModel,
    resume: &Resume,
    job: Option<&Job>,
) -> Result<String> {
    let request = CompletionRequest::new(prompts::latex_resume_prompt(resume, job));
    let text = model.complete(request).await?;
    Ok(normalize::strip_code_fences(&text))
}

/// Generate a standalone inline-styled HTML resume page, optionally
/// tailored to a job.
pub async fn generate_html_resume(
    model: &dyn CompletionModel,
    resume: &Resume,
    job: Option<&Job>,
) -> Result<String> {
    let request = CompletionRequest::new(prompts::html_resume_prompt(resume, job));
    let text = model.complete(request).await?;
    Ok(normalize::strip_code_fences(&text))
}
