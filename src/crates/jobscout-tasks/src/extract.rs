//! Job extraction from a posting URL.

use crate::error::{Result, TaskError};
use crate::prompts;
use crate::scrape::{PageFetcher, ProxyFetcher};
use jobscout_core::Job;
use jobscout_llm::{normalize, CompletionModel, CompletionRequest, ModelConfig, Provider};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct ExtractedJob {
    title: String,
    company: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

impl ExtractedJob {
    fn into_job(self, url: &str) -> Job {
        let mut job = Job::new(
            self.title,
            self.company,
            self.location.unwrap_or_else(|| "Unknown".to_string()),
            self.summary.unwrap_or_default(),
        );
        job.url = Some(url.to_string());
        job.source = Some("Web".to_string());
        job
    }
}

/// Extract a job posting's details from its URL.
///
/// Pages are fetched through the allorigins proxy; see
/// [`extract_job_details_with`] for the strategy chain.
pub async fn extract_job_details(
    model: &dyn CompletionModel,
    config: &ModelConfig,
    url: &str,
) -> Result<Job> {
    extract_job_details_with(model, &ProxyFetcher, config, url).await
}

/// Extract a job posting's details using an explicit page fetcher.
///
/// Two strategies. When the config is Gemini with search enabled, a
/// grounded web-search lookup is tried first; its failure is logged and
/// falls through. The scrape strategy fetches the page, reduces it to
/// text, and asks the model to extract the fields. When the scrape path
/// fails the caller gets [`TaskError::ScrapeFailed`]; a grounded
/// failure whose page also cannot be fetched distinguishes itself as
/// [`TaskError::GroundingFailed`].
pub async fn extract_job_details_with(
    model: &dyn CompletionModel,
    fetcher: &dyn PageFetcher,
    config: &ModelConfig,
    url: &str,
) -> Result<Job> {
    let use_grounding = config.provider == Provider::Gemini && config.supports_search;

    let grounding_failure = if use_grounding {
        match extract_grounded(model, url).await {
            Ok(job) => return Ok(job),
            Err(e) => {
                warn!(url, error = %e, "Grounded extraction failed, falling back to scrape");
                Some(e)
            }
        }
    } else {
        None
    };

    match extract_scraped(model, fetcher, url).await {
        Ok(job) => Ok(job),
        // When grounding already failed and the page cannot be fetched
        // either, report the grounding failure; it is the closer cause.
        Err(TaskError::ScrapeFailed(scrape_msg)) => match grounding_failure {
            Some(TaskError::Llm(e)) => Err(TaskError::GroundingFailed(format!(
                "{e}; page fetch also failed: {scrape_msg}"
            ))),
            _ => Err(TaskError::ScrapeFailed(scrape_msg)),
        },
        Err(e) => Err(e),
    }
}

async fn extract_grounded(model: &dyn CompletionModel, url: &str) -> Result<Job> {
    let request = CompletionRequest::new(prompts::grounded_extract_prompt(url)).with_search();
    let text = model.complete(request).await?;
    let extracted: ExtractedJob = normalize::parse_json(&text)?;
    Ok(extracted.into_job(url))
}

async fn extract_scraped(
    model: &dyn CompletionModel,
    fetcher: &dyn PageFetcher,
    url: &str,
) -> Result<Job> {
    let page_text = fetcher.fetch_text(url).await?;

    let request = CompletionRequest::new(prompts::scraped_extract_prompt(&page_text)).json_object();
    let text = model
        .complete(request)
        .await
        .map_err(|e| TaskError::ScrapeFailed(e.to_string()))?;

    let extracted: ExtractedJob =
        normalize::parse_json(&text).map_err(|e| TaskError::ScrapeFailed(e.to_string()))?;
    Ok(extracted.into_job(url))
}
