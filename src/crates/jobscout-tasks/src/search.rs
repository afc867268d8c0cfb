//! Grounded job search.

use crate::error::{Result, TaskError};
use crate::prompts;
use jobscout_core::{Job, SearchFilters};
use jobscout_llm::{normalize, CompletionModel, CompletionRequest, ModelConfig, Provider};
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
struct FoundJob {
    #[serde(default)]
    id: Option<String>,
    title: String,
    company: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    posted_at: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

impl From<FoundJob> for Job {
    fn from(found: FoundJob) -> Self {
        Job {
            id: found
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: found.title,
            company: found.company,
            location: found.location.unwrap_or_else(|| "Unknown".to_string()),
            summary: found.summary.unwrap_or_default(),
            url: found.url,
            posted_at: found.posted_at,
            source: Some(found.source.unwrap_or_else(|| "Web".to_string())),
        }
    }
}

/// Search the live web for job postings.
///
/// Only Gemini can run a grounded search, and only with the capability
/// enabled; anything else fails with [`TaskError::SearchUnavailable`]
/// before any network call. A response that cannot be parsed as a job
/// array yields an empty list, since "no results" is a renderable
/// outcome.
pub async fn search_jobs(
    model: &dyn CompletionModel,
    config: &ModelConfig,
    query: &str,
    filters: &SearchFilters,
) -> Result<Vec<Job>> {
    if config.provider != Provider::Gemini || !config.supports_search {
        return Err(TaskError::SearchUnavailable);
    }

    let request = CompletionRequest::new(prompts::search_prompt(query, filters)).with_search();
    let text = model.complete(request).await?;

    match normalize::parse_json::<Vec<FoundJob>>(&text) {
        Ok(found) => Ok(found.into_iter().map(Job::from).collect()),
        Err(e) => {
            warn!(error = %e, "Search response was not a job array, returning no results");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubModel;

    fn search_config() -> ModelConfig {
        ModelConfig::default()
    }

    #[tokio::test]
    async fn test_non_gemini_rejected_before_calling() {
        let stub = StubModel::returning("[]");
        let config = ModelConfig::new(Provider::OpenAi, "gpt-4o").with_search(true);

        let err = search_jobs(&stub, &config, "rust", &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::SearchUnavailable));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_gemini_without_search_capability_rejected() {
        let stub = StubModel::returning("[]");
        let config = ModelConfig::default().with_search(false);

        let err = search_jobs(&stub, &config, "rust", &SearchFilters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::SearchUnavailable));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_jobs_are_backfilled() {
        let stub = StubModel::returning(
            r#"[{"title": "Engineer", "company": "Acme"},
                {"id": "j-2", "title": "Dev", "company": "Globex",
                 "location": "Berlin", "summary": "Ship", "source": "Indeed"}]"#,
        );

        let jobs = search_jobs(&stub, &search_config(), "rust", &SearchFilters::default())
            .await
            .unwrap();
        assert_eq!(jobs.len(), 2);
        assert!(!jobs[0].id.is_empty());
        assert_eq!(jobs[0].location, "Unknown");
        assert_eq!(jobs[0].source.as_deref(), Some("Web"));
        assert_eq!(jobs[1].id, "j-2");
        assert_eq!(jobs[1].source.as_deref(), Some("Indeed"));
    }

    #[tokio::test]
    async fn test_unparseable_response_yields_empty_list() {
        let stub = StubModel::returning("I found no openings today.");

        let jobs = search_jobs(&stub, &search_config(), "rust", &SearchFilters::default())
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_carries_query_and_search_flag() {
        let stub = StubModel::returning("[]");
        let filters = SearchFilters {
            locations: vec!["Remote".into()],
            ..SearchFilters::default()
        };

        search_jobs(&stub, &search_config(), "senior rust", &filters)
            .await
            .unwrap();
        let request = &stub.requests()[0];
        assert!(request.use_search);
        assert!(request.prompt.contains("senior rust"));
        assert!(request.prompt.contains("Locations: Remote"));
    }
}
