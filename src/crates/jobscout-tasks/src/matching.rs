//! Resume-to-job match scoring.

use crate::prompts;
use jobscout_core::{Job, JobAnalysis, Resume};
use jobscout_llm::{normalize, CompletionModel, CompletionRequest, ModelConfig, Provider};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct MatchResponse {
    best_resume_id: String,
    match_score: i64,
    reasoning: String,
    #[serde(default)]
    missing_keywords: Vec<String>,
}

/// Score a job against the candidate resumes.
///
/// Never fails: any model or parse failure degrades to the zero-score
/// fallback analysis so the caller always has something to render.
/// Scores outside 0-100 are clamped.
pub async fn analyze_job_match(
    model: &dyn CompletionModel,
    config: &ModelConfig,
    job: &Job,
    resumes: &[Resume],
) -> JobAnalysis {
    let first_resume_id = resumes.first().map(|r| r.id.as_str());

    let prompt = prompts::match_prompt(job, resumes);
    let request = if config.provider == Provider::Gemini {
        CompletionRequest::new(prompt).with_schema(prompts::match_schema())
    } else {
        CompletionRequest::new(prompt).json_object()
    };

    let text = match model.complete(request).await {
        Ok(text) => text,
        Err(e) => {
            warn!(job_id = %job.id, error = %e, "Match scoring call failed");
            return JobAnalysis::fallback(&job.id, first_resume_id);
        }
    };

    match normalize::parse_json::<MatchResponse>(&text) {
        Ok(response) => JobAnalysis {
            job_id: job.id.clone(),
            best_resume_id: response.best_resume_id,
            match_score: response.match_score.clamp(0, 100) as u8,
            reasoning: response.reasoning,
            missing_keywords: response.missing_keywords,
        },
        Err(e) => {
            warn!(job_id = %job.id, error = %e, "Match response was not parseable");
            JobAnalysis::fallback(&job.id, first_resume_id)
        }
    }
}

/// Analyze a batch of jobs strictly in array order, one at a time.
///
/// Serialized on purpose to bound concurrent outbound request volume.
pub async fn analyze_jobs(
    model: &dyn CompletionModel,
    config: &ModelConfig,
    jobs: &[Job],
    resumes: &[Resume],
) -> Vec<JobAnalysis> {
    let mut analyses = Vec::with_capacity(jobs.len());
    for job in jobs {
        analyses.push(analyze_job_match(model, config, job, resumes).await);
    }
    analyses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubModel;
    use jobscout_llm::LlmError;

    fn fixtures() -> (Job, Vec<Resume>) {
        let job = Job::new("Rust Engineer", "Acme", "Remote", "Build services");
        let resumes = vec![
            Resume::new("Backend", "Rust, Tokio, Postgres"),
            Resume::new("Frontend", "TypeScript, React"),
        ];
        (job, resumes)
    }

    #[tokio::test]
    async fn test_parsed_analysis() {
        let (job, resumes) = fixtures();
        let stub = StubModel::returning(format!(
            r#"{{"best_resume_id": "{}", "match_score": 87,
                "reasoning": "Strong systems background.",
                "missing_keywords": ["Kubernetes"]}}"#,
            resumes[0].id
        ));

        let analysis = analyze_job_match(&stub, &ModelConfig::default(), &job, &resumes).await;
        assert_eq!(analysis.job_id, job.id);
        assert_eq!(analysis.best_resume_id, resumes[0].id);
        assert_eq!(analysis.match_score, 87);
        assert_eq!(analysis.missing_keywords, vec!["Kubernetes"]);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_clamped() {
        let (job, resumes) = fixtures();
        let stub = StubModel::returning(
            r#"{"best_resume_id": "x", "match_score": 250, "reasoning": "r", "missing_keywords": []}"#,
        );

        let analysis = analyze_job_match(&stub, &ModelConfig::default(), &job, &resumes).await;
        assert_eq!(analysis.match_score, 100);
    }

    #[tokio::test]
    async fn test_prose_response_degrades_to_fallback() {
        let (job, resumes) = fixtures();
        let stub = StubModel::returning("This job looks like a fair match overall.");

        let analysis = analyze_job_match(&stub, &ModelConfig::default(), &job, &resumes).await;
        assert_eq!(analysis.match_score, 0);
        assert_eq!(analysis.best_resume_id, resumes[0].id);
        assert!(analysis.missing_keywords.is_empty());
    }

    #[tokio::test]
    async fn test_call_failure_degrades_to_fallback() {
        let (job, resumes) = fixtures();
        let stub = StubModel::failing(LlmError::RateLimited("slow down".into()));

        let analysis = analyze_job_match(&stub, &ModelConfig::default(), &job, &resumes).await;
        assert_eq!(analysis.match_score, 0);
        assert_eq!(analysis.job_id, job.id);
    }

    #[tokio::test]
    async fn test_non_gemini_request_asks_for_json_object() {
        let (job, resumes) = fixtures();
        let stub = StubModel::returning("{}");
        let config = ModelConfig::new(Provider::Groq, "llama-3.3-70b-versatile");

        analyze_job_match(&stub, &config, &job, &resumes).await;
        let request = &stub.requests()[0];
        assert!(request.json_output);
        assert!(request.schema.is_none());
    }

    #[tokio::test]
    async fn test_batch_preserves_job_order() {
        let (_, resumes) = fixtures();
        let jobs = vec![
            Job::new("A", "Acme", "Remote", ""),
            Job::new("B", "Globex", "Berlin", ""),
        ];
        let stub = StubModel::returning("not json");

        let analyses = analyze_jobs(&stub, &ModelConfig::default(), &jobs, &resumes).await;
        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].job_id, jobs[0].id);
        assert_eq!(analyses[1].job_id, jobs[1].id);
        assert_eq!(stub.calls(), 2);
    }
}
