//! Resume-to-job match analysis.

use serde::{Deserialize, Serialize};

/// The outcome of scoring a job against the user's resume set.
///
/// Produced once per (job, resume-set) invocation of the matching task.
/// Re-analysis overwrites the previous record; nothing is merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAnalysis {
    /// Id of the analyzed job.
    pub job_id: String,
    /// Id of the best-fitting resume.
    pub best_resume_id: String,
    /// Fit score, 0-100.
    pub match_score: u8,
    /// One-sentence explanation of the score.
    pub reasoning: String,
    /// Keywords from the posting missing from the best resume, in the
    /// order the model reported them.
    pub missing_keywords: Vec<String>,
}

impl JobAnalysis {
    /// The degraded-but-renderable analysis returned when the model's
    /// output could not be parsed. Score zero, no keywords, and the first
    /// candidate resume (or empty when none were supplied).
    pub fn fallback(job_id: impl Into<String>, first_resume_id: Option<&str>) -> Self {
        Self {
            job_id: job_id.into(),
            best_resume_id: first_resume_id.unwrap_or_default().to_string(),
            match_score: 0,
            reasoning: "The model response could not be interpreted; no score is available."
                .to_string(),
            missing_keywords: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_shape() {
        let analysis = JobAnalysis::fallback("job-1", Some("res-1"));
        assert_eq!(analysis.match_score, 0);
        assert_eq!(analysis.best_resume_id, "res-1");
        assert!(analysis.missing_keywords.is_empty());
        assert!(!analysis.reasoning.is_empty());
    }

    #[test]
    fn test_fallback_without_resumes() {
        let analysis = JobAnalysis::fallback("job-1", None);
        assert_eq!(analysis.best_resume_id, "");
    }
}
