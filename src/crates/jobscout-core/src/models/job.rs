//! Job posting and search filter types.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A job posting.
///
/// Produced by the search or extraction tasks, or entered manually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Company name.
    pub company: String,
    /// Location (city, country, or "Remote").
    pub location: String,
    /// Short description of the role.
    pub summary: String,
    /// Link to the posting, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// When the posting went up, as reported by the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_at: Option<String>,
    /// Where the posting was found (board name, "Web", etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Job {
    /// Create a job with a generated id and the required fields set.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            company: company.into(),
            location: location.into(),
            summary: summary.into(),
            url: None,
            posted_at: None,
            source: None,
        }
    }
}

// ============================================================================
// Search Filters
// ============================================================================

/// Employment type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl JobType {
    /// Human-readable label, used in prompts and UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::PartTime => "Part-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Work arrangement filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkMode {
    Remote,
    Hybrid,
    OnSite,
}

impl WorkMode {
    /// Human-readable label, used in prompts and UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// How recently the posting went up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePosted {
    Past24Hours,
    PastWeek,
    PastMonth,
}

impl DatePosted {
    /// Human-readable label, used in prompts and UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Past24Hours => "past 24 hours",
            Self::PastWeek => "past week",
            Self::PastMonth => "past month",
        }
    }
}

impl fmt::Display for DatePosted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// User-selected constraints for a job search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Acceptable locations. Empty means anywhere.
    #[serde(default)]
    pub locations: Vec<String>,
    /// Acceptable employment types. Empty means any.
    #[serde(default)]
    pub job_types: Vec<JobType>,
    /// Acceptable work arrangements. Empty means any.
    #[serde(default)]
    pub work_modes: Vec<WorkMode>,
    /// Recency constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<DatePosted>,
}

impl SearchFilters {
    /// Human-readable one-per-line summary for embedding in prompts.
    ///
    /// Returns an empty string when no filter is set.
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();
        if !self.locations.is_empty() {
            lines.push(format!("Locations: {}", self.locations.join(", ")));
        }
        if !self.job_types.is_empty() {
            let labels: Vec<&str> = self.job_types.iter().map(JobType::label).collect();
            lines.push(format!("Job types: {}", labels.join(", ")));
        }
        if !self.work_modes.is_empty() {
            let labels: Vec<&str> = self.work_modes.iter().map(WorkMode::label).collect();
            lines.push(format!("Work modes: {}", labels.join(", ")));
        }
        if let Some(date) = self.date_posted {
            lines.push(format!("Posted within: {}", date));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_new_defaults_optionals() {
        let job = Job::new("Engineer", "Acme", "Remote", "Build things");
        assert!(job.url.is_none());
        assert!(job.posted_at.is_none());
        assert!(job.source.is_none());
        assert!(!job.id.is_empty());
    }

    #[test]
    fn test_filters_summary_empty() {
        assert_eq!(SearchFilters::default().summary(), "");
    }

    #[test]
    fn test_filters_summary_full() {
        let filters = SearchFilters {
            locations: vec!["Berlin".into(), "Remote".into()],
            job_types: vec![JobType::FullTime, JobType::Contract],
            work_modes: vec![WorkMode::Remote],
            date_posted: Some(DatePosted::PastWeek),
        };
        let summary = filters.summary();
        assert!(summary.contains("Locations: Berlin, Remote"));
        assert!(summary.contains("Job types: Full-time, Contract"));
        assert!(summary.contains("Work modes: Remote"));
        assert!(summary.contains("Posted within: past week"));
    }

    #[test]
    fn test_job_serde_skips_absent_optionals() {
        let job = Job::new("Engineer", "Acme", "Remote", "Build things");
        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("url").is_none());
        assert!(json.get("posted_at").is_none());
    }
}
