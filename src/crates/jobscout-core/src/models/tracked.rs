//! Tracked-job pipeline state.

use crate::models::{Job, JobAnalysis};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline status of a tracked job.
///
/// Transitions are user-driven and unconstrained: any status may follow
/// any other, and there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackStatus {
    Saved,
    Applied,
    Interviewing,
    Offer,
    Rejected,
}

impl TrackStatus {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved => "Saved",
            Self::Applied => "Applied",
            Self::Interviewing => "Interviewing",
            Self::Offer => "Offer",
            Self::Rejected => "Rejected",
        }
    }

    /// All statuses in pipeline order.
    pub fn all() -> &'static [TrackStatus] {
        &[
            Self::Saved,
            Self::Applied,
            Self::Interviewing,
            Self::Offer,
            Self::Rejected,
        ]
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A job the user is tracking through the application pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedJob {
    /// The underlying posting.
    pub job: Job,
    /// The most recent match analysis, if one was run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<JobAnalysis>,
    /// Current pipeline status.
    pub status: TrackStatus,
    /// Set every time the job enters [`TrackStatus::Applied`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<DateTime<Utc>>,
}

impl TrackedJob {
    /// Start tracking a job with the given initial status.
    ///
    /// An initial status of `Applied` stamps the applied timestamp, the
    /// same as a later transition would.
    pub fn new(job: Job, status: TrackStatus) -> Self {
        let applied_at = (status == TrackStatus::Applied).then(Utc::now);
        Self {
            job,
            analysis: None,
            status,
            applied_at,
        }
    }

    /// Move the job to a new status.
    ///
    /// Entering `Applied` always (re)stamps the applied timestamp, even
    /// when re-entering it from a later stage. Other transitions leave
    /// the timestamp as it was.
    pub fn set_status(&mut self, status: TrackStatus) {
        if status == TrackStatus::Applied {
            self.applied_at = Some(Utc::now());
        }
        self.status = status;
    }

    /// Attach (or replace) the match analysis for this job.
    pub fn set_analysis(&mut self, analysis: JobAnalysis) {
        self.analysis = Some(analysis);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> Job {
        Job::new("Engineer", "Acme", "Remote", "Build things")
    }

    #[test]
    fn test_new_saved_has_no_applied_date() {
        let tracked = TrackedJob::new(sample_job(), TrackStatus::Saved);
        assert!(tracked.applied_at.is_none());
    }

    #[test]
    fn test_new_applied_stamps_date() {
        let tracked = TrackedJob::new(sample_job(), TrackStatus::Applied);
        assert!(tracked.applied_at.is_some());
    }

    #[test]
    fn test_reentering_applied_restamps() {
        let mut tracked = TrackedJob::new(sample_job(), TrackStatus::Applied);
        let first = tracked.applied_at.unwrap();

        tracked.set_status(TrackStatus::Rejected);
        assert_eq!(tracked.applied_at, Some(first));

        tracked.set_status(TrackStatus::Applied);
        assert!(tracked.applied_at.unwrap() >= first);
    }

    #[test]
    fn test_any_transition_is_permitted() {
        let mut tracked = TrackedJob::new(sample_job(), TrackStatus::Offer);
        tracked.set_status(TrackStatus::Saved);
        assert_eq!(tracked.status, TrackStatus::Saved);
        tracked.set_status(TrackStatus::Interviewing);
        assert_eq!(tracked.status, TrackStatus::Interviewing);
    }
}
