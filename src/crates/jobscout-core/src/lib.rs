//! Domain model and error classification for jobscout.
//!
//! This crate holds the types the rest of the workspace produces and
//! consumes: resumes, job postings, match analyses, the tracked-job
//! pipeline, and the classifier that maps raw error text onto the small
//! set of user-facing error kinds.
//!
//! Everything here is plain owned data. There is no I/O and no shared
//! mutable state; callers hold their own copies.

pub mod classify;
pub mod models;

pub use classify::{classify, ErrorKind};
pub use models::{
    DatePosted, Job, JobAnalysis, JobType, Resume, SearchFilters, TrackStatus, TrackedJob,
    WorkMode,
};
