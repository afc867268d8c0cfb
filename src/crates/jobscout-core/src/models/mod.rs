//! Domain types.
//!
//! - [`Resume`] - A stored resume (pasted or parsed from a document)
//! - [`Job`] - A job posting from search, extraction, or manual entry
//! - [`SearchFilters`] - User-selected search constraints
//! - [`JobAnalysis`] - Resume-to-job fit scoring output
//! - [`TrackedJob`] - A job moving through the application pipeline

mod analysis;
mod job;
mod resume;
mod tracked;

pub use analysis::JobAnalysis;
pub use job::{DatePosted, Job, JobType, SearchFilters, WorkMode};
pub use resume::Resume;
pub use tracked::{TrackStatus, TrackedJob};
