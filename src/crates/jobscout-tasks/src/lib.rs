//! Task orchestrators for jobscout.
//!
//! Each orchestrator resolves its own effective model configuration,
//! gates on capability before any network traffic, and defines its own
//! degraded result where "nothing found" is renderable. The
//! [`Assistant`] facade wires settings resolution to the provider
//! router for callers that want one entry point.

pub mod assistant;
pub mod error;
pub mod extract;
pub mod matching;
mod prompts;
pub mod query;
pub mod render;
pub mod resume;
pub mod scrape;
pub mod search;
pub mod testing;

pub use assistant::Assistant;
pub use error::{Result, TaskError};
pub use extract::{extract_job_details, extract_job_details_with};
pub use scrape::{PageFetcher, ProxyFetcher};
pub use matching::{analyze_job_match, analyze_jobs};
pub use query::{generate_dork_query, generate_job_dork, generate_search_query};
pub use render::{generate_html_resume, generate_latex_resume};
pub use resume::{parse_resume_from_document, ParsedResume};
pub use search::search_jobs;
