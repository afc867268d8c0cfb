//! The assistant facade.
//!
//! Wires settings resolution to adapter construction so callers invoke
//! tasks without touching the router. Each call resolves its task's
//! effective config as a fresh snapshot, so settings edits between
//! calls take effect immediately.

use crate::error::Result;
use crate::extract::extract_job_details;
use crate::matching::{analyze_job_match, analyze_jobs};
use crate::query::{generate_dork_query, generate_search_query};
use crate::render::{generate_html_resume, generate_latex_resume};
use crate::resume::{parse_resume_from_document, ParsedResume};
use crate::search::search_jobs;
use jobscout_core::{Job, JobAnalysis, Resume, SearchFilters};
use jobscout_llm::{model_for, Attachment, GlobalSettings, TaskKind};

/// High-level entry point over all LLM-backed tasks.
#[derive(Debug, Clone, Default)]
pub struct Assistant {
    settings: GlobalSettings,
}

impl Assistant {
    /// Create an assistant over the given settings.
    pub fn new(settings: GlobalSettings) -> Self {
        Self { settings }
    }

    /// Replace the settings; takes effect on the next call.
    pub fn set_settings(&mut self, settings: GlobalSettings) {
        self.settings = settings;
    }

    /// The current settings.
    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Parse a resume from an uploaded document.
    pub async fn parse_resume(&self, attachment: Attachment) -> Result<ParsedResume> {
        let config = self.settings.effective(Some(TaskKind::Parsing));
        let model = model_for(&config);
        parse_resume_from_document(model.as_ref(), &config, attachment).await
    }

    /// Extract a job posting's details from its URL.
    pub async fn extract_job(&self, url: &str) -> Result<Job> {
        let config = self.settings.effective(Some(TaskKind::Search));
        let model = model_for(&config);
        extract_job_details(model.as_ref(), &config, url).await
    }

    /// Search the live web for jobs.
    pub async fn search_jobs(&self, query: &str, filters: &SearchFilters) -> Result<Vec<Job>> {
        let config = self.settings.effective(Some(TaskKind::Search));
        let model = model_for(&config);
        search_jobs(model.as_ref(), &config, query, filters).await
    }

    /// Score one job against the candidate resumes.
    pub async fn analyze_job(&self, job: &Job, resumes: &[Resume]) -> JobAnalysis {
        let config = self.settings.effective(Some(TaskKind::Matching));
        let model = model_for(&config);
        analyze_job_match(model.as_ref(), &config, job, resumes).await
    }

    /// Score a batch of jobs, strictly in order.
    pub async fn analyze_jobs(&self, jobs: &[Job], resumes: &[Resume]) -> Vec<JobAnalysis> {
        let config = self.settings.effective(Some(TaskKind::Matching));
        let model = model_for(&config);
        analyze_jobs(model.as_ref(), &config, jobs, resumes).await
    }

    /// Generate a job-search query from resume content.
    pub async fn search_query_from_resume(&self, resume_content: &str) -> Result<String> {
        let config = self.settings.effective(Some(TaskKind::Search));
        let model = model_for(&config);
        generate_search_query(model.as_ref(), resume_content).await
    }

    /// Generate a search-engine dork query from resume content.
    pub async fn dork_query_from_resume(&self, resume_content: &str) -> Result<String> {
        let config = self.settings.effective(Some(TaskKind::Search));
        let model = model_for(&config);
        generate_dork_query(model.as_ref(), resume_content).await
    }

    /// Generate a tailored LaTeX resume.
    pub async fn latex_resume(&self, resume: &Resume, job: Option<&Job>) -> Result<String> {
        let config = self.settings.effective(Some(TaskKind::Tailoring));
        let model = model_for(&config);
        generate_latex_resume(model.as_ref(), resume, job).await
    }

    /// Generate a tailored HTML resume.
    pub async fn html_resume(&self, resume: &Resume, job: Option<&Job>) -> Result<String> {
        let config = self.settings.effective(Some(TaskKind::Tailoring));
        let model = model_for(&config);
        generate_html_resume(model.as_ref(), resume, job).await
    }
}
