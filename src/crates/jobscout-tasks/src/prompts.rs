//! Prompt and schema construction.
//!
//! Every prompt the orchestrators send lives here, next to the JSON
//! schemas the structured-output path uses. Keeping them together makes
//! the contract between prompt text and expected shape reviewable in
//! one place.

use jobscout_core::{Job, Resume, SearchFilters};
use serde_json::json;

/// Character budget for a resume embedded in a prompt.
pub(crate) const RESUME_BUDGET: usize = 6_000;

/// Truncate on a char boundary to at most `budget` characters.
pub(crate) fn truncate(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ============================================================================
// Resume parsing
// ============================================================================

pub(crate) fn resume_parse_prompt() -> String {
    "Read the attached resume document. Extract the candidate's full name and \
     the complete resume text, preserving section structure as plain text. \
     Estimate a confidence score from 0 to 100 for how completely the text was \
     captured. Output: JSON only, no text outside braces."
        .to_string()
}

pub(crate) fn resume_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "content": {"type": "string"},
            "confidence_score": {"type": "integer"}
        },
        "required": ["name", "content", "confidence_score"]
    })
}

// ============================================================================
// Job extraction
// ============================================================================

pub(crate) fn grounded_extract_prompt(url: &str) -> String {
    format!(
        "Use web search to find the job posting at this URL and summarize it:\n\
         {url}\n\n\
         Return a JSON object with exactly these string fields: \
         \"title\", \"company\", \"location\", \"summary\". \
         Output: JSON only, no text outside braces."
    )
}

pub(crate) fn scraped_extract_prompt(page_text: &str) -> String {
    format!(
        "The following is the text of a job posting page. Extract the job \
         title, the company name, the location, and a two-sentence summary of \
         the role.\n\n\
         Return a JSON object with exactly these string fields: \
         \"title\", \"company\", \"location\", \"summary\". \
         Output: JSON only, no text outside braces.\n\n\
         PAGE TEXT:\n{page_text}"
    )
}

// ============================================================================
// Job search
// ============================================================================

pub(crate) fn search_prompt(query: &str, filters: &SearchFilters) -> String {
    let mut prompt = format!(
        "Use web search to find current job openings matching this query:\n\
         {query}\n"
    );
    let summary = filters.summary();
    if !summary.is_empty() {
        prompt.push_str("\nApply these constraints:\n");
        prompt.push_str(&summary);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nReturn a JSON array of 6 to 10 job objects. Each object has string \
         fields \"title\", \"company\", \"location\", \"summary\", and \
         optionally \"url\", \"posted_at\", \"source\". \
         Output: JSON only, no text outside the array.",
    );
    prompt
}

// ============================================================================
// Match analysis
// ============================================================================

pub(crate) fn match_prompt(job: &Job, resumes: &[Resume]) -> String {
    let mut prompt = format!(
        "Score how well the candidate's resumes fit this job posting.\n\n\
         JOB: {} at {} ({})\n{}\n\nRESUMES:\n",
        job.title, job.company, job.location, job.summary
    );
    for resume in resumes {
        prompt.push_str(&format!(
            "--- resume id: {} (name: {}) ---\n{}\n",
            resume.id,
            resume.name,
            truncate(&resume.content, RESUME_BUDGET)
        ));
    }
    prompt.push_str(
        "\nPick the best-fitting resume. Return a JSON object with fields: \
         \"best_resume_id\" (string, one of the ids above), \"match_score\" \
         (integer 0-100), \"reasoning\" (one sentence), \"missing_keywords\" \
         (array of strings from the posting absent from that resume). \
         Output: JSON only, no text outside braces.",
    );
    prompt
}

pub(crate) fn match_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "best_resume_id": {"type": "string"},
            "match_score": {"type": "integer"},
            "reasoning": {"type": "string"},
            "missing_keywords": {"type": "array", "items": {"type": "string"}}
        },
        "required": ["best_resume_id", "match_score", "reasoning", "missing_keywords"]
    })
}

// ============================================================================
// Query generation
// ============================================================================

pub(crate) fn search_query_prompt(resume_content: &str) -> String {
    format!(
        "Based on this resume, write one short job-search query (3 to 6 \
         words) for the role the candidate is best suited to. Respond with \
         the query text only, no quotes, no explanation.\n\nRESUME:\n{}",
        truncate(resume_content, RESUME_BUDGET)
    )
}

pub(crate) fn dork_query_prompt(resume_content: &str) -> String {
    format!(
        "Based on this resume, write one search-engine dork query that finds \
         job postings for the candidate's strongest role. Combine an exact \
         job-title phrase in double quotes with site: operators for major job \
         boards, OR-joined. Respond with the query text only, no backticks, \
         no explanation.\n\nRESUME:\n{}",
        truncate(resume_content, RESUME_BUDGET)
    )
}

// ============================================================================
// Resume rendering
// ============================================================================

pub(crate) fn latex_resume_prompt(resume: &Resume, job: Option<&Job>) -> String {
    let mut prompt = format!(
        "Produce a complete, compilable LaTeX resume document from this \
         content. Use a clean single-column layout.\n\nRESUME:\n{}\n",
        truncate(&resume.content, RESUME_BUDGET)
    );
    if let Some(job) = job {
        prompt.push_str(&format!(
            "\nTailor emphasis toward this job: {} at {}. {}\n",
            job.title, job.company, job.summary
        ));
    }
    prompt.push_str("\nRespond with the LaTeX source only, starting at \\documentclass.");
    prompt
}

pub(crate) fn html_resume_prompt(resume: &Resume, job: Option<&Job>) -> String {
    let mut prompt = format!(
        "Produce a complete standalone HTML resume page with inline CSS from \
         this content. No external assets.\n\nRESUME:\n{}\n",
        truncate(&resume.content, RESUME_BUDGET)
    );
    if let Some(job) = job {
        prompt.push_str(&format!(
            "\nTailor emphasis toward this job: {} at {}. {}\n",
            job.title, job.company, job.summary
        ));
    }
    prompt.push_str("\nRespond with the HTML source only, starting at <!DOCTYPE html>.");
    prompt
}
