//! Search-query and dork generation.

use crate::error::Result;
use crate::prompts;
use jobscout_llm::{CompletionModel, CompletionRequest};

/// Query used when the model returns nothing usable.
const FALLBACK_QUERY: &str = "Software Engineer";

/// Job boards targeted by generated dorks.
const DORK_DOMAINS: &[&str] = &[
    "linkedin.com/jobs",
    "indeed.com",
    "glassdoor.com",
    "jobs.lever.co",
    "boards.greenhouse.io",
    "wellfound.com",
];

/// Remove quoting artifacts models wrap short answers in.
///
/// Backtick wrapping always goes. A surrounding quote pair is removed
/// only when no other quote appears inside, since interior quotes are
/// real dork syntax.
fn clean_query(raw: &str) -> String {
    let mut text = raw.trim();
    while text.len() >= 2 && text.starts_with('`') && text.ends_with('`') {
        text = text[1..text.len() - 1].trim();
    }
    for quote in ['"', '\''] {
        if text.len() >= 2
            && text.starts_with(quote)
            && text.ends_with(quote)
            && !text[1..text.len() - 1].contains(quote)
        {
            text = text[1..text.len() - 1].trim();
        }
    }
    text.to_string()
}

/// Generate a short job-search query from resume content.
pub async fn generate_search_query(
    model: &dyn CompletionModel,
    resume_content: &str,
) -> Result<String> {
    let request = CompletionRequest::new(prompts::search_query_prompt(resume_content));
    let text = model.complete(request).await?;

    let query = clean_query(&text);
    if query.is_empty() {
        return Ok(FALLBACK_QUERY.to_string());
    }
    Ok(query)
}

/// Generate a search-engine dork query from resume content.
pub async fn generate_dork_query(
    model: &dyn CompletionModel,
    resume_content: &str,
) -> Result<String> {
    let request = CompletionRequest::new(prompts::dork_query_prompt(resume_content));
    let text = model.complete(request).await?;

    let query = clean_query(&text);
    if query.is_empty() {
        return Ok(FALLBACK_QUERY.to_string());
    }
    Ok(query)
}

/// Build a deterministic job-board dork for one known job.
///
/// Pure and local: exact-phrase title and company, OR-joined `site:`
/// terms over the fixed board list. Bit-exact for the same inputs.
pub fn generate_job_dork(title: &str, company: &str) -> String {
    let sites = DORK_DOMAINS
        .iter()
        .map(|d| format!("site:{d}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    format!("\"{title}\" \"{company}\" ({sites})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubModel;

    #[tokio::test]
    async fn test_query_is_cleaned_of_quotes() {
        let stub = StubModel::returning("  \"senior rust engineer\"  ");
        let query = generate_search_query(&stub, "rust stuff").await.unwrap();
        assert_eq!(query, "senior rust engineer");
    }

    #[tokio::test]
    async fn test_backticks_are_stripped() {
        let stub = StubModel::returning("`\"rust developer\" site:indeed.com`");
        let query = generate_dork_query(&stub, "rust stuff").await.unwrap();
        assert_eq!(query, "\"rust developer\" site:indeed.com");
    }

    #[tokio::test]
    async fn test_empty_output_falls_back() {
        let stub = StubModel::returning("   ");
        let query = generate_search_query(&stub, "anything").await.unwrap();
        assert_eq!(query, "Software Engineer");
    }

    #[test]
    fn test_job_dork_is_deterministic_and_exact() {
        let dork = generate_job_dork("Rust Engineer", "Acme Corp");
        assert_eq!(
            dork,
            "\"Rust Engineer\" \"Acme Corp\" (site:linkedin.com/jobs OR site:indeed.com \
             OR site:glassdoor.com OR site:jobs.lever.co OR site:boards.greenhouse.io \
             OR site:wellfound.com)"
        );
        assert_eq!(dork, generate_job_dork("Rust Engineer", "Acme Corp"));
    }
}
