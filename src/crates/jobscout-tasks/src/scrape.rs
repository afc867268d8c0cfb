//! Page scraping through a CORS-bypass proxy.
//!
//! The extraction fallback pulls raw page HTML via allorigins and
//! reduces it to plain text small enough to embed in a prompt. The
//! fetch sits behind [`PageFetcher`] so the extraction chain can be
//! driven without a network.

use crate::error::{Result, TaskError};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

const PROXY_URL: &str = "https://api.allorigins.win/get";
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Character budget for scraped page text embedded in a prompt.
pub(crate) const PAGE_BUDGET: usize = 15_000;

/// A source of cleaned page text for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page and return its visible text, reduced to the
    /// prompt budget. Failures are [`TaskError::ScrapeFailed`].
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// The production fetcher: goes through the allorigins CORS proxy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyFetcher;

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    #[serde(default)]
    contents: Option<String>,
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| TaskError::ScrapeFailed(e.to_string()))?;

        let response = client
            .get(PROXY_URL)
            .query(&[("url", url)])
            .send()
            .await
            .map_err(|e| TaskError::ScrapeFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TaskError::ScrapeFailed(format!(
                "proxy returned {}",
                response.status()
            )));
        }

        let proxied: ProxyResponse = response
            .json()
            .await
            .map_err(|e| TaskError::ScrapeFailed(e.to_string()))?;

        let html = proxied
            .contents
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| TaskError::ScrapeFailed("proxy returned an empty page".to_string()))?;

        let text = clean_html(&html);
        debug!(url, chars = text.len(), "Scraped page text");
        Ok(text)
    }
}

/// Reduce raw HTML to whitespace-collapsed visible text, truncated to
/// the prompt budget.
pub(crate) fn clean_html(html: &str) -> String {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    static SPACE: OnceLock<Regex> = OnceLock::new();

    // Elements whose content is never posting text. Spelled out per
    // tag since this regex engine has no backreferences.
    let noise = NOISE.get_or_init(|| {
        Regex::new(concat!(
            r"(?is)<script\b[^>]*>.*?</script>",
            r"|<style\b[^>]*>.*?</style>",
            r"|<nav\b[^>]*>.*?</nav>",
            r"|<footer\b[^>]*>.*?</footer>",
            r"|<iframe\b[^>]*>.*?</iframe>",
            r"|<svg\b[^>]*>.*?</svg>",
            r"|<noscript\b[^>]*>.*?</noscript>",
            r"|<img\b[^>]*/?>",
        ))
        .unwrap()
    });
    let tag = TAG.get_or_init(|| Regex::new(r"(?s)<[^>]+>").unwrap());
    let space = SPACE.get_or_init(|| Regex::new(r"\s+").unwrap());

    let without_noise = noise.replace_all(html, " ");
    let without_tags = tag.replace_all(&without_noise, " ");
    let collapsed = space.replace_all(&without_tags, " ");
    let text = collapsed.trim();

    match text.char_indices().nth(PAGE_BUDGET) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_strips_noise_elements() {
        let html = r#"<html><head><style>body{color:red}</style></head>
            <body><nav>Menu</nav><h1>Rust Engineer</h1>
            <script>tracking();</script><p>Build services</p>
            <footer>Copyright</footer></body></html>"#;
        let text = clean_html(html);
        assert!(text.contains("Rust Engineer"));
        assert!(text.contains("Build services"));
        assert!(!text.contains("Menu"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("Copyright"));
        assert!(!text.contains("color:red"));
    }

    #[test]
    fn test_clean_html_collapses_whitespace() {
        let text = clean_html("<p>a</p>\n\n\t<p>b</p>");
        assert_eq!(text, "a b");
    }

    #[test]
    fn test_clean_html_truncates_to_budget() {
        let html = format!("<p>{}</p>", "word ".repeat(10_000));
        assert_eq!(clean_html(&html).chars().count(), PAGE_BUDGET);
    }

    #[test]
    fn test_clean_html_drops_self_closing_images() {
        let text = clean_html(r#"<p>before</p><img src="x.png"/><p>after</p>"#);
        assert_eq!(text, "before after");
    }
}
