//! Fetch result pages and reduce them to readable text.

use crate::error::{FranklinError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("franklin/", env!("CARGO_PKG_VERSION"));

// The regex crate has no backreferences, so each block element is listed.
static NON_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<!--.*?-->|<head\b.*?</head>|<script\b.*?</script>|<style\b.*?</style>|<noscript\b.*?</noscript>|<nav\b.*?</nav>|<header\b.*?</header>|<footer\b.*?</footer>|<aside\b.*?</aside>|<svg\b.*?</svg>|<form\b.*?</form>",
    )
    .expect("Invalid regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Downloads pages for content extraction.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: reqwest::Client,
}

impl PageFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch `url` and return at most `max_len` characters of its text.
    #[instrument(skip(self))]
    pub async fn fetch_text(&self, url: &str, max_len: usize) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        if !content_type.contains("html") && !content_type.starts_with("text/") {
            return Err(FranklinError::Search(format!(
                "Unsupported content type: {}",
                content_type
            )));
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes", body.len());
        Ok(extract_text(&body, max_len))
    }
}

/// Strip markup from an HTML document and truncate the result.
pub fn extract_text(html: &str, max_len: usize) -> String {
    let without_blocks = NON_CONTENT.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_blocks, " ");
    let decoded = decode_entities(&without_tags);
    let collapsed = WHITESPACE.replace_all(decoded.trim(), " ");
    truncate(&collapsed, max_len)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Truncate on a character boundary, marking the cut with "...".
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len).collect();
    format!("{}...", cut.trim_end())
}
