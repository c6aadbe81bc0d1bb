//! Web search skill backed by the Google Custom Search JSON API.
//!
//! Exposes one function (default name `web_search`) taking a `query`. Each
//! hit is reported with its title, URL and snippet, and optionally with text
//! extracted from the page itself.

mod extract;
mod google;

pub use extract::{extract_text, PageFetcher};
pub use google::{GoogleSearchClient, SearchHit, DEFAULT_ENDPOINT};

use super::Skill;
use crate::agent::PromptSection;
use crate::error::{FranklinError, Result};
use crate::swml::{FunctionResult, SwaigFunction};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Timeout for API calls and page fetches.
const HTTP_TIMEOUT_SECS: u64 = 15;

const DEFAULT_NO_RESULTS_MESSAGE: &str = "I couldn't find any results for '{query}'. \
This might be due to a very specific query or temporary issues. \
Try rephrasing your search or asking about a different topic.";

/// Parameters accepted by the skill. Unknown keys are ignored.
#[derive(Debug, Clone, Deserialize)]
struct WebSearchParams {
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    search_engine_id: Option<String>,
    #[serde(default = "default_num_results")]
    num_results: u32,
    /// Seconds to wait between page fetches.
    #[serde(default)]
    delay: f64,
    #[serde(default = "default_max_content_length")]
    max_content_length: usize,
    #[serde(default = "default_no_results_message")]
    no_results_message: String,
    #[serde(default = "default_tool_name")]
    tool_name: String,
    #[serde(default = "default_fetch_content")]
    fetch_content: bool,
    #[serde(default)]
    endpoint: Option<String>,
}

fn default_num_results() -> u32 {
    1
}

fn default_max_content_length() -> usize {
    2000
}

fn default_no_results_message() -> String {
    DEFAULT_NO_RESULTS_MESSAGE.to_string()
}

fn default_tool_name() -> String {
    WebSearchSkill::NAME.to_string()
}

fn default_fetch_content() -> bool {
    true
}

/// A search hit, with page text when it could be fetched.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub hit: SearchHit,
    pub content: Option<String>,
}

/// The `web_search` skill.
pub struct WebSearchSkill {
    tool_name: String,
    client: GoogleSearchClient,
    fetcher: Option<PageFetcher>,
    num_results: u32,
    delay: Duration,
    max_content_length: usize,
    no_results_message: String,
}

impl WebSearchSkill {
    pub const NAME: &'static str = "web_search";

    /// Build the skill from its parameter map.
    ///
    /// Fails when `api_key` or `search_engine_id` is missing, null or blank.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self> {
        let params: WebSearchParams = serde_json::from_value(Value::Object(params.clone()))
            .map_err(|e| FranklinError::skill(Self::NAME, format!("invalid parameters: {}", e)))?;

        let api_key = required(params.api_key.as_deref(), "api_key")?;
        let engine_id = required(params.search_engine_id.as_deref(), "search_engine_id")?;

        if params.tool_name.trim().is_empty() {
            return Err(FranklinError::skill(Self::NAME, "tool_name must not be empty"));
        }
        let delay = Duration::try_from_secs_f64(params.delay)
            .map_err(|e| FranklinError::skill(Self::NAME, format!("invalid delay: {}", e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| FranklinError::skill(Self::NAME, format!("HTTP client: {}", e)))?;

        let mut client = GoogleSearchClient::new(http.clone(), api_key, engine_id);
        if let Some(endpoint) = params.endpoint.as_deref().filter(|e| !e.is_empty()) {
            client = client.with_endpoint(endpoint);
        }

        Ok(Self {
            tool_name: params.tool_name,
            client,
            fetcher: params.fetch_content.then(|| PageFetcher::new(http)),
            num_results: params.num_results.clamp(1, google::MAX_RESULTS),
            delay,
            max_content_length: params.max_content_length,
            no_results_message: params.no_results_message,
        })
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn num_results(&self) -> u32 {
        self.num_results
    }

    /// Search and format the results as the spoken-response text.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<String> {
        let hits = self.client.search(query, self.num_results).await?;
        if hits.is_empty() {
            info!("No results");
            return Ok(self.no_results_message.replace("{query}", query));
        }

        let mut results = Vec::with_capacity(hits.len());
        for (i, hit) in hits.into_iter().enumerate() {
            let content = match &self.fetcher {
                Some(fetcher) => {
                    if i > 0 && !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                    match fetcher.fetch_text(&hit.link, self.max_content_length).await {
                        Ok(text) if !text.is_empty() => Some(text),
                        Ok(_) => None,
                        Err(e) => {
                            debug!(url = %hit.link, error = %e, "Page fetch failed, using snippet only");
                            None
                        }
                    }
                }
                None => None,
            };
            results.push(SearchResult { hit, content });
        }

        info!("Returning {} results", results.len());
        Ok(format_results(query, &results))
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FranklinError::skill(
            WebSearchSkill::NAME,
            format!("missing required parameter '{}'", key),
        )),
    }
}

/// Render results in the layout the AI is prompted to read.
pub fn format_results(query: &str, results: &[SearchResult]) -> String {
    let noun = if results.len() == 1 { "result" } else { "results" };
    let mut out = format!("I found {} {} for '{}':\n", results.len(), noun, query);

    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!("\n=== RESULT {} ===\n", i + 1));
        out.push_str(&format!("Title: {}\n", result.hit.title));
        out.push_str(&format!("URL: {}\n", result.hit.link));
        out.push_str(&format!("Snippet: {}\n", result.hit.snippet));
        if let Some(content) = &result.content {
            out.push_str(&format!("Content:\n{}\n", content));
        }
    }

    out.trim_end().to_string()
}

#[async_trait]
impl Skill for WebSearchSkill {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Search the web for information using Google Custom Search"
    }

    fn functions(&self) -> Vec<SwaigFunction> {
        vec![SwaigFunction::new(
            &self.tool_name,
            "Search the web for current information on any topic",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    }
                },
                "required": ["query"]
            }),
        )]
    }

    fn hints(&self) -> Vec<String> {
        ["search", "web search", "look up", "google"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn global_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("web_search_enabled".to_string(), Value::Bool(true));
        data.insert(
            "search_provider".to_string(),
            Value::String("Google Custom Search".to_string()),
        );
        data
    }

    fn prompt_sections(&self) -> Vec<PromptSection> {
        vec![PromptSection::new("Web Search Capability")
            .body(format!(
                "You can search the internet for current information using the {} tool.",
                self.tool_name
            ))
            .bullets([
                format!("Use the {} tool when users ask for current or factual information", self.tool_name),
                "Summarize the most relevant findings instead of reading results verbatim".to_string(),
                "Mention the source website when sharing information".to_string(),
            ])]
    }

    async fn execute(&self, function: &str, args: &Value) -> Result<FunctionResult> {
        if function != self.tool_name {
            return Err(FranklinError::FunctionNotFound(function.to_string()));
        }

        let query = args
            .get("query")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if query.is_empty() {
            return Ok(FunctionResult::new("Please provide a search query."));
        }

        match self.search(query).await {
            Ok(text) => Ok(FunctionResult::new(text)),
            Err(e) => {
                warn!(error = %e, "Web search failed");
                Ok(FunctionResult::new(format!(
                    "Sorry, I couldn't complete the search for '{}' right now. Please try again in a moment.",
                    query
                )))
            }
        }
    }
}
