//! Google Custom Search JSON API client.

use crate::error::{FranklinError, Result};
use serde::Deserialize;
use tracing::{debug, instrument};

/// Default API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API rejects `num` outside 1..=10.
pub const MAX_RESULTS: u32 = 10;

/// A single search result.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchHit>,
}

/// Client for one API key / search engine pair.
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

impl GoogleSearchClient {
    pub fn new(http: reqwest::Client, api_key: &str, engine_id: &str) -> Self {
        Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
        }
    }

    /// Point the client at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query and return up to `num` hits.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, num: u32) -> Result<Vec<SearchHit>> {
        let num = num.clamp(1, MAX_RESULTS).to_string();

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail: String = body.chars().take(200).collect();
            return Err(FranklinError::Search(format!(
                "Google API returned {}: {}",
                status, detail
            )));
        }

        let parsed: SearchResponse = response.json().await?;
        debug!("Google returned {} items", parsed.items.len());
        Ok(parsed.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> GoogleSearchClient {
        GoogleSearchClient::new(reqwest::Client::new(), "test-key", "test-cx")
            .with_endpoint(&server.uri())
    }

    #[tokio::test]
    async fn test_search_sends_credentials_and_parses_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .and(query_param("q", "rust async"))
            .and(query_param("num", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "Async Rust", "link": "https://rust-lang.github.io/async-book/", "snippet": "The async book"},
                    {"title": "Tokio", "link": "https://tokio.rs/"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let hits = client(&server).search("rust async", 2).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Async Rust");
        assert_eq!(hits[1].link, "https://tokio.rs/");
        assert_eq!(hits[1].snippet, "");
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "customsearch#search"})))
            .mount(&server)
            .await;

        let hits = client(&server).search("nothing", 1).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_search_clamps_num() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("num", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).search("many", 50).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client(&server).search("rust", 1).await.unwrap_err();
        match err {
            FranklinError::Search(msg) => {
                assert!(msg.contains("403"));
                assert!(msg.contains("API key not valid"));
            }
            other => panic!("Expected Search error, got {:?}", other),
        }
    }
}
