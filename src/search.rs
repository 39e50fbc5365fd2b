//! Search provider client.
//!
//! Talks to a Custom Search JSON API style endpoint: one GET per query with
//! the search text, API key and engine id as query parameters, answered by a
//! JSON body whose `items` array holds the hits.
//!
//! # Failure Handling
//!
//! A failed query is never fatal. Transport errors, non-success statuses and
//! malformed bodies are logged and the query yields no results; see
//! [`SearchClient::search`]. Use [`SearchClient::try_search`] to observe the
//! error instead.

use crate::config::Config;
use crate::error::SearchError;
use crate::models::{RawResult, SearchResponse};
use crate::utils::truncate_for_log;
use std::fmt;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use url::Url;

/// HTTP client for the search provider.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    engine_id: String,
}

impl fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl SearchClient {
    pub fn new(endpoint: Url, api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.endpoint.clone(),
            config.api_key.clone(),
            config.engine_id.clone(),
        )
    }

    /// Run one query, returning its hits or nothing on any failure.
    ///
    /// The failure is logged at `error` level with the query and reason.
    #[instrument(level = "info", skip(self))]
    pub async fn search(&self, query: &str) -> Vec<RawResult> {
        let t0 = Instant::now();
        match self.try_search(query).await {
            Ok(items) => {
                info!(
                    count = items.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Search returned results"
                );
                items
            }
            Err(e) => {
                error!(
                    error = %e,
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Error fetching results; skipping query"
                );
                Vec::new()
            }
        }
    }

    /// Run one query and report failures to the caller.
    pub async fn try_search(&self, query: &str) -> Result<Vec<RawResult>, SearchError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.without_url()))?;
        let parsed: SearchResponse = serde_json::from_str(&body).inspect_err(|_| {
            debug!(body = %truncate_for_log(&body, 300), "Undecodable search response");
        })?;
        Ok(parsed.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SearchClient {
        let endpoint = Url::parse(&format!("{}/customsearch/v1", server.uri())).unwrap();
        SearchClient::new(endpoint, "test-key", "test-cx")
    }

    #[tokio::test]
    async fn test_search_sends_credentials_and_parses_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "Mega Job Fair 2025"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {
                        "title": "Mega Job Fair in Pune",
                        "link": "https://example.com/pune",
                        "snippet": "Held at Balewadi Stadium on March 15, 2025."
                    },
                    {
                        "title": "No snippet here",
                        "link": "https://example.com/bare"
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let results = client.search("Mega Job Fair 2025").await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Mega Job Fair in Pune");
        assert_eq!(results[0].link, "https://example.com/pune");
        assert_eq!(results[1].snippet, "");
    }

    #[tokio::test]
    async fn test_search_no_items_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "customsearch#search"})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search("anything").await.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_yields_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_search("Campus Recruitment 2025").await.unwrap_err();
        assert!(matches!(err, SearchError::Status(s) if s.as_u16() == 500));
        assert!(client.search("Campus Recruitment 2025").await.is_empty());
    }

    #[tokio::test]
    async fn test_quota_exceeded_yields_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "Quota exceeded"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.search("Job Mela 2025 India").await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_yields_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.try_search("Walk-in Drive").await.unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
        assert!(client.search("Walk-in Drive").await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_provider_yields_no_results() {
        let endpoint = Url::parse("http://127.0.0.1:1/customsearch/v1").unwrap();
        let client = SearchClient::new(endpoint, "test-key", "test-cx");

        let err = client.try_search("Job Drives").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
        assert!(!err.to_string().contains("test-key"));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = SearchClient::new(
            Url::parse("https://search.example.com/v1").unwrap(),
            "secret-key",
            "secret-cx",
        );
        let printed = format!("{client:?}");
        assert!(printed.contains("search.example.com"));
        assert!(!printed.contains("secret-key"));
        assert!(!printed.contains("secret-cx"));
    }
}
