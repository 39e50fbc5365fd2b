//! HTTP surface.
//!
//! # Routes
//!
//! - `GET /search` - Run every query now and return the events
//! - `GET /health` - Liveness check
//!
//! `/search` never reads the startup results file; each request builds a
//! fresh result set from the live provider.

use crate::aggregate::Aggregator;
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod routes;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    pub queries: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>, queries: Vec<String>) -> Self {
        Self {
            aggregator,
            queries: Arc::new(queries),
        }
    }
}

/// Build the router with all route definitions.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(routes::search))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Listen on `addr` until Ctrl-C.
pub async fn serve(addr: &str, router: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FieldExtractor;
    use crate::search::SearchClient;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt; // for oneshot()
    use url::Url;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(server: &MockServer, queries: &[&str]) -> Router {
        let endpoint = Url::parse(&format!("{}/customsearch/v1", server.uri())).unwrap();
        let aggregator = Aggregator::new(
            SearchClient::new(endpoint, "k", "cx"),
            FieldExtractor::new(true),
            Duration::ZERO,
        );
        create_router(AppState::new(
            Arc::new(aggregator),
            queries.iter().map(|q| q.to_string()).collect(),
        ))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let (status, body) = get_json(app(&server, &[]), "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_without_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (status, body) = get_json(app(&server, &["a", "b"]), "/search").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("data").is_none());
        assert_eq!(body["message"], "No results found!");
    }

    #[tokio::test]
    async fn test_search_with_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "Fair A", "link": "https://example.com/a", "snippet": "On Jan 9, 2025 at Nehru Stadium"},
                    {"title": "Fair B", "link": "https://example.com/b", "snippet": ""}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{"title": "Fair C", "link": "https://example.com/c"}]
            })))
            .mount(&server)
            .await;

        let (status, body) = get_json(app(&server, &["a", "b"]), "/search").await;

        assert_eq!(status, StatusCode::OK);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(
            data[0],
            json!({
                "Title": "Fair A",
                "Link": "https://example.com/a",
                "Date": "Jan 9, 2025",
                "Venue": "Nehru Stadium"
            })
        );
        assert_eq!(data[2]["Title"], "Fair C");
    }

    #[tokio::test]
    async fn test_search_runs_fresh_each_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let router = app(&server, &["only"]);
        get_json(router.clone(), "/search").await;
        get_json(router, "/search").await;

        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }
}
