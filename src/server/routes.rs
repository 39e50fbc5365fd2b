//! Route handlers.

use super::AppState;
use crate::models::Event;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, instrument};

#[derive(Serialize)]
pub struct EventsResponse {
    pub data: Vec<Event>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /search`
///
/// Runs the aggregator now. Returns 200 with `{"data": [...]}` when at least
/// one event was found, otherwise 404 with a message and no `data` key.
#[instrument(level = "info", skip_all)]
pub async fn search(State(state): State<AppState>) -> Response {
    let events = state.aggregator.run(&state.queries).await;
    info!(events = events.len(), "Search request complete");

    if events.is_empty() {
        (
            StatusCode::NOT_FOUND,
            Json(MessageResponse {
                message: "No results found!",
            }),
        )
            .into_response()
    } else {
        (StatusCode::OK, Json(EventsResponse { data: events })).into_response()
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
