//! System endpoints: health check and client log sink.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// `POST /log` — Record a diagnostic entry sent by the editor client.
#[utoipa::path(
    post,
    path = "/log",
    tag = "System",
    summary = "Client log sink",
    description = "Accepts any JSON document from the editor and writes it to the server log.",
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Entry recorded"),
    )
)]
pub async fn client_log_handler(Json(entry): Json<serde_json::Value>) -> impl IntoResponse {
    tracing::info!(target: "client", %entry, "client log");
    StatusCode::OK
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/log", post(client_log_handler))
}
