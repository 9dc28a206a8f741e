//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Versioned endpoints are mounted under `/api/v1`; the original upload,
//! lookup and image paths stay at the root.

pub mod dto;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::services::ServeDir;

use crate::app_state::AppState;
use crate::storage::ImageStorage;

/// Room for the metadata field and multipart framing on top of the image.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Builds the complete API router with all REST endpoints and static image
/// serving from the storage directory.
pub fn build_router(images: &ImageStorage) -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::overlay::routes())
        .merge(handlers::system::routes())
        .nest_service("/images", ServeDir::new(images.root()))
        .layer(DefaultBodyLimit::max(
            images.max_bytes().saturating_add(FORM_OVERHEAD_BYTES),
        ))
}
