//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::StoreId;
use crate::service::OverlayService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Overlay service for all business logic.
    pub overlay_service: Arc<OverlayService>,
    /// Store key used by `POST /upload` when the form names none.
    pub default_store_id: StoreId,
}
