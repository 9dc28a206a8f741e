//! Overlay handlers: image + configuration upload and store lookup.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{StoreConfigurationResponse, SubmitResponse, UploadForm};
use crate::app_state::AppState;
use crate::domain::StoreId;
use crate::error::{ErrorResponse, OverlayError, ValidationErrorResponse};
use crate::storage::ImageUpload;

/// Message when the form has no `file` field.
pub const NO_FILE_UPLOADED: &str = "No file uploaded.";
/// Message when the form has no `metadata` field.
pub const NO_METADATA_PROVIDED: &str = "No metadata provided.";

/// Fields collected from an upload form.
#[derive(Debug, Default)]
struct UploadParts {
    file: Option<ImageUpload>,
    metadata: Option<String>,
    store_id: Option<String>,
}

/// `POST /upload` — Upload an image with its overlay configuration.
///
/// The target store is the form's `store_id` field, or the configured
/// default store when absent.
///
/// # Errors
///
/// Returns [`OverlayError`] on a missing or rejected file, unparsable or
/// invalid metadata, or storage failure.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "Overlays",
    summary = "Upload an overlay configuration",
    description = "Stores the image and creates or replaces the store's overlay configuration.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Configuration stored", body = SubmitResponse),
        (status = 400, description = "Invalid configuration", body = ValidationErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not an accepted image", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, OverlayError> {
    let limit = state.overlay_service.images().max_bytes();
    let parts = read_upload(multipart, limit).await?;
    let store_id = parts
        .store_id
        .clone()
        .filter(|s| !s.is_empty())
        .map_or_else(|| state.default_store_id.clone(), StoreId::from);
    submit(&state, &store_id, parts).await
}

/// `POST /api/v1/stores/{store_id}/upload` — Upload for an explicit store.
///
/// # Errors
///
/// Same as [`upload`].
#[utoipa::path(
    post,
    path = "/api/v1/stores/{store_id}/upload",
    tag = "Overlays",
    summary = "Upload an overlay configuration for a store",
    description = "Same as `POST /upload` with the store key taken from the path.",
    params(
        ("store_id" = String, Path, description = "Store key"),
    ),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Configuration stored", body = SubmitResponse),
        (status = 400, description = "Invalid configuration", body = ValidationErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Not an accepted image", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn upload_for_store(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, OverlayError> {
    let limit = state.overlay_service.images().max_bytes();
    let parts = read_upload(multipart, limit).await?;
    submit(&state, &StoreId::from(store_id), parts).await
}

/// `GET /store/{store_id}` — Fetch a store's overlay configuration.
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] if the store has no configuration.
#[utoipa::path(
    get,
    path = "/store/{store_id}",
    tag = "Overlays",
    summary = "Get a store's overlay configuration",
    description = "Returns the image reference, trigger and action stored for the store.",
    params(
        ("store_id" = String, Path, description = "Store key"),
    ),
    responses(
        (status = 200, description = "Stored configuration", body = StoreConfigurationResponse),
        (status = 404, description = "No configuration for this store", body = ErrorResponse),
    )
)]
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, OverlayError> {
    lookup(&state, store_id).await
}

/// `GET /api/v1/stores/{store_id}` — Versioned form of [`get_store`].
///
/// # Errors
///
/// Returns [`OverlayError::NotFound`] if the store has no configuration.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}",
    tag = "Overlays",
    summary = "Get a store's overlay configuration",
    description = "Same as `GET /store/{store_id}`.",
    params(
        ("store_id" = String, Path, description = "Store key"),
    ),
    responses(
        (status = 200, description = "Stored configuration", body = StoreConfigurationResponse),
        (status = 404, description = "No configuration for this store", body = ErrorResponse),
    )
)]
pub async fn get_store_v1(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<impl IntoResponse, OverlayError> {
    lookup(&state, store_id).await
}

async fn lookup(
    state: &AppState,
    store_id: String,
) -> Result<Json<StoreConfigurationResponse>, OverlayError> {
    let record = state
        .overlay_service
        .get(&StoreId::from(store_id))
        .await?;
    Ok(Json(StoreConfigurationResponse::from(record)))
}

async fn submit(
    state: &AppState,
    store_id: &StoreId,
    parts: UploadParts,
) -> Result<(StatusCode, Json<SubmitResponse>), OverlayError> {
    let file = parts
        .file
        .ok_or_else(|| OverlayError::MissingInput(NO_FILE_UPLOADED.to_string()))?;
    let metadata = parts
        .metadata
        .filter(|m| !m.is_empty())
        .ok_or_else(|| OverlayError::MissingInput(NO_METADATA_PROVIDED.to_string()))?;

    let receipt = state
        .overlay_service
        .submit(store_id, &file, &metadata)
        .await?;

    Ok((
        StatusCode::OK,
        Json(SubmitResponse {
            message: receipt.message,
        }),
    ))
}

/// Drains the multipart body into [`UploadParts`], ignoring unknown fields.
async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<UploadParts, OverlayError> {
    let mut parts = UploadParts::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e, limit))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&e, limit))?;
                parts.file = Some(ImageUpload {
                    original_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "metadata" | "store_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&e, limit))?;
                if name == "metadata" {
                    parts.metadata = Some(text);
                } else {
                    parts.store_id = Some(text);
                }
            }
            _ => {}
        }
    }

    Ok(parts)
}

fn multipart_error(err: &axum::extract::multipart::MultipartError, limit: usize) -> OverlayError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        OverlayError::PayloadTooLarge { limit }
    } else {
        OverlayError::MalformedPayload(err.body_text())
    }
}

/// Overlay routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/store/{store_id}", get(get_store))
}

/// Overlay routes mounted under `/api/v1`.
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/stores/{store_id}", get(get_store_v1))
        .route("/stores/{store_id}/upload", post(upload_for_store))
}
