//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{StoreConfigurationResponse, SubmitResponse, UploadForm};
use crate::api::handlers::{overlay, system};
use crate::domain::editor::SubmissionMetadata;
use crate::domain::{
    ActionDescriptor, ActionKind, ConfigurationMetadata, ModalContent, Position, StoreId,
    TriggerDescriptor, TriggerKind,
};
use crate::error::{ErrorBody, ErrorResponse, ValidationErrorResponse};

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "overlay-gateway", description = "Image overlay configuration API"),
    paths(
        overlay::upload,
        overlay::upload_for_store,
        overlay::get_store,
        overlay::get_store_v1,
        system::health_handler,
        system::client_log_handler,
    ),
    components(schemas(
        UploadForm,
        SubmitResponse,
        StoreConfigurationResponse,
        ConfigurationMetadata,
        SubmissionMetadata,
        TriggerDescriptor,
        TriggerKind,
        ActionDescriptor,
        ActionKind,
        ModalContent,
        Position,
        StoreId,
        ErrorResponse,
        ErrorBody,
        ValidationErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Overlays", description = "Overlay configuration upload and lookup"),
        (name = "System", description = "Health and diagnostics"),
    )
)]
pub struct ApiDoc;
