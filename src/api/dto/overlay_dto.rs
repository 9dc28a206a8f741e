//! Upload and store lookup DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ConfigurationMetadata, PersistedConfiguration, StoreId};

/// Multipart form accepted by the upload endpoints.
///
/// Documentation-only: the handlers read the fields from
/// [`axum::extract::Multipart`] directly.
#[derive(Debug, ToSchema)]
pub struct UploadForm {
    /// Image file (jpeg, jpg, png or gif).
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// JSON text: `{ type, trigger, url?, content? }`.
    pub metadata: String,
    /// Target store; defaults to the configured store key.
    pub store_id: Option<String>,
}

/// Response body for a successful upload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    /// Confirmation message.
    pub message: String,
}

/// Response body for `GET /store/{store_id}`. Carries no internal id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreConfigurationResponse {
    /// Owning store.
    pub store_id: StoreId,
    /// Stored image filename, servable under `/images/`.
    pub image: String,
    /// Trigger and action.
    pub metadata: ConfigurationMetadata,
    /// Time of the first submission for this store.
    pub created_at: DateTime<Utc>,
}

impl From<PersistedConfiguration> for StoreConfigurationResponse {
    fn from(record: PersistedConfiguration) -> Self {
        let metadata = record.configuration.metadata();
        Self {
            store_id: record.store_id,
            image: record.configuration.image_reference,
            metadata,
            created_at: record.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{
        ActionDescriptor, OverlayConfiguration, Position, TriggerDescriptor,
    };

    #[test]
    fn response_omits_internal_id() {
        let record = PersistedConfiguration {
            id: 41,
            store_id: StoreId::from("default_store"),
            configuration: OverlayConfiguration {
                image_reference: "file-1.png".to_string(),
                trigger: TriggerDescriptor::Zone {
                    position: Position::new(1.0, 2.0),
                    scale: 1.0,
                },
                action: ActionDescriptor::Link {
                    url: "https://example.com".to_string(),
                },
            },
            created_at: Utc::now(),
        };
        let Ok(json) = serde_json::to_value(StoreConfigurationResponse::from(record)) else {
            panic!("serialization failed");
        };
        assert!(json.get("id").is_none());
        assert_eq!(json["store_id"], "default_store");
        assert_eq!(json["image"], "file-1.png");
        assert_eq!(json["metadata"]["action"]["type"], "link");
    }
}
