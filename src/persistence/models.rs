//! Database row model for overlay configurations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ConfigurationMetadata, OverlayConfiguration, PersistedConfiguration, StoreId};
use crate::error::OverlayError;

/// A row from the `overlay_configurations` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConfigurationRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Owning store key (unique).
    pub store_id: String,
    /// Stored image filename.
    pub image: String,
    /// JSONB `{ trigger, action }` document.
    pub metadata: serde_json::Value,
    /// Creation timestamp, kept across updates.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ConfigurationRow> for PersistedConfiguration {
    type Error = OverlayError;

    fn try_from(row: ConfigurationRow) -> Result<Self, Self::Error> {
        let metadata: ConfigurationMetadata = serde_json::from_value(row.metadata).map_err(|e| {
            OverlayError::Persistence(format!("corrupt metadata in row {}: {e}", row.id))
        })?;
        Ok(Self {
            id: row.id,
            store_id: StoreId::from(row.store_id),
            configuration: OverlayConfiguration::new(row.image, metadata),
            created_at: row.created_at,
        })
    }
}
