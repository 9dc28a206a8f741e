//! Overlay configuration aggregate and its persisted form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ActionDescriptor, TriggerDescriptor};

/// Key identifying which tenant's configuration is read or written.
///
/// At most one [`PersistedConfiguration`] exists per `StoreId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Wraps a store key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StoreId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Trigger and action pair, stored as one JSON document next to the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConfigurationMetadata {
    /// Interactive element placed on the image.
    pub trigger: TriggerDescriptor,
    /// Behaviour invoked by the trigger.
    pub action: ActionDescriptor,
}

/// A complete overlay for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfiguration {
    /// Opaque stored-file reference returned by the upload collaborator.
    pub image_reference: String,
    /// Interactive element placed on the image.
    pub trigger: TriggerDescriptor,
    /// Behaviour invoked by the trigger.
    pub action: ActionDescriptor,
}

impl OverlayConfiguration {
    /// Assembles a configuration from an image reference and its metadata.
    #[must_use]
    pub fn new(image_reference: impl Into<String>, metadata: ConfigurationMetadata) -> Self {
        Self {
            image_reference: image_reference.into(),
            trigger: metadata.trigger,
            action: metadata.action,
        }
    }

    /// Returns the trigger/action pair for storage.
    #[must_use]
    pub fn metadata(&self) -> ConfigurationMetadata {
        ConfigurationMetadata {
            trigger: self.trigger.clone(),
            action: self.action.clone(),
        }
    }
}

/// An [`OverlayConfiguration`] owned by the persistence layer.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedConfiguration {
    /// Internal row identifier. Never exposed over HTTP.
    pub id: i64,
    /// Owning store.
    pub store_id: StoreId,
    /// Current configuration content.
    pub configuration: OverlayConfiguration,
    /// Time of the first successful submission for this store.
    pub created_at: DateTime<Utc>,
}
