//! In-process configuration store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ConfigurationStore, UpsertOutcome};
use crate::domain::{
    ConfigurationMetadata, OverlayConfiguration, PersistedConfiguration, StoreId,
};
use crate::error::OverlayError;

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    records: HashMap<StoreId, PersistedConfiguration>,
}

impl Inner {
    fn insert(
        &mut self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> PersistedConfiguration {
        self.last_id += 1;
        let record = PersistedConfiguration {
            id: self.last_id,
            store_id: store_id.clone(),
            configuration: OverlayConfiguration::new(image_reference, metadata.clone()),
            created_at: Utc::now(),
        };
        self.records.insert(store_id.clone(), record.clone());
        record
    }
}

/// Configuration store backed by a `HashMap` behind a [`tokio::sync::RwLock`].
///
/// Every mutation holds the write lock for its whole read-modify-write, so
/// [`ConfigurationStore::upsert`] cannot interleave with another writer.
#[derive(Debug, Default)]
pub struct InMemoryConfigurationStore {
    inner: RwLock<Inner>,
}

impl InMemoryConfigurationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored configurations.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Returns `true` if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryConfigurationStore {
    async fn find_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Option<PersistedConfiguration>, OverlayError> {
        Ok(self.inner.read().await.records.get(store_id).cloned())
    }

    async fn create(
        &self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> Result<PersistedConfiguration, OverlayError> {
        let mut inner = self.inner.write().await;
        if inner.records.contains_key(store_id) {
            return Err(OverlayError::Persistence(format!(
                "configuration for store {store_id} already exists"
            )));
        }
        Ok(inner.insert(store_id, image_reference, metadata))
    }

    async fn update(
        &self,
        id: i64,
        image_reference: Option<&str>,
        metadata: Option<&ConfigurationMetadata>,
    ) -> Result<bool, OverlayError> {
        if image_reference.is_none() && metadata.is_none() {
            return Ok(false);
        }
        let mut inner = self.inner.write().await;
        let record = inner
            .records
            .values_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| {
                OverlayError::Persistence(format!("configuration {id} does not exist"))
            })?;

        if let Some(image) = image_reference {
            record.configuration.image_reference = image.to_string();
        }
        if let Some(metadata) = metadata {
            record.configuration.trigger = metadata.trigger.clone();
            record.configuration.action = metadata.action.clone();
        }
        Ok(true)
    }

    async fn upsert(
        &self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> Result<UpsertOutcome, OverlayError> {
        let mut inner = self.inner.write().await;
        if let Some(record) = inner.records.get_mut(store_id) {
            record.configuration = OverlayConfiguration::new(image_reference, metadata.clone());
            return Ok(UpsertOutcome::Updated(record.clone()));
        }
        Ok(UpsertOutcome::Created(inner.insert(
            store_id,
            image_reference,
            metadata,
        )))
    }
}
