//! Persistence layer: the configuration store boundary.
//!
//! [`ConfigurationStore`] is the one shared mutable resource across
//! requests. Two implementations are provided: [`PostgresConfigurationStore`]
//! for durable storage and [`InMemoryConfigurationStore`] for tests and
//! deployments with persistence disabled. Both enforce one record per store
//! inside [`ConfigurationStore::upsert`].

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{ConfigurationMetadata, PersistedConfiguration, StoreId};
use crate::error::OverlayError;

pub use memory::InMemoryConfigurationStore;
pub use postgres::PostgresConfigurationStore;

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// No record existed for the store; one was inserted.
    Created(PersistedConfiguration),
    /// The existing record was overwritten in place.
    Updated(PersistedConfiguration),
}

impl UpsertOutcome {
    /// Returns the stored record.
    #[must_use]
    pub fn record(&self) -> &PersistedConfiguration {
        match self {
            Self::Created(record) | Self::Updated(record) => record,
        }
    }
}

/// Storage boundary for overlay configurations.
#[async_trait]
pub trait ConfigurationStore: Send + Sync + std::fmt::Debug {
    /// Returns the configuration for `store_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Persistence`] on storage failure.
    async fn find_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Option<PersistedConfiguration>, OverlayError>;

    /// Inserts a new configuration for `store_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Persistence`] on storage failure, including a
    /// record already existing for the store.
    async fn create(
        &self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> Result<PersistedConfiguration, OverlayError>;

    /// Replaces the image and/or metadata of record `id`.
    ///
    /// Returns `false` without touching storage when both are `None`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Persistence`] if no record has this id or
    /// the write fails.
    async fn update(
        &self,
        id: i64,
        image_reference: Option<&str>,
        metadata: Option<&ConfigurationMetadata>,
    ) -> Result<bool, OverlayError>;

    /// Atomically creates or overwrites the configuration for `store_id`.
    ///
    /// `created_at` is kept when an existing record is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Persistence`] on storage failure.
    async fn upsert(
        &self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> Result<UpsertOutcome, OverlayError>;
}
