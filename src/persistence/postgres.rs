//! PostgreSQL implementation of the configuration store.

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::ConfigurationRow;
use super::{ConfigurationStore, UpsertOutcome};
use crate::domain::{ConfigurationMetadata, PersistedConfiguration, StoreId};
use crate::error::OverlayError;

/// Column list for `overlay_configurations` queries.
const COLUMNS: &str = "id, store_id, image, metadata, created_at";

/// PostgreSQL-backed configuration store using `sqlx::PgPool`.
///
/// Relies on the `UNIQUE (store_id)` constraint created by the bundled
/// migration; [`ConfigurationStore::upsert`] is a single
/// `INSERT .. ON CONFLICT .. DO UPDATE` statement.
#[derive(Debug, Clone)]
pub struct PostgresConfigurationStore {
    pool: PgPool,
}

impl PostgresConfigurationStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Persistence`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), OverlayError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| OverlayError::Persistence(e.to_string()))
    }
}

fn to_json(metadata: &ConfigurationMetadata) -> Result<serde_json::Value, OverlayError> {
    serde_json::to_value(metadata).map_err(|e| OverlayError::Internal(e.to_string()))
}

#[async_trait]
impl ConfigurationStore for PostgresConfigurationStore {
    async fn find_by_store(
        &self,
        store_id: &StoreId,
    ) -> Result<Option<PersistedConfiguration>, OverlayError> {
        let query =
            format!("SELECT {COLUMNS} FROM overlay_configurations WHERE store_id = $1 LIMIT 1");
        let row = sqlx::query_as::<_, ConfigurationRow>(&query)
            .bind(store_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(PersistedConfiguration::try_from).transpose()
    }

    async fn create(
        &self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> Result<PersistedConfiguration, OverlayError> {
        let query = format!(
            "INSERT INTO overlay_configurations (store_id, image, metadata) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ConfigurationRow>(&query)
            .bind(store_id.as_str())
            .bind(image_reference)
            .bind(to_json(metadata)?)
            .fetch_one(&self.pool)
            .await?;

        PersistedConfiguration::try_from(row)
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
        let metadata = metadata.map(to_json).transpose()?;

        let result = sqlx::query(
            "UPDATE overlay_configurations \
             SET image = COALESCE($1, image), metadata = COALESCE($2::jsonb, metadata) \
             WHERE id = $3",
        )
        .bind(image_reference)
        .bind(metadata)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(OverlayError::Persistence(format!(
                "configuration {id} does not exist"
            )));
        }
        Ok(true)
    }

    async fn upsert(
        &self,
        store_id: &StoreId,
        image_reference: &str,
        metadata: &ConfigurationMetadata,
    ) -> Result<UpsertOutcome, OverlayError> {
        // `xmax = 0` only holds for a freshly inserted tuple.
        let query = format!(
            "INSERT INTO overlay_configurations (store_id, image, metadata) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (store_id) DO UPDATE \
             SET image = EXCLUDED.image, metadata = EXCLUDED.metadata \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        let (row, inserted) = sqlx::query_as::<_, UpsertRow>(&query)
            .bind(store_id.as_str())
            .bind(image_reference)
            .bind(to_json(metadata)?)
            .fetch_one(&self.pool)
            .await
            .map(|r| (r.row, r.inserted))?;

        let record = PersistedConfiguration::try_from(row)?;
        Ok(if inserted {
            UpsertOutcome::Created(record)
        } else {
            UpsertOutcome::Updated(record)
        })
    }
}

#[derive(sqlx::FromRow)]
struct UpsertRow {
    #[sqlx(flatten)]
    row: ConfigurationRow,
    inserted: bool,
}
