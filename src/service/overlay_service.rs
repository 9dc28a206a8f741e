//! Overlay service: accepts submissions and serves stored configurations.

use std::sync::Arc;

use crate::domain::{PersistedConfiguration, StoreId, parse_submission};
use crate::error::OverlayError;
use crate::persistence::{ConfigurationStore, UpsertOutcome};
use crate::storage::{ImageStorage, ImageUpload};

/// Message for a metadata field that is not valid JSON.
pub const INVALID_METADATA_FORMAT: &str = "Invalid metadata format.";

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// Confirmation shown to the client.
    pub message: String,
    /// Whether the store's record was created or overwritten.
    pub outcome: UpsertOutcome,
}

/// Orchestration layer for overlay submissions.
///
/// A submission follows: check file → parse metadata → validate → write
/// image → upsert. The image is only written once the metadata is known to
/// be valid, and is deleted again if the upsert fails.
#[derive(Debug, Clone)]
pub struct OverlayService {
    store: Arc<dyn ConfigurationStore>,
    images: ImageStorage,
}

impl OverlayService {
    /// Creates a new `OverlayService`.
    #[must_use]
    pub fn new(store: Arc<dyn ConfigurationStore>, images: ImageStorage) -> Self {
        Self { store, images }
    }

    /// Returns the image storage.
    #[must_use]
    pub fn images(&self) -> &ImageStorage {
        &self.images
    }

    /// Stores an image and its overlay configuration for `store_id`.
    ///
    /// # Errors
    ///
    /// - [`OverlayError::UnsupportedMediaType`] / [`OverlayError::PayloadTooLarge`]
    ///   when the file is rejected.
    /// - [`OverlayError::MalformedPayload`] when `raw_metadata` is not JSON.
    /// - [`OverlayError::Validation`] when the metadata is structurally invalid.
    /// - [`OverlayError::Storage`] / [`OverlayError::Persistence`] on write failure.
    pub async fn submit(
        &self,
        store_id: &StoreId,
        upload: &ImageUpload,
        raw_metadata: &str,
    ) -> Result<SubmissionReceipt, OverlayError> {
        self.images.check(upload)?;

        let candidate: serde_json::Value = serde_json::from_str(raw_metadata)
            .map_err(|_| OverlayError::MalformedPayload(INVALID_METADATA_FORMAT.to_string()))?;

        let metadata = parse_submission(&candidate).inspect_err(|e| {
            tracing::warn!(%store_id, error = %e, "submission rejected");
        })?;

        let stored = self.images.store(upload).await?;

        let outcome = match self
            .store
            .upsert(store_id, &stored.filename, &metadata)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    %store_id,
                    image = %stored.filename,
                    error = %err,
                    "upsert failed, discarding image"
                );
                if let Err(cleanup) = self.images.remove(&stored).await {
                    tracing::warn!(
                        image = %stored.filename,
                        error = %cleanup,
                        "orphaned image left on disk"
                    );
                }
                return Err(err);
            }
        };

        let message = match &outcome {
            UpsertOutcome::Created(record) => {
                tracing::info!(
                    %store_id,
                    id = record.id,
                    image = %stored.filename,
                    "configuration created"
                );
                format!("File {} uploaded successfully.", upload.original_name)
            }
            UpsertOutcome::Updated(record) => {
                tracing::info!(
                    %store_id,
                    id = record.id,
                    image = %stored.filename,
                    "configuration updated"
                );
                format!(
                    "File {} uploaded and configuration updated successfully.",
                    upload.original_name
                )
            }
        };

        Ok(SubmissionReceipt { message, outcome })
    }

    /// Returns the configuration stored for `store_id`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] if the store has no configuration,
    /// or [`OverlayError::Persistence`] on storage failure.
    pub async fn get(&self, store_id: &StoreId) -> Result<PersistedConfiguration, OverlayError> {
        self.store
            .find_by_store(store_id)
            .await?
            .ok_or_else(|| OverlayError::NotFound(store_id.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::{ActionDescriptor, ConfigurationMetadata, TriggerKind};
    use crate::persistence::InMemoryConfigurationStore;

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            original_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            data: vec![1, 2, 3, 4],
        }
    }

    fn make_service(root: &std::path::Path) -> (OverlayService, Arc<InMemoryConfigurationStore>) {
        let store = Arc::new(InMemoryConfigurationStore::new());
        let service = OverlayService::new(
            Arc::clone(&store) as Arc<dyn ConfigurationStore>,
            ImageStorage::new(root, 1024),
        );
        (service, store)
    }

    fn file_count(root: &std::path::Path) -> usize {
        std::fs::read_dir(root).map(|d| d.count()).unwrap_or(0)
    }

    const LINK: &str = r#"{"type":"link","url":"https://example.com","trigger":{"type":"zone","position":{"x":10,"y":10}}}"#;
    const MODAL: &str = r#"{"type":"modal","trigger":{"type":"button","label":"Buy now","position":{"x":50,"y":80}},"content":{"title":"Offer","body":"50% off"}}"#;

    #[tokio::test]
    async fn first_submission_creates_second_overwrites() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let (service, store) = make_service(dir.path());
        let id = StoreId::from("default_store");

        let Ok(first) = service.submit(&id, &png("a.png"), LINK).await else {
            panic!("first submission failed");
        };
        assert!(matches!(first.outcome, UpsertOutcome::Created(_)));
        assert_eq!(first.message, "File a.png uploaded successfully.");

        let Ok(second) = service.submit(&id, &png("b.png"), MODAL).await else {
            panic!("second submission failed");
        };
        assert!(matches!(second.outcome, UpsertOutcome::Updated(_)));
        assert_eq!(store.len().await, 1);

        let Ok(found) = service.get(&id).await else {
            panic!("record missing");
        };
        assert_eq!(found.configuration.trigger.kind(), TriggerKind::Button);
        assert_eq!(
            found.configuration.image_reference,
            second.outcome.record().configuration.image_reference
        );
    }

    #[tokio::test]
    async fn malformed_metadata_writes_nothing() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let (service, store) = make_service(dir.path());
        let result = service
            .submit(&StoreId::from("s"), &png("a.png"), "{not json")
            .await;
        assert!(matches!(result, Err(OverlayError::MalformedPayload(_))));
        assert!(store.is_empty().await);
        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn invalid_metadata_is_itemized_and_writes_nothing() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let (service, _) = make_service(dir.path());
        let raw = r#"{"type":"link","trigger":{"type":"zone","position":{"x":10,"y":10}}}"#;
        let Err(OverlayError::Validation(errors)) =
            service.submit(&StoreId::from("s"), &png("a.png"), raw).await
        else {
            panic!("expected validation failure");
        };
        assert!(errors.iter().any(|e| e.contains("URL")));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn non_image_is_rejected_before_metadata() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let (service, _) = make_service(dir.path());
        let upload = ImageUpload {
            original_name: "notes.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            data: vec![1],
        };
        let result = service.submit(&StoreId::from("s"), &upload, "garbage").await;
        assert!(matches!(result, Err(OverlayError::UnsupportedMediaType(_))));
    }

    #[tokio::test]
    async fn get_unknown_store_is_not_found() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let (service, _) = make_service(dir.path());
        assert!(matches!(
            service.get(&StoreId::from("missing")).await,
            Err(OverlayError::NotFound(_))
        ));
    }

    #[derive(Debug)]
    struct FailingStore;

    #[async_trait]
    impl ConfigurationStore for FailingStore {
        async fn find_by_store(
            &self,
            _store_id: &StoreId,
        ) -> Result<Option<PersistedConfiguration>, OverlayError> {
            Ok(None)
        }

        async fn create(
            &self,
            _store_id: &StoreId,
            _image_reference: &str,
            _metadata: &ConfigurationMetadata,
        ) -> Result<PersistedConfiguration, OverlayError> {
            Err(OverlayError::Persistence("down".to_string()))
        }

        async fn update(
            &self,
            _id: i64,
            _image_reference: Option<&str>,
            _metadata: Option<&ConfigurationMetadata>,
        ) -> Result<bool, OverlayError> {
            Err(OverlayError::Persistence("down".to_string()))
        }

        async fn upsert(
            &self,
            _store_id: &StoreId,
            _image_reference: &str,
            _metadata: &ConfigurationMetadata,
        ) -> Result<UpsertOutcome, OverlayError> {
            Err(OverlayError::Persistence("down".to_string()))
        }
    }

    #[tokio::test]
    async fn failed_upsert_removes_written_image() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let service =
            OverlayService::new(Arc::new(FailingStore), ImageStorage::new(dir.path(), 1024));
        let result = service
            .submit(&StoreId::from("s"), &png("a.png"), LINK)
            .await;
        assert!(matches!(result, Err(OverlayError::Persistence(_))));
        assert_eq!(file_count(dir.path()), 0);
    }

    #[tokio::test]
    async fn stored_link_matches_submission() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let (service, _) = make_service(dir.path());
        let id = StoreId::from("s");
        let _ = service.submit(&id, &png("a.png"), LINK).await;
        let Ok(found) = service.get(&id).await else {
            panic!("record missing");
        };
        assert_eq!(
            found.configuration.action,
            ActionDescriptor::Link {
                url: "https://example.com".to_string()
            }
        );
    }
}
