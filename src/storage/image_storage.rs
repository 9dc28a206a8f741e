//! Local-disk image storage for uploaded overlay images.
//!
//! Accepts a single image under a byte ceiling, restricted to JPEG, PNG
//! and GIF by both extension and declared media type, and stores it under
//! a collision-resistant name that keeps the original extension.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::OverlayError;

/// Accepted image formats, matched against extension and media type.
pub const ACCEPTED_FORMATS: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

/// Message returned for unsupported files.
pub const IMAGES_ONLY: &str = "Images only! (jpeg, jpg, png, gif)";

/// An uploaded file as received from the multipart body.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-side file name.
    pub original_name: String,
    /// Declared media type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Vec<u8>,
}

/// Reference to a file written by [`ImageStorage::store`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name, used as the image reference.
    pub filename: String,
    /// Full path on disk.
    pub path: PathBuf,
}

/// Writes accepted uploads into a single directory.
#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl ImageStorage {
    /// Creates a storage rooted at `root` accepting files up to `max_bytes`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    /// Directory holding stored images.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Configured byte ceiling.
    #[must_use]
    pub const fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Checks size, extension and media type without touching disk.
    ///
    /// Returns the extension as spelled in the original name. Matching
    /// against the accepted formats is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::PayloadTooLarge`] when the file exceeds the
    /// ceiling and [`OverlayError::UnsupportedMediaType`] when either the
    /// extension or the media type is not an accepted image format.
    pub fn check(&self, upload: &ImageUpload) -> Result<String, OverlayError> {
        if upload.data.len() > self.max_bytes {
            return Err(OverlayError::PayloadTooLarge {
                limit: self.max_bytes,
            });
        }

        let extension = Path::new(&upload.original_name)
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| {
                ACCEPTED_FORMATS
                    .iter()
                    .any(|f| e.eq_ignore_ascii_case(f))
            });
        let media_type_ok = upload
            .content_type
            .as_deref()
            .is_some_and(|ct| ACCEPTED_FORMATS.iter().any(|f| ct.contains(f)));

        match extension {
            Some(ext) if media_type_ok => Ok(ext.to_string()),
            _ => Err(OverlayError::UnsupportedMediaType(IMAGES_ONLY.to_string())),
        }
    }

    /// Validates and writes an upload, returning its generated name.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ImageStorage::check`], or
    /// [`OverlayError::Storage`] if the file cannot be written.
    pub async fn store(&self, upload: &ImageUpload) -> Result<StoredImage, OverlayError> {
        let extension = self.check(upload)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| OverlayError::Storage(e.to_string()))?;

        let filename = format!(
            "file-{}-{}.{extension}",
            Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        );
        let path = self.root.join(&filename);
        tokio::fs::write(&path, &upload.data)
            .await
            .map_err(|e| OverlayError::Storage(e.to_string()))?;

        tracing::debug!(%filename, bytes = upload.data.len(), "image stored");
        Ok(StoredImage { filename, path })
    }

    /// Deletes a previously stored image.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::Storage`] if the file cannot be removed.
    pub async fn remove(&self, image: &StoredImage) -> Result<(), OverlayError> {
        tokio::fs::remove_file(&image.path)
            .await
            .map_err(|e| OverlayError::Storage(e.to_string()))
    }
}
