use std::sync::Arc;

use chrono::Utc;

use super::photo_naming;
use crate::core::error::{AppError, Result};
use crate::features::photos::models::{NewPhoto, Photo, PhotoParent};
use crate::features::photos::repositories::PhotoRepository;
use crate::modules::storage::PhotoStorage;
use crate::shared::constants::{ALLOWED_PHOTO_MIME_TYPES, MAX_PHOTO_NAME_ATTEMPTS, MAX_PHOTO_SIZE};
use crate::shared::keyed_lock::KeyedLocks;

/// An uploaded image as read from a multipart field
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    /// Check size and type before anything is stored
    pub(crate) fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Err(AppError::Validation("Photo file is empty".to_string()));
        }
        if self.data.len() > MAX_PHOTO_SIZE {
            return Err(AppError::Validation(format!(
                "Photo too large. Maximum size is {} MB",
                MAX_PHOTO_SIZE / 1024 / 1024
            )));
        }
        if !ALLOWED_PHOTO_MIME_TYPES.contains(&self.mime_type().as_str()) {
            return Err(AppError::Validation(format!(
                "Photo type '{}' is not allowed. Allowed types: {}",
                self.content_type,
                ALLOWED_PHOTO_MIME_TYPES.join(", ")
            )));
        }
        Ok(())
    }

    /// Content type without parameters, lowercased
    fn mime_type(&self) -> String {
        self.content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }
}

/// Stores photo binaries under collision-free names and records their metadata
pub struct PhotoService {
    photos: Arc<dyn PhotoRepository>,
    storage: Arc<dyn PhotoStorage>,
    locks: KeyedLocks<(PhotoParent, i64)>,
}

impl PhotoService {
    pub fn new(photos: Arc<dyn PhotoRepository>, storage: Arc<dyn PhotoStorage>) -> Self {
        Self {
            photos,
            storage,
            locks: KeyedLocks::new(),
        }
    }

    /// Store an uploaded photo for a landmark or review.
    ///
    /// The binary is written before its metadata row; if the row cannot be
    /// recorded the binary is removed again.
    pub async fn ingest(
        &self,
        parent: PhotoParent,
        parent_id: i64,
        upload: PhotoUpload,
    ) -> Result<Photo> {
        upload.validate()?;

        let label = self
            .photos
            .parent_label(parent, parent_id)
            .await?
            .ok_or_else(|| parent_not_found(parent, parent_id))?;
        let base = photo_naming::base_name(&label);
        let mime_type = upload.mime_type();
        let extension = photo_naming::extension(&upload.file_name, &mime_type);

        // Sequence allocation and the write must not interleave for one parent
        let _guard = self.locks.lock((parent, parent_id)).await;

        let mut sequence = self.photos.count_for_parent(parent, parent_id).await? + 1;
        let mut free_key = None;
        for _ in 0..MAX_PHOTO_NAME_ATTEMPTS {
            let key = photo_naming::storage_key(parent, &base, sequence, &extension);
            if !self.storage.exists(&key).await? {
                free_key = Some(key);
                break;
            }
            sequence += 1;
        }
        let key = free_key.ok_or_else(|| {
            AppError::Internal(format!(
                "No free photo name for {} {} after {} attempts",
                parent.label(),
                parent_id,
                MAX_PHOTO_NAME_ATTEMPTS
            ))
        })?;

        let location = self.storage.put(&key, upload.data, &mime_type).await?;

        let recorded = self
            .photos
            .insert(
                parent,
                &NewPhoto {
                    parent_id,
                    name: upload.file_name,
                    path: location.clone(),
                    at: Utc::now(),
                },
            )
            .await;

        match recorded {
            Ok(photo) => {
                tracing::info!(
                    "Stored photo {} for {} {} at {}",
                    photo.id,
                    parent.label(),
                    parent_id,
                    location
                );
                Ok(photo)
            }
            Err(e) => {
                if let Err(cleanup) = self.storage.remove(&location).await {
                    tracing::warn!(
                        "Failed to remove orphaned photo {}: {}",
                        location,
                        cleanup
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn list(&self, parent: PhotoParent) -> Result<Vec<Photo>> {
        self.photos.list(parent).await
    }

    pub async fn get(&self, parent: PhotoParent, id: i64) -> Result<Photo> {
        self.photos
            .find(parent, id)
            .await?
            .ok_or_else(|| photo_not_found(parent, id))
    }

    /// Live photos of one landmark or review
    pub async fn list_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<Vec<Photo>> {
        if self.photos.parent_label(parent, parent_id).await?.is_none() {
            return Err(parent_not_found(parent, parent_id));
        }
        self.photos.list_for_parent(parent, parent_id).await
    }

    /// Soft-delete the row, then remove the stored binary (failures there are only logged)
    pub async fn delete(&self, parent: PhotoParent, id: i64) -> Result<()> {
        let photo = self.get(parent, id).await?;
        if !self.photos.soft_delete(parent, id, Utc::now()).await? {
            return Err(photo_not_found(parent, id));
        }

        if let Err(e) = self.storage.remove(&photo.path).await {
            tracing::warn!("Photo {} deleted but {} was not removed: {}", id, photo.path, e);
        }
        Ok(())
    }
}

fn parent_not_found(parent: PhotoParent, parent_id: i64) -> AppError {
    AppError::NotFound(format!("{} with id {} not found", parent.label(), parent_id))
}

fn photo_not_found(parent: PhotoParent, id: i64) -> AppError {
    AppError::NotFound(format!("{} photo with id {} not found", parent.label(), id))
}
