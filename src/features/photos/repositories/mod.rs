mod photo_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::features::photos::models::{NewPhoto, Photo, PhotoParent};

pub use photo_repository::PgPhotoRepository;

/// Photo metadata for both parent kinds. Reads skip soft-deleted rows
/// unless stated otherwise.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Name photo keys are derived from: a landmark's name or a review's
    /// device id. `None` when the parent does not exist.
    async fn parent_label(&self, parent: PhotoParent, parent_id: i64) -> Result<Option<String>>;
    /// Every row ever recorded for the parent, soft-deleted ones included
    async fn count_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<i64>;
    async fn insert(&self, parent: PhotoParent, photo: &NewPhoto) -> Result<Photo>;
    async fn list(&self, parent: PhotoParent) -> Result<Vec<Photo>>;
    async fn list_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<Vec<Photo>>;
    async fn find(&self, parent: PhotoParent, id: i64) -> Result<Option<Photo>>;
    /// `false` when there was no live row to delete
    async fn soft_delete(&self, parent: PhotoParent, id: i64, at: DateTime<Utc>) -> Result<bool>;
}
