use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::photos::models::{Photo, PhotoParent};

/// Multipart form for `POST /api/landmarkphotos` (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct LandmarkPhotoUploadForm {
    /// JPEG, PNG, GIF or WebP image, at most 10 MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    pub landmark_id: i64,
}

/// Multipart form for `POST /api/reviewphotos` (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ReviewPhotoUploadForm {
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub image: String,
    pub review_id: i64,
}

/// Photo metadata; exactly one of `landmark_id` / `review_id` is present
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoResponseDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<i64>,
    /// Original filename
    pub name: String,
    /// Local path or public URL of the stored image
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PhotoResponseDto {
    pub fn new(parent: PhotoParent, photo: Photo) -> Self {
        let (landmark_id, review_id) = match parent {
            PhotoParent::Landmark => (Some(photo.parent_id), None),
            PhotoParent::Review => (None, Some(photo.parent_id)),
        };
        Self {
            id: photo.id,
            landmark_id,
            review_id,
            name: photo.name,
            path: photo.path,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
        }
    }

    pub fn many(parent: PhotoParent, photos: Vec<Photo>) -> Vec<Self> {
        photos
            .into_iter()
            .map(|photo| Self::new(parent, photo))
            .collect()
    }
}
