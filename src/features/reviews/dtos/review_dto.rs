use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::photos::dtos::PhotoResponseDto;
use crate::features::photos::models::PhotoParent;
use crate::features::reviews::models::{Review, ReviewFilter};
use crate::features::reviews::services::ReviewWithPhotos;

/// Multipart form for `POST /api/reviews` (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateReviewForm {
    pub device_id: String,
    pub name: String,
    pub comment: Option<String>,
    /// 1 to 5
    pub rating: i32,
    pub landmark_id: i64,
    /// Zero or more images, each sent as its own `images` part
    #[schema(value_type = Vec<String>)]
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub id: i64,
    pub device_id: String,
    pub name: String,
    pub comment: String,
    pub rating: i32,
    pub landmark_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponseDto {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            device_id: review.device_id,
            name: review.name,
            comment: review.comment,
            rating: review.rating,
            landmark_id: review.landmark_id,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewWithPhotosDto {
    #[serde(flatten)]
    pub review: ReviewResponseDto,
    pub photos: Vec<PhotoResponseDto>,
}

impl From<ReviewWithPhotos> for ReviewWithPhotosDto {
    fn from(created: ReviewWithPhotos) -> Self {
        Self {
            review: created.review.into(),
            photos: PhotoResponseDto::many(PhotoParent::Review, created.photos),
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ReviewSearchQuery {
    /// Matched against name, comment and the rating
    #[param(example = "sunset")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct ReviewFilterQuery {
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
}

impl From<ReviewFilterQuery> for ReviewFilter {
    fn from(query: ReviewFilterQuery) -> Self {
        Self {
            min_rating: query.min_rating,
            max_rating: query.max_rating,
        }
    }
}
