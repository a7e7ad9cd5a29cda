use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::landmarks::models::{Landmark, LandmarkFilter};
use crate::features::landmarks::services::LandmarkDetails;
use crate::features::photos::dtos::PhotoResponseDto;
use crate::features::photos::models::PhotoParent;
use crate::features::reviews::dtos::ReviewResponseDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LandmarkResponseDto {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub landmark_type: String,
    pub information: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Landmark> for LandmarkResponseDto {
    fn from(landmark: Landmark) -> Self {
        Self {
            id: landmark.id,
            name: landmark.name,
            landmark_type: landmark.landmark_type,
            information: landmark.information,
            description: landmark.description,
            latitude: landmark.latitude,
            longitude: landmark.longitude,
            city_id: landmark.city_id,
            created_at: landmark.created_at,
            updated_at: landmark.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LandmarkSearchQuery {
    /// Matched case-insensitively against name and description
    #[param(example = "temple")]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct LandmarkFilterQuery {
    pub city_id: Option<i64>,
    /// Landmark type, compared case-insensitively
    #[serde(rename = "type")]
    pub landmark_type: Option<String>,
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
}

impl From<LandmarkFilterQuery> for LandmarkFilter {
    fn from(query: LandmarkFilterQuery) -> Self {
        Self {
            city_id: query.city_id,
            landmark_type: query
                .landmark_type
                .map(|kind| kind.trim().to_string())
                .filter(|kind| !kind.is_empty()),
            min_latitude: query.min_latitude,
            max_latitude: query.max_latitude,
            min_longitude: query.min_longitude,
            max_longitude: query.max_longitude,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LandmarkDetailsQuery {
    /// When given, the latest review this device left is included
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewCountDto {
    pub landmark_id: i64,
    pub review_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageRatingDto {
    pub landmark_id: i64,
    /// 0 when the landmark has no reviews
    pub average_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoLinksDto {
    pub photo_links: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LandmarkDetailsDto {
    pub landmark: LandmarkResponseDto,
    pub photos: Vec<PhotoResponseDto>,
    pub reviews: Vec<ReviewResponseDto>,
    pub review_count: i64,
    pub average_rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_review: Option<ReviewResponseDto>,
}

impl From<LandmarkDetails> for LandmarkDetailsDto {
    fn from(details: LandmarkDetails) -> Self {
        Self {
            landmark: details.landmark.into(),
            photos: PhotoResponseDto::many(PhotoParent::Landmark, details.photos),
            reviews: details.reviews.into_iter().map(Into::into).collect(),
            review_count: details.review_count,
            average_rating: details.average_rating,
            user_review: details.user_review.map(Into::into),
        }
    }
}
