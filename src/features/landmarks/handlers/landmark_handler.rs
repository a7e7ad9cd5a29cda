use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::IdPath;
use crate::features::landmarks::dtos::{
    AverageRatingDto, LandmarkDetailsDto, LandmarkDetailsQuery, LandmarkFilterQuery,
    LandmarkResponseDto, LandmarkSearchQuery, PhotoLinksDto, ReviewCountDto,
};
use crate::features::landmarks::models::Landmark;
use crate::features::landmarks::services::LandmarkService;
use crate::features::reviews::dtos::ReviewResponseDto;
use crate::shared::types::ApiResponse;
use crate::shared::validation::required_text;

type LandmarkList = Json<ApiResponse<Vec<LandmarkResponseDto>>>;

fn landmark_list(landmarks: Vec<Landmark>) -> LandmarkList {
    let dtos: Vec<LandmarkResponseDto> = landmarks.into_iter().map(Into::into).collect();
    Json(ApiResponse::list(dtos))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/search",
    params(LandmarkSearchQuery),
    responses(
        (status = 200, description = "Landmarks matching the keyword", body = ApiResponse<Vec<LandmarkResponseDto>>),
        (status = 400, description = "Missing keyword")
    ),
    tag = "landmarks"
)]
pub async fn search_landmarks(
    State(service): State<Arc<LandmarkService>>,
    Query(query): Query<LandmarkSearchQuery>,
) -> Result<LandmarkList> {
    let keyword = required_text("keyword", query.keyword.as_deref())?;
    Ok(landmark_list(service.search(&keyword).await?))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/filter",
    params(LandmarkFilterQuery),
    responses(
        (status = 200, description = "Landmarks matching every given criterion", body = ApiResponse<Vec<LandmarkResponseDto>>),
        (status = 400, description = "Invalid bounds")
    ),
    tag = "landmarks"
)]
pub async fn filter_landmarks(
    State(service): State<Arc<LandmarkService>>,
    Query(query): Query<LandmarkFilterQuery>,
) -> Result<LandmarkList> {
    Ok(landmark_list(service.filter(query.into()).await?))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/city/{city_id}",
    params(("city_id" = i64, Path, description = "City ID")),
    responses(
        (status = 200, description = "Landmarks in the city", body = ApiResponse<Vec<LandmarkResponseDto>>),
        (status = 404, description = "City not found")
    ),
    tag = "landmarks"
)]
pub async fn list_city_landmarks(
    State(service): State<Arc<LandmarkService>>,
    IdPath(city_id): IdPath,
) -> Result<LandmarkList> {
    Ok(landmark_list(service.by_city(city_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/region/{region_id}",
    params(("region_id" = i64, Path, description = "Region ID")),
    responses(
        (status = 200, description = "Landmarks in every city of the region", body = ApiResponse<Vec<LandmarkResponseDto>>),
        (status = 404, description = "Region not found")
    ),
    tag = "landmarks"
)]
pub async fn list_region_landmarks(
    State(service): State<Arc<LandmarkService>>,
    IdPath(region_id): IdPath,
) -> Result<LandmarkList> {
    Ok(landmark_list(service.by_region(region_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/{id}/reviews",
    params(("id" = i64, Path, description = "Landmark ID")),
    responses(
        (status = 200, description = "Reviews of the landmark", body = ApiResponse<Vec<ReviewResponseDto>>),
        (status = 404, description = "Landmark not found")
    ),
    tag = "landmarks"
)]
pub async fn list_landmark_reviews(
    State(service): State<Arc<LandmarkService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let reviews = service.reviews(id).await?;
    let dtos: Vec<ReviewResponseDto> = reviews.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/{id}/review-count",
    params(("id" = i64, Path, description = "Landmark ID")),
    responses(
        (status = 200, description = "Number of reviews", body = ApiResponse<ReviewCountDto>),
        (status = 404, description = "Landmark not found")
    ),
    tag = "landmarks"
)]
pub async fn get_review_count(
    State(service): State<Arc<LandmarkService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<ReviewCountDto>>> {
    let review_count = service.review_count(id).await?;
    Ok(Json(ApiResponse::success(
        Some(ReviewCountDto {
            landmark_id: id,
            review_count,
        }),
        None,
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/{id}/average-rating",
    params(("id" = i64, Path, description = "Landmark ID")),
    responses(
        (status = 200, description = "Mean rating, 0 without reviews", body = ApiResponse<AverageRatingDto>),
        (status = 404, description = "Landmark not found")
    ),
    tag = "landmarks"
)]
pub async fn get_average_rating(
    State(service): State<Arc<LandmarkService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<AverageRatingDto>>> {
    let average_rating = service.average_rating(id).await?;
    Ok(Json(ApiResponse::success(
        Some(AverageRatingDto {
            landmark_id: id,
            average_rating,
        }),
        None,
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/{id}/details",
    params(("id" = i64, Path, description = "Landmark ID"), LandmarkDetailsQuery),
    responses(
        (status = 200, description = "Landmark with photos, reviews and rating", body = ApiResponse<LandmarkDetailsDto>),
        (status = 404, description = "Landmark not found")
    ),
    tag = "landmarks"
)]
pub async fn get_landmark_details(
    State(service): State<Arc<LandmarkService>>,
    IdPath(id): IdPath,
    Query(query): Query<LandmarkDetailsQuery>,
) -> Result<Json<ApiResponse<LandmarkDetailsDto>>> {
    let device_id = query
        .device_id
        .as_deref()
        .map(str::trim)
        .filter(|device_id| !device_id.is_empty());
    let details = service.details(id, device_id).await?;
    Ok(Json(ApiResponse::success(Some(details.into()), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/landmarks/{id}/photos",
    params(("id" = i64, Path, description = "Landmark ID")),
    responses(
        (status = 200, description = "Paths or URLs of the landmark's photos", body = ApiResponse<PhotoLinksDto>),
        (status = 404, description = "Landmark not found")
    ),
    tag = "landmarks"
)]
pub async fn get_landmark_photos(
    State(service): State<Arc<LandmarkService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<PhotoLinksDto>>> {
    let photo_links = service.photo_links(id).await?;
    Ok(Json(ApiResponse::success(
        Some(PhotoLinksDto { photo_links }),
        None,
        None,
    )))
}
