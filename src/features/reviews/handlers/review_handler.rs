use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::photos::handlers::{parse_field, read_text, read_upload};
use crate::features::reviews::dtos::{
    CreateReviewForm, ReviewFilterQuery, ReviewResponseDto, ReviewSearchQuery,
    ReviewWithPhotosDto,
};
use crate::features::reviews::models::{Review, ReviewInput};
use crate::features::reviews::services::ReviewService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::required_text;

fn review_list(reviews: Vec<Review>) -> Json<ApiResponse<Vec<ReviewResponseDto>>> {
    let dtos: Vec<ReviewResponseDto> = reviews.into_iter().map(Into::into).collect();
    Json(ApiResponse::list(dtos))
}

/// Create a review with optional photos
///
/// Accepts multipart/form-data with `device_id`, `name`, `comment`, `rating`,
/// `landmark_id` and any number of `images` parts.
#[utoipa::path(
    post,
    path = "/api/reviews",
    request_body(content = CreateReviewForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Review and its photos", body = ApiResponse<ReviewWithPhotosDto>),
        (status = 400, description = "Invalid review or image"),
        (status = 404, description = "Landmark not found")
    ),
    tag = "reviews"
)]
pub async fn create_review(
    State(service): State<Arc<ReviewService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReviewWithPhotosDto>>)> {
    let mut device_id = None;
    let mut name = None;
    let mut comment = None;
    let mut rating = None;
    let mut landmark_id = None;
    let mut uploads = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "images" => uploads.push(read_upload(field).await?),
            "device_id" => device_id = Some(read_text(field, "device_id").await?),
            "name" => name = Some(read_text(field, "name").await?),
            "comment" => comment = Some(read_text(field, "comment").await?),
            "rating" => {
                let text = read_text(field, "rating").await?;
                rating = Some(parse_field::<i32>("rating", &text)?);
            }
            "landmark_id" => {
                let text = read_text(field, "landmark_id").await?;
                landmark_id = Some(parse_field::<i64>("landmark_id", &text)?);
            }
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    let input = ReviewInput {
        device_id: device_id
            .ok_or_else(|| AppError::BadRequest("device_id is required".to_string()))?
            .trim()
            .to_string(),
        name: name
            .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?
            .trim()
            .to_string(),
        comment: comment.unwrap_or_default(),
        rating: rating.ok_or_else(|| AppError::BadRequest("rating is required".to_string()))?,
        landmark_id: landmark_id
            .ok_or_else(|| AppError::BadRequest("landmark_id is required".to_string()))?,
    };

    let created = service.create_with_photos(input, uploads).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created.into()),
            Some("Review created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/reviews/search",
    params(ReviewSearchQuery),
    responses(
        (status = 200, description = "Reviews matching the keyword", body = ApiResponse<Vec<ReviewResponseDto>>),
        (status = 400, description = "Missing keyword")
    ),
    tag = "reviews"
)]
pub async fn search_reviews(
    State(service): State<Arc<ReviewService>>,
    Query(query): Query<ReviewSearchQuery>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    let keyword = required_text("keyword", query.keyword.as_deref())?;
    Ok(review_list(service.search(&keyword).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/filter",
    params(ReviewFilterQuery),
    responses(
        (status = 200, description = "Reviews within the rating bounds", body = ApiResponse<Vec<ReviewResponseDto>>),
        (status = 400, description = "Invalid bounds")
    ),
    tag = "reviews"
)]
pub async fn filter_reviews(
    State(service): State<Arc<ReviewService>>,
    Query(query): Query<ReviewFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    Ok(review_list(service.filter(query.into()).await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/user/{device_id}",
    params(("device_id" = String, Path, description = "Device that wrote the reviews")),
    responses(
        (status = 200, description = "Reviews written from the device", body = ApiResponse<Vec<ReviewResponseDto>>)
    ),
    tag = "reviews"
)]
pub async fn list_device_reviews(
    State(service): State<Arc<ReviewService>>,
    Path(device_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ReviewResponseDto>>>> {
    Ok(review_list(service.by_device(&device_id).await?))
}
