use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::multipart::{parse_field, read_text, read_upload};
use crate::core::error::{AppError, Result};
use crate::core::extractor::IdPath;
use crate::features::photos::dtos::{
    LandmarkPhotoUploadForm, PhotoResponseDto, ReviewPhotoUploadForm,
};
use crate::features::photos::models::PhotoParent;
use crate::features::photos::services::PhotoService;
use crate::shared::types::ApiResponse;

type Created = (StatusCode, Json<ApiResponse<PhotoResponseDto>>);

/// Read `image` and the parent id field from the form, then ingest
async fn upload(
    service: &PhotoService,
    parent: PhotoParent,
    mut multipart: Multipart,
) -> Result<Created> {
    let id_field = parent.parent_column();
    let mut parent_id: Option<i64> = None;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name == "image" {
            upload = Some(read_upload(field).await?);
        } else if field_name == id_field {
            let text = read_text(field, id_field).await?;
            parent_id = Some(parse_field(id_field, &text)?);
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    let parent_id =
        parent_id.ok_or_else(|| AppError::BadRequest(format!("{} is required", id_field)))?;
    let upload = upload.ok_or_else(|| AppError::BadRequest("image is required".to_string()))?;

    let photo = service.ingest(parent, parent_id, upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(PhotoResponseDto::new(parent, photo)),
            Some("Photo uploaded successfully".to_string()),
            None,
        )),
    ))
}

async fn list(
    service: &PhotoService,
    parent: PhotoParent,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    let photos = service.list(parent).await?;
    Ok(Json(ApiResponse::list(PhotoResponseDto::many(parent, photos))))
}

async fn get(
    service: &PhotoService,
    parent: PhotoParent,
    id: i64,
) -> Result<Json<ApiResponse<PhotoResponseDto>>> {
    let photo = service.get(parent, id).await?;
    Ok(Json(ApiResponse::success(
        Some(PhotoResponseDto::new(parent, photo)),
        None,
        None,
    )))
}

async fn delete(service: &PhotoService, parent: PhotoParent, id: i64) -> Result<Json<ApiResponse<()>>> {
    service.delete(parent, id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Photo deleted successfully".to_string()),
        None,
    )))
}

// ==================== Landmark Photo Handlers ====================

/// Upload a landmark photo
///
/// Accepts multipart/form-data with:
/// - `image`: the image file (required)
/// - `landmark_id`: the landmark it belongs to (required)
#[utoipa::path(
    post,
    path = "/api/landmarkphotos",
    request_body(content = LandmarkPhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo stored", body = ApiResponse<PhotoResponseDto>),
        (status = 400, description = "Missing field or invalid image"),
        (status = 404, description = "Landmark not found")
    ),
    tag = "photos"
)]
pub async fn upload_landmark_photo(
    State(service): State<Arc<PhotoService>>,
    multipart: Multipart,
) -> Result<Created> {
    upload(&service, PhotoParent::Landmark, multipart).await
}

#[utoipa::path(
    get,
    path = "/api/landmarkphotos",
    responses((status = 200, description = "Live landmark photos", body = ApiResponse<Vec<PhotoResponseDto>>)),
    tag = "photos"
)]
pub async fn list_landmark_photos(
    State(service): State<Arc<PhotoService>>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    list(&service, PhotoParent::Landmark).await
}

#[utoipa::path(
    get,
    path = "/api/landmarkphotos/{id}",
    params(("id" = i64, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo metadata", body = ApiResponse<PhotoResponseDto>),
        (status = 404, description = "Photo not found")
    ),
    tag = "photos"
)]
pub async fn get_landmark_photo(
    State(service): State<Arc<PhotoService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<PhotoResponseDto>>> {
    get(&service, PhotoParent::Landmark, id).await
}

#[utoipa::path(
    delete,
    path = "/api/landmarkphotos/{id}",
    params(("id" = i64, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo deleted"),
        (status = 404, description = "Photo not found")
    ),
    tag = "photos"
)]
pub async fn delete_landmark_photo(
    State(service): State<Arc<PhotoService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>> {
    delete(&service, PhotoParent::Landmark, id).await
}

// ==================== Review Photo Handlers ====================

/// Upload a review photo
///
/// Accepts multipart/form-data with `image` and `review_id`.
#[utoipa::path(
    post,
    path = "/api/reviewphotos",
    request_body(content = ReviewPhotoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Photo stored", body = ApiResponse<PhotoResponseDto>),
        (status = 400, description = "Missing field or invalid image"),
        (status = 404, description = "Review not found")
    ),
    tag = "photos"
)]
pub async fn upload_review_photo(
    State(service): State<Arc<PhotoService>>,
    multipart: Multipart,
) -> Result<Created> {
    upload(&service, PhotoParent::Review, multipart).await
}

#[utoipa::path(
    get,
    path = "/api/reviewphotos",
    responses((status = 200, description = "Live review photos", body = ApiResponse<Vec<PhotoResponseDto>>)),
    tag = "photos"
)]
pub async fn list_review_photos(
    State(service): State<Arc<PhotoService>>,
) -> Result<Json<ApiResponse<Vec<PhotoResponseDto>>>> {
    list(&service, PhotoParent::Review).await
}

#[utoipa::path(
    get,
    path = "/api/reviewphotos/{id}",
    params(("id" = i64, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo metadata", body = ApiResponse<PhotoResponseDto>),
        (status = 404, description = "Photo not found")
    ),
    tag = "photos"
)]
pub async fn get_review_photo(
    State(service): State<Arc<PhotoService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<PhotoResponseDto>>> {
    get(&service, PhotoParent::Review, id).await
}

#[utoipa::path(
    delete,
    path = "/api/reviewphotos/{id}",
    params(("id" = i64, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo deleted"),
        (status = 404, description = "Photo not found")
    ),
    tag = "photos"
)]
pub async fn delete_review_photo(
    State(service): State<Arc<PhotoService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>> {
    delete(&service, PhotoParent::Review, id).await
}
