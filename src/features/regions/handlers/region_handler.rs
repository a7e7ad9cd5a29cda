use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, IdPath};
use crate::features::regions::dtos::{
    RegionFilterQuery, RegionRequestDto, RegionResponseDto, RegionSearchQuery,
};
use crate::features::regions::services::RegionService;
use crate::shared::types::ApiResponse;
use crate::shared::validation::required_text;

#[utoipa::path(
    get,
    path = "/api/regions",
    responses(
        (status = 200, description = "All regions", body = ApiResponse<Vec<RegionResponseDto>>)
    ),
    tag = "regions"
)]
pub async fn list_regions(
    State(service): State<Arc<RegionService>>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let regions = service.list().await?;
    let dtos: Vec<RegionResponseDto> = regions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/regions/{id}",
    params(("id" = i64, Path, description = "Region ID")),
    responses(
        (status = 200, description = "Region details", body = ApiResponse<RegionResponseDto>),
        (status = 404, description = "Region not found")
    ),
    tag = "regions"
)]
pub async fn get_region(
    State(service): State<Arc<RegionService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    let region = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(region.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/regions",
    request_body = RegionRequestDto,
    responses(
        (status = 201, description = "Region created", body = ApiResponse<RegionResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "regions"
)]
pub async fn create_region(
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<RegionRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegionResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let region = service.create(dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(region.into()),
            Some("Region created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/regions/{id}",
    params(("id" = i64, Path, description = "Region ID")),
    request_body = RegionRequestDto,
    responses(
        (status = 200, description = "Region replaced", body = ApiResponse<RegionResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Region not found")
    ),
    tag = "regions"
)]
pub async fn update_region(
    State(service): State<Arc<RegionService>>,
    IdPath(id): IdPath,
    AppJson(dto): AppJson<RegionRequestDto>,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let region = service.update(id, dto.into()).await?;
    Ok(Json(ApiResponse::success(
        Some(region.into()),
        Some("Region updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/regions/{id}",
    params(("id" = i64, Path, description = "Region ID")),
    responses(
        (status = 200, description = "Region deleted"),
        (status = 404, description = "Region not found"),
        (status = 409, description = "Region is still referenced by cities or a boundary")
    ),
    tag = "regions"
)]
pub async fn delete_region(
    State(service): State<Arc<RegionService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Region deleted successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    get,
    path = "/api/regions/search",
    params(RegionSearchQuery),
    responses(
        (status = 200, description = "Regions whose name matches", body = ApiResponse<Vec<RegionResponseDto>>),
        (status = 400, description = "Missing name")
    ),
    tag = "regions"
)]
pub async fn search_regions(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionSearchQuery>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let name = required_text("name", query.name.as_deref())?;
    let regions = service.search(&name).await?;
    let dtos: Vec<RegionResponseDto> = regions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/regions/filter",
    params(RegionFilterQuery),
    responses(
        (status = 200, description = "Regions within the bounds", body = ApiResponse<Vec<RegionResponseDto>>),
        (status = 400, description = "Invalid bounds")
    ),
    tag = "regions"
)]
pub async fn filter_regions(
    State(service): State<Arc<RegionService>>,
    Query(query): Query<RegionFilterQuery>,
) -> Result<Json<ApiResponse<Vec<RegionResponseDto>>>> {
    let regions = service.filter(query.into()).await?;
    let dtos: Vec<RegionResponseDto> = regions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}
