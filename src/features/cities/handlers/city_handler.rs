use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::IdPath;
use crate::features::cities::dtos::{CityFilterQuery, CityResponseDto, CitySearchQuery};
use crate::features::cities::services::CityService;
use crate::features::regions::dtos::RegionResponseDto;
use crate::shared::types::ApiResponse;
use crate::shared::validation::required_text;

#[utoipa::path(
    get,
    path = "/api/cities/search",
    params(CitySearchQuery),
    responses(
        (status = 200, description = "Cities whose name contains the query", body = ApiResponse<Vec<CityResponseDto>>),
        (status = 400, description = "Missing name")
    ),
    tag = "cities"
)]
pub async fn search_cities(
    State(service): State<Arc<CityService>>,
    Query(query): Query<CitySearchQuery>,
) -> Result<Json<ApiResponse<Vec<CityResponseDto>>>> {
    let name = required_text("name", query.name.as_deref())?;
    let cities = service.search(&name).await?;
    let dtos: Vec<CityResponseDto> = cities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/cities/filter",
    params(CityFilterQuery),
    responses(
        (status = 200, description = "Cities within the bounds", body = ApiResponse<Vec<CityResponseDto>>),
        (status = 400, description = "Invalid bounds")
    ),
    tag = "cities"
)]
pub async fn filter_cities(
    State(service): State<Arc<CityService>>,
    Query(query): Query<CityFilterQuery>,
) -> Result<Json<ApiResponse<Vec<CityResponseDto>>>> {
    let cities = service.filter(query.into()).await?;
    let dtos: Vec<CityResponseDto> = cities.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/cities/{id}/region",
    params(("id" = i64, Path, description = "City ID")),
    responses(
        (status = 200, description = "Region of the city", body = ApiResponse<RegionResponseDto>),
        (status = 404, description = "City or region not found")
    ),
    tag = "cities"
)]
pub async fn get_city_region(
    State(service): State<Arc<CityService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<RegionResponseDto>>> {
    let region = service.region_of_city(id).await?;
    Ok(Json(ApiResponse::success(Some(region.into()), None, None)))
}
