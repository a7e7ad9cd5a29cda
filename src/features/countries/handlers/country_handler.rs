use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::IdPath;
use crate::features::countries::dtos::{CountryWithRegionsDto, NearestCountryQuery};
use crate::features::countries::services::CountryService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/countries",
    responses(
        (status = 200, description = "Every country with its regions", body = ApiResponse<Vec<CountryWithRegionsDto>>)
    ),
    tag = "countries"
)]
pub async fn list_countries(
    State(service): State<Arc<CountryService>>,
) -> Result<Json<ApiResponse<Vec<CountryWithRegionsDto>>>> {
    let countries = service.list().await?;
    let dtos: Vec<CountryWithRegionsDto> = countries.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/countries/{id}",
    params(("id" = i64, Path, description = "Country ID")),
    responses(
        (status = 200, description = "Country with its regions", body = ApiResponse<CountryWithRegionsDto>),
        (status = 404, description = "Country not found")
    ),
    tag = "countries"
)]
pub async fn get_country(
    State(service): State<Arc<CountryService>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<CountryWithRegionsDto>>> {
    let country = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(country.into()), None, None)))
}

/// Nearest country to a point by great-circle distance
#[utoipa::path(
    get,
    path = "/api/countries/lookup",
    params(NearestCountryQuery),
    responses(
        (status = 200, description = "Nearest country with regions and boundaries", body = ApiResponse<CountryWithRegionsDto>),
        (status = 400, description = "Missing or unparsable coordinates"),
        (status = 404, description = "No countries stored")
    ),
    tag = "countries"
)]
pub async fn lookup_country(
    State(service): State<Arc<CountryService>>,
    Query(query): Query<NearestCountryQuery>,
) -> Result<Json<ApiResponse<CountryWithRegionsDto>>> {
    let (Some(latitude), Some(longitude)) = (query.latitude, query.longitude) else {
        return Err(AppError::Validation(
            "latitude and longitude are required".to_string(),
        ));
    };

    let country = service.nearest(&latitude, &longitude).await?;
    Ok(Json(ApiResponse::success(Some(country.into()), None, None)))
}
