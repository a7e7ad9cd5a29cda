use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, IdPath};
use crate::features::regions::dtos::{GeoJsonIdDto, GeoJsonRecordDto, GeoJsonResponseDto};
use crate::features::regions::services::{GeoJsonFetch, GeoJsonService};
use crate::shared::http_date::format_http_date;
use crate::shared::types::ApiResponse;

/// Create or replace the boundary document of a region
///
/// The body is an arbitrary GeoJSON object that must also carry
/// `middle_point: [number, number]` and `zoom: number`.
#[utoipa::path(
    post,
    path = "/api/geojson/{region_id}",
    params(("region_id" = i64, Path, description = "Region ID")),
    request_body(content = Object, description = "GeoJSON object with middle_point and zoom"),
    responses(
        (status = 200, description = "Document stored", body = ApiResponse<GeoJsonIdDto>),
        (status = 400, description = "Malformed payload"),
        (status = 404, description = "Region not found")
    ),
    tag = "geojson"
)]
pub async fn submit_geojson(
    State(service): State<Arc<GeoJsonService>>,
    IdPath(region_id): IdPath,
    AppJson(payload): AppJson<Map<String, Value>>,
) -> Result<Json<ApiResponse<GeoJsonIdDto>>> {
    let saved = service.submit(region_id, payload).await?;
    Ok(Json(ApiResponse::success(
        Some(GeoJsonIdDto {
            geojson_id: saved.id,
        }),
        None,
        None,
    )))
}

/// Same as `POST /api/geojson/{region_id}`, addressed through the region
#[utoipa::path(
    post,
    path = "/api/regions/{id}/geojson",
    params(("id" = i64, Path, description = "Region ID")),
    request_body(content = Object, description = "GeoJSON object with middle_point and zoom"),
    responses(
        (status = 200, description = "Document stored", body = ApiResponse<GeoJsonIdDto>),
        (status = 400, description = "Malformed payload"),
        (status = 404, description = "Region not found")
    ),
    tag = "geojson"
)]
pub async fn submit_region_geojson(
    state: State<Arc<GeoJsonService>>,
    id: IdPath,
    payload: AppJson<Map<String, Value>>,
) -> Result<Json<ApiResponse<GeoJsonIdDto>>> {
    submit_geojson(state, id, payload).await
}

/// Fetch a region's boundary document, honouring `If-Modified-Since`
#[utoipa::path(
    get,
    path = "/api/geojson/{region_id}",
    params(
        ("region_id" = i64, Path, description = "Region ID"),
        ("If-Modified-Since" = Option<String>, Header, description = "HTTP date of the copy the client holds")
    ),
    responses(
        (status = 200, description = "Document with Last-Modified header", body = ApiResponse<GeoJsonResponseDto>),
        (status = 304, description = "Not modified since the given date"),
        (status = 404, description = "No document for the region")
    ),
    tag = "geojson"
)]
pub async fn get_geojson(
    State(service): State<Arc<GeoJsonService>>,
    IdPath(region_id): IdPath,
    headers: HeaderMap,
) -> Result<Response> {
    let since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok());

    match service.fetch(region_id, since).await? {
        GeoJsonFetch::NotModified => Ok(StatusCode::NOT_MODIFIED.into_response()),
        GeoJsonFetch::Modified(document) => Ok((
            [(header::LAST_MODIFIED, format_http_date(document.last_modified))],
            Json(ApiResponse::success(
                Some(GeoJsonResponseDto {
                    geojson_data: document.data,
                    created_at: document.created_at,
                }),
                None,
                None,
            )),
        )
            .into_response()),
    }
}

#[utoipa::path(
    get,
    path = "/api/geojson",
    responses(
        (status = 200, description = "Every stored document", body = ApiResponse<Vec<GeoJsonRecordDto>>)
    ),
    tag = "geojson"
)]
pub async fn list_geojson(
    State(service): State<Arc<GeoJsonService>>,
) -> Result<Json<ApiResponse<Vec<GeoJsonRecordDto>>>> {
    let records = service.list_all().await?;
    let dtos: Vec<GeoJsonRecordDto> = records.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::list(dtos)))
}
