use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::features::regions::models::GeoJson;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoJsonIdDto {
    pub geojson_id: i64,
}

/// Body of a successful conditional fetch
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoJsonResponseDto {
    /// The payload exactly as submitted
    #[schema(value_type = Object)]
    pub geojson_data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Stored document as kept in the store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GeoJsonRecordDto {
    pub id: i64,
    pub region_id: i64,
    /// Serialized payload text
    pub geojson_data: String,
    pub middle_point: String,
    pub zoom: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GeoJson> for GeoJsonRecordDto {
    fn from(geojson: GeoJson) -> Self {
        Self {
            id: geojson.id,
            region_id: geojson.region_id,
            geojson_data: geojson.geojson_data,
            middle_point: geojson.middle_point,
            zoom: geojson.zoom,
            created_at: geojson.created_at,
            updated_at: geojson.updated_at,
        }
    }
}
