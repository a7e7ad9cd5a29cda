use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::features::countries::models::Country;
use crate::features::countries::services::{CountryWithRegions, RegionWithGeoJson};

/// Coordinates of the point to look up; kept as text so that malformed
/// numbers surface as validation errors
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct NearestCountryQuery {
    #[param(example = "-8.65")]
    pub latitude: Option<String>,
    #[param(example = "115.21")]
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountryResponseDto {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Country> for CountryResponseDto {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
            latitude: country.latitude,
            longitude: country.longitude,
            created_at: country.created_at,
            updated_at: country.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionWithGeoJsonDto {
    pub id: i64,
    pub name: String,
    pub area: f64,
    pub population: i64,
    pub coordinates: Option<String>,
    /// Parsed boundary document, absent when none was stored
    #[schema(value_type = Option<Object>)]
    pub geojson: Option<Value>,
}

impl From<RegionWithGeoJson> for RegionWithGeoJsonDto {
    fn from(entry: RegionWithGeoJson) -> Self {
        Self {
            id: entry.region.id,
            name: entry.region.name,
            area: entry.region.area,
            population: entry.region.population,
            coordinates: entry.region.coordinates,
            geojson: entry.geojson,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountryWithRegionsDto {
    #[serde(flatten)]
    pub country: CountryResponseDto,
    pub regions: Vec<RegionWithGeoJsonDto>,
}

impl From<CountryWithRegions> for CountryWithRegionsDto {
    fn from(entry: CountryWithRegions) -> Self {
        Self {
            country: entry.country.into(),
            regions: entry.regions.into_iter().map(Into::into).collect(),
        }
    }
}
