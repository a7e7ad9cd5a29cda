use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::regions::models::{Region, RegionFilter, RegionInput};

/// Request body for creating or fully replacing a region
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegionRequestDto {
    pub country_id: Option<i64>,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(range(min = 0.0, message = "Area must not be negative"))]
    #[serde(default)]
    pub area: f64,

    #[validate(range(min = 0, message = "Population must not be negative"))]
    #[serde(default)]
    pub population: i64,

    /// Opaque serialized polygon coordinates
    pub coordinates: Option<String>,
}

impl From<RegionRequestDto> for RegionInput {
    fn from(dto: RegionRequestDto) -> Self {
        Self {
            country_id: dto.country_id,
            name: dto.name.trim().to_string(),
            area: dto.area,
            population: dto.population,
            coordinates: dto.coordinates,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionResponseDto {
    pub id: i64,
    pub country_id: Option<i64>,
    pub name: String,
    pub area: f64,
    pub population: i64,
    pub coordinates: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Region> for RegionResponseDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            country_id: region.country_id,
            name: region.name,
            area: region.area,
            population: region.population,
            coordinates: region.coordinates,
            created_at: region.created_at,
            updated_at: region.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct RegionSearchQuery {
    /// Case-insensitive partial match on the region name
    #[param(example = "bali")]
    pub name: Option<String>,
}

/// Inclusive bounds; omitted bounds are open
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RegionFilterQuery {
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
}

impl From<RegionFilterQuery> for RegionFilter {
    fn from(query: RegionFilterQuery) -> Self {
        Self {
            min_population: query.min_population,
            max_population: query.max_population,
            min_area: query.min_area,
            max_area: query.max_area,
        }
    }
}
