use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::cities::models::{City, CityFilter};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityResponseDto {
    pub id: i64,
    pub name: String,
    pub area: f64,
    pub population: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub region_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<City> for CityResponseDto {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            area: city.area,
            population: city.population,
            latitude: city.latitude,
            longitude: city.longitude,
            region_id: city.region_id,
            created_at: city.created_at,
            updated_at: city.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CitySearchQuery {
    /// Case-insensitive partial match on the city name
    #[param(example = "denpasar")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct CityFilterQuery {
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
}

impl From<CityFilterQuery> for CityFilter {
    fn from(query: CityFilterQuery) -> Self {
        Self {
            min_population: query.min_population,
            max_population: query.max_population,
            min_area: query.min_area,
            max_area: query.max_area,
            min_latitude: query.min_latitude,
            max_latitude: query.max_latitude,
            min_longitude: query.min_longitude,
            max_longitude: query.max_longitude,
        }
    }
}
