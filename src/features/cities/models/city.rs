use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct City {
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

/// Inclusive numeric bounds over cities
#[derive(Debug, Clone, Default)]
pub struct CityFilter {
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
}

impl CityFilter {
    pub fn matches(&self, city: &City) -> bool {
        self.min_population.is_none_or(|min| city.population >= min)
            && self.max_population.is_none_or(|max| city.population <= max)
            && self.min_area.is_none_or(|min| city.area >= min)
            && self.max_area.is_none_or(|max| city.area <= max)
            && self.min_latitude.is_none_or(|min| city.latitude >= min)
            && self.max_latitude.is_none_or(|max| city.latitude <= max)
            && self.min_longitude.is_none_or(|min| city.longitude >= min)
            && self.max_longitude.is_none_or(|max| city.longitude <= max)
    }
}
