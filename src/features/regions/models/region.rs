use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Administrative region; owns at most one boundary document
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: i64,
    pub country_id: Option<i64>,
    pub name: String,
    pub area: f64,
    pub population: i64,
    pub coordinates: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of a region, used for both create and full replace
#[derive(Debug, Clone)]
pub struct RegionInput {
    pub country_id: Option<i64>,
    pub name: String,
    pub area: f64,
    pub population: i64,
    pub coordinates: Option<String>,
}

/// Inclusive bounds; `None` leaves that side open
#[derive(Debug, Clone, Default)]
pub struct RegionFilter {
    pub min_population: Option<i64>,
    pub max_population: Option<i64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
}

impl RegionFilter {
    pub fn matches(&self, region: &Region) -> bool {
        self.min_population.is_none_or(|min| region.population >= min)
            && self.max_population.is_none_or(|max| region.population <= max)
            && self.min_area.is_none_or(|min| region.area >= min)
            && self.max_area.is_none_or(|max| region.area <= max)
    }
}
