use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Landmark {
    pub id: i64,
    pub name: String,
    pub landmark_type: String,
    pub information: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct LandmarkFilter {
    pub city_id: Option<i64>,
    /// Exact, case-insensitive match on the landmark type
    pub landmark_type: Option<String>,
    pub min_latitude: Option<f64>,
    pub max_latitude: Option<f64>,
    pub min_longitude: Option<f64>,
    pub max_longitude: Option<f64>,
}

impl LandmarkFilter {
    pub fn matches(&self, landmark: &Landmark) -> bool {
        self.city_id.is_none_or(|id| landmark.city_id == id)
            && self
                .landmark_type
                .as_deref()
                .is_none_or(|kind| landmark.landmark_type.eq_ignore_ascii_case(kind))
            && self.min_latitude.is_none_or(|min| landmark.latitude >= min)
            && self.max_latitude.is_none_or(|max| landmark.latitude <= max)
            && self.min_longitude.is_none_or(|min| landmark.longitude >= min)
            && self.max_longitude.is_none_or(|max| landmark.longitude <= max)
    }
}
