use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: i64,
    pub device_id: String,
    pub name: String,
    pub comment: String,
    pub rating: i32,
    pub landmark_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub device_id: String,
    pub name: String,
    pub comment: String,
    pub rating: i32,
    pub landmark_id: i64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewFilter {
    pub min_rating: Option<i32>,
    pub max_rating: Option<i32>,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        self.min_rating.is_none_or(|min| review.rating >= min)
            && self.max_rating.is_none_or(|max| review.rating <= max)
    }
}
