use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::core::error::{AppError, Result};

/// Stored boundary document of a region (at most one per region)
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GeoJson {
    pub id: i64,
    pub region_id: i64,
    /// Full submitted payload serialized as JSON text
    pub geojson_data: String,
    pub middle_point: String,
    pub zoom: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl GeoJson {
    /// `updated_at` for a write at `now` over a document last written at `previous`.
    ///
    /// Same rule as the `GREATEST(..)` in the Postgres upsert: always strictly
    /// after `previous` at whole-second resolution.
    pub fn next_updated_at(previous: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
        match previous {
            Some(previous) if now <= previous => previous + chrono::Duration::seconds(1),
            _ => now,
        }
    }
}

/// Row written by a submit; `at` becomes created_at for new rows
#[derive(Debug, Clone)]
pub struct GeoJsonUpsert {
    pub region_id: i64,
    pub geojson_data: String,
    pub middle_point: String,
    pub zoom: f64,
    pub at: DateTime<Utc>,
}

/// The two fields every boundary payload must carry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySummary {
    pub middle_point: [f64; 2],
    pub zoom: f64,
}

impl BoundarySummary {
    /// Extract `middle_point` and `zoom` from a submitted payload.
    ///
    /// `middle_point` is checked before `zoom`.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self> {
        let middle_point = match payload.get("middle_point") {
            Some(Value::Array(items)) if items.len() == 2 => {
                match (items[0].as_f64(), items[1].as_f64()) {
                    (Some(x), Some(y)) => [x, y],
                    _ => return Err(invalid_middle_point()),
                }
            }
            _ => return Err(invalid_middle_point()),
        };

        let zoom = payload
            .get("zoom")
            .and_then(Value::as_f64)
            .ok_or_else(|| AppError::Validation("zoom must be a number".to_string()))?;

        Ok(Self { middle_point, zoom })
    }

    pub fn middle_point_text(&self) -> String {
        format!("[{:.6}, {:.6}]", self.middle_point[0], self.middle_point[1])
    }
}

fn invalid_middle_point() -> AppError {
    AppError::Validation("middle_point must be an array of two numbers".to_string())
}
