use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::core::error::{AppError, Result};
use crate::features::regions::models::{BoundarySummary, GeoJson, GeoJsonUpsert};
use crate::features::regions::repositories::{GeoJsonRepository, RegionRepository};
use crate::shared::http_date::{parse_http_date, to_http_precision};

/// Stored payload plus the timestamps a fetch reports
#[derive(Debug, Clone)]
pub struct GeoJsonDocument {
    pub data: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

/// Outcome of a conditional fetch
#[derive(Debug, Clone)]
pub enum GeoJsonFetch {
    NotModified,
    Modified(GeoJsonDocument),
}

/// Per-region boundary documents with conditional retrieval
pub struct GeoJsonService {
    regions: Arc<dyn RegionRepository>,
    geojsons: Arc<dyn GeoJsonRepository>,
    touch_region: bool,
}

impl GeoJsonService {
    pub fn new(
        regions: Arc<dyn RegionRepository>,
        geojsons: Arc<dyn GeoJsonRepository>,
        touch_region: bool,
    ) -> Self {
        Self {
            regions,
            geojsons,
            touch_region,
        }
    }

    /// Create or replace the boundary document of a region.
    ///
    /// Nothing is written unless the payload carries a valid `middle_point`
    /// and `zoom`.
    pub async fn submit(&self, region_id: i64, payload: Map<String, Value>) -> Result<GeoJson> {
        if self.regions.find_by_id(region_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Region with id {} not found",
                region_id
            )));
        }

        let summary = BoundarySummary::from_payload(&payload)?;
        let geojson_data = serde_json::to_string(&payload)
            .map_err(|e| AppError::Internal(format!("Failed to serialize GeoJSON: {}", e)))?;

        let saved = self
            .geojsons
            .upsert(&GeoJsonUpsert {
                region_id,
                geojson_data,
                middle_point: summary.middle_point_text(),
                zoom: summary.zoom,
                at: to_http_precision(Utc::now()),
            })
            .await?;

        if self.touch_region {
            self.regions.touch(region_id, saved.updated_at).await?;
        }

        tracing::info!(
            "Saved GeoJSON {} for region {} (updated_at={})",
            saved.id,
            region_id,
            saved.updated_at
        );
        Ok(saved)
    }

    /// Fetch a region's document unless it is unchanged since `if_modified_since`.
    ///
    /// A header value that is not a recognizable date is ignored.
    pub async fn fetch(
        &self,
        region_id: i64,
        if_modified_since: Option<&str>,
    ) -> Result<GeoJsonFetch> {
        let stored = self
            .geojsons
            .find_by_region(region_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("GeoJSON for region {} not found", region_id))
            })?;

        if let Some(since) = if_modified_since.and_then(parse_http_date) {
            if stored.updated_at <= since {
                return Ok(GeoJsonFetch::NotModified);
            }
        }

        let data = serde_json::from_str::<Map<String, Value>>(&stored.geojson_data).map_err(|e| {
            AppError::Internal(format!(
                "Stored GeoJSON for region {} is corrupt: {}",
                region_id, e
            ))
        })?;

        Ok(GeoJsonFetch::Modified(GeoJsonDocument {
            data,
            created_at: stored.created_at,
            last_modified: stored.updated_at,
        }))
    }

    /// Every stored document in insertion order
    pub async fn list_all(&self) -> Result<Vec<GeoJson>> {
        self.geojsons.list().await
    }

    /// Parsed payload of a region's document, if it has one
    pub async fn payload_of(&self, region_id: i64) -> Result<Option<Value>> {
        match self.geojsons.find_by_region(region_id).await? {
            Some(stored) => serde_json::from_str(&stored.geojson_data)
                .map(Some)
                .map_err(|e| {
                    AppError::Internal(format!(
                        "Stored GeoJSON for region {} is corrupt: {}",
                        region_id, e
                    ))
                }),
            None => Ok(None),
        }
    }
}
