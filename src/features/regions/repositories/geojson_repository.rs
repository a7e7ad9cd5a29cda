use async_trait::async_trait;
use sqlx::PgPool;

use super::GeoJsonRepository;
use crate::core::error::{AppError, Result};
use crate::features::regions::models::{GeoJson, GeoJsonUpsert};

pub struct PgGeoJsonRepository {
    pool: PgPool,
}

impl PgGeoJsonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GeoJsonRepository for PgGeoJsonRepository {
    async fn upsert(&self, record: &GeoJsonUpsert) -> Result<GeoJson> {
        // A single statement keeps concurrent submits for one region to one row
        sqlx::query_as::<_, GeoJson>(
            r#"
            INSERT INTO geojsons (region_id, geojson_data, middle_point, zoom, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (region_id) DO UPDATE SET
                geojson_data = EXCLUDED.geojson_data,
                middle_point = EXCLUDED.middle_point,
                zoom = EXCLUDED.zoom,
                updated_at = GREATEST(EXCLUDED.updated_at, geojsons.updated_at + INTERVAL '1 second')
            RETURNING id, region_id, geojson_data, middle_point, zoom, created_at, updated_at
            "#,
        )
        .bind(record.region_id)
        .bind(&record.geojson_data)
        .bind(&record.middle_point)
        .bind(record.zoom)
        .bind(record.at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to save GeoJSON", e))
    }

    async fn find_by_region(&self, region_id: i64) -> Result<Option<GeoJson>> {
        sqlx::query_as::<_, GeoJson>(
            r#"
            SELECT id, region_id, geojson_data, middle_point, zoom, created_at, updated_at
            FROM geojsons
            WHERE region_id = $1
            "#,
        )
        .bind(region_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to fetch GeoJSON", e))
    }

    async fn list(&self) -> Result<Vec<GeoJson>> {
        sqlx::query_as::<_, GeoJson>(
            r#"
            SELECT id, region_id, geojson_data, middle_point, zoom, created_at, updated_at
            FROM geojsons
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to list GeoJSON documents", e))
    }
}
