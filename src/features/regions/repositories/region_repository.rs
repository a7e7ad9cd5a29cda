use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::RegionRepository;
use crate::core::error::{AppError, Result};
use crate::features::regions::models::{Region, RegionFilter, RegionInput};

pub struct PgRegionRepository {
    pool: PgPool,
}

impl PgRegionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegionRepository for PgRegionRepository {
    async fn list(&self) -> Result<Vec<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, country_id, name, area, population, coordinates, created_at, updated_at
            FROM regions
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to list regions", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, country_id, name, area, population, coordinates, created_at, updated_at
            FROM regions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to fetch region", e))
    }

    async fn list_by_country(&self, country_id: i64) -> Result<Vec<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, country_id, name, area, population, coordinates, created_at, updated_at
            FROM regions
            WHERE country_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to list regions of country", e))
    }

    async fn create(&self, input: &RegionInput) -> Result<Region> {
        sqlx::query_as::<_, Region>(
            r#"
            INSERT INTO regions (country_id, name, area, population, coordinates)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, country_id, name, area, population, coordinates, created_at, updated_at
            "#,
        )
        .bind(input.country_id)
        .bind(&input.name)
        .bind(input.area)
        .bind(input.population)
        .bind(&input.coordinates)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to create region", e))
    }

    async fn update(&self, id: i64, input: &RegionInput) -> Result<Option<Region>> {
        sqlx::query_as::<_, Region>(
            r#"
            UPDATE regions
            SET country_id = $2, name = $3, area = $4, population = $5, coordinates = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, country_id, name, area, population, coordinates, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(input.country_id)
        .bind(&input.name)
        .bind(input.area)
        .bind(input.population)
        .bind(&input.coordinates)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to update region", e))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_delete("Failed to delete region", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<Region>> {
        let pattern = format!("%{}%", name.to_lowercase());
        sqlx::query_as::<_, Region>(
            r#"
            SELECT id, country_id, name, area, population, coordinates, created_at, updated_at
            FROM regions
            WHERE LOWER(name) LIKE $1
            ORDER BY id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to search regions", e))
    }

    async fn filter(&self, filter: &RegionFilter) -> Result<Vec<Region>> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, country_id, name, area, population, coordinates, created_at, updated_at \
             FROM regions WHERE TRUE",
        );
        if let Some(min) = filter.min_population {
            query.push(" AND population >= ").push_bind(min);
        }
        if let Some(max) = filter.max_population {
            query.push(" AND population <= ").push_bind(max);
        }
        if let Some(min) = filter.min_area {
            query.push(" AND area >= ").push_bind(min);
        }
        if let Some(max) = filter.max_area {
            query.push(" AND area <= ").push_bind(max);
        }
        query.push(" ORDER BY id ASC");

        query
            .build_query_as::<Region>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to filter regions", e))
    }

    async fn touch(&self, id: i64, at: DateTime<Utc>) -> Result<()> {
        sqlx::query("UPDATE regions SET updated_at = GREATEST(updated_at, $2) WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to touch region", e))?;

        Ok(())
    }
}
