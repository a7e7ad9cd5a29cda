use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::CityRepository;
use crate::core::error::{AppError, Result};
use crate::features::cities::models::{City, CityFilter};

pub struct PgCityRepository {
    pool: PgPool,
}

impl PgCityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for PgCityRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<City>> {
        sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, area, population, latitude, longitude, region_id, created_at, updated_at
            FROM cities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to fetch city", e))
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<City>> {
        let pattern = format!("%{}%", name.to_lowercase());
        sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, area, population, latitude, longitude, region_id, created_at, updated_at
            FROM cities
            WHERE LOWER(name) LIKE $1
            ORDER BY id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to search cities", e))
    }

    async fn filter(&self, filter: &CityFilter) -> Result<Vec<City>> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, name, area, population, latitude, longitude, region_id, created_at, updated_at \
             FROM cities WHERE TRUE",
        );

        let bounds = [
            ("area >= ", filter.min_area),
            ("area <= ", filter.max_area),
            ("latitude >= ", filter.min_latitude),
            ("latitude <= ", filter.max_latitude),
            ("longitude >= ", filter.min_longitude),
            ("longitude <= ", filter.max_longitude),
        ];
        if let Some(min) = filter.min_population {
            query.push(" AND population >= ").push_bind(min);
        }
        if let Some(max) = filter.max_population {
            query.push(" AND population <= ").push_bind(max);
        }
        for (condition, value) in bounds {
            if let Some(value) = value {
                query.push(" AND ").push(condition).push_bind(value);
            }
        }
        query.push(" ORDER BY id ASC");

        query
            .build_query_as::<City>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to filter cities", e))
    }
}
