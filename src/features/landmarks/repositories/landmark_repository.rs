use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::LandmarkRepository;
use crate::core::error::{AppError, Result};
use crate::features::landmarks::models::{Landmark, LandmarkFilter};

const LANDMARK_COLUMNS: &str = "l.id, l.name, l.landmark_type, l.information, l.description, \
     l.latitude, l.longitude, l.city_id, l.created_at, l.updated_at";

pub struct PgLandmarkRepository {
    pool: PgPool,
}

impl PgLandmarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select() -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new("SELECT ");
        query.push(LANDMARK_COLUMNS).push(" FROM landmarks l");
        query
    }
}

#[async_trait]
impl LandmarkRepository for PgLandmarkRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Landmark>> {
        let mut query = Self::select();
        query.push(" WHERE l.id = ").push_bind(id);

        query
            .build_query_as::<Landmark>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to fetch landmark", e))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Landmark>> {
        let pattern = format!("%{}%", keyword.to_lowercase());
        let mut query = Self::select();
        query
            .push(" WHERE LOWER(l.name) LIKE ")
            .push_bind(pattern.clone())
            .push(" OR LOWER(l.description) LIKE ")
            .push_bind(pattern)
            .push(" ORDER BY l.id ASC");

        query
            .build_query_as::<Landmark>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to search landmarks", e))
    }

    async fn filter(&self, filter: &LandmarkFilter) -> Result<Vec<Landmark>> {
        let mut query = Self::select();
        query.push(" WHERE TRUE");

        if let Some(city_id) = filter.city_id {
            query.push(" AND l.city_id = ").push_bind(city_id);
        }
        if let Some(kind) = &filter.landmark_type {
            query
                .push(" AND LOWER(l.landmark_type) = ")
                .push_bind(kind.to_lowercase());
        }
        let bounds = [
            (" AND l.latitude >= ", filter.min_latitude),
            (" AND l.latitude <= ", filter.max_latitude),
            (" AND l.longitude >= ", filter.min_longitude),
            (" AND l.longitude <= ", filter.max_longitude),
        ];
        for (condition, value) in bounds {
            if let Some(value) = value {
                query.push(condition).push_bind(value);
            }
        }
        query.push(" ORDER BY l.id ASC");

        query
            .build_query_as::<Landmark>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to filter landmarks", e))
    }

    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Landmark>> {
        let mut query = Self::select();
        query
            .push(" WHERE l.city_id = ")
            .push_bind(city_id)
            .push(" ORDER BY l.id ASC");

        query
            .build_query_as::<Landmark>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to list landmarks of city", e))
    }

    async fn list_by_region(&self, region_id: i64) -> Result<Vec<Landmark>> {
        let mut query = Self::select();
        query
            .push(" JOIN cities c ON c.id = l.city_id WHERE c.region_id = ")
            .push_bind(region_id)
            .push(" ORDER BY l.id ASC");

        query
            .build_query_as::<Landmark>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to list landmarks of region", e))
    }
}
