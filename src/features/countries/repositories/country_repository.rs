use async_trait::async_trait;
use sqlx::PgPool;

use super::CountryRepository;
use crate::core::error::{AppError, Result};
use crate::features::countries::models::Country;

pub struct PgCountryRepository {
    pool: PgPool,
}

impl PgCountryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn list(&self) -> Result<Vec<Country>> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, latitude, longitude, created_at, updated_at
            FROM countries
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to list countries", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Country>> {
        sqlx::query_as::<_, Country>(
            r#"
            SELECT id, name, latitude, longitude, created_at, updated_at
            FROM countries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to fetch country", e))
    }
}
