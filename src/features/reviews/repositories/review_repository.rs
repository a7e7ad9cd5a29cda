use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::ReviewRepository;
use crate::core::error::{AppError, Result};
use crate::features::reviews::models::{Review, ReviewFilter, ReviewInput};

pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, input: &ReviewInput) -> Result<Review> {
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (device_id, name, comment, rating, landmark_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, device_id, name, comment, rating, landmark_id, created_at, updated_at
            "#,
        )
        .bind(&input.device_id)
        .bind(&input.name)
        .bind(&input.comment)
        .bind(input.rating)
        .bind(input.landmark_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to create review", e))
    }

    async fn list_by_landmark(&self, landmark_id: i64) -> Result<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, device_id, name, comment, rating, landmark_id, created_at, updated_at
            FROM reviews
            WHERE landmark_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(landmark_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to list reviews of landmark", e))
    }

    async fn count_by_landmark(&self, landmark_id: i64) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE landmark_id = $1")
            .bind(landmark_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to count reviews", e))
    }

    async fn average_rating(&self, landmark_id: i64) -> Result<f64> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(AVG(rating)::float8, 0) FROM reviews WHERE landmark_id = $1",
        )
        .bind(landmark_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to compute average rating", e))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Review>> {
        let pattern = format!("%{}%", keyword.to_lowercase());
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, device_id, name, comment, rating, landmark_id, created_at, updated_at
            FROM reviews
            WHERE LOWER(name) LIKE $1
               OR LOWER(comment) LIKE $1
               OR CAST(rating AS TEXT) LIKE $1
            ORDER BY id ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to search reviews", e))
    }

    async fn filter(&self, filter: &ReviewFilter) -> Result<Vec<Review>> {
        let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, device_id, name, comment, rating, landmark_id, created_at, updated_at \
             FROM reviews WHERE TRUE",
        );
        if let Some(min) = filter.min_rating {
            query.push(" AND rating >= ").push_bind(min);
        }
        if let Some(max) = filter.max_rating {
            query.push(" AND rating <= ").push_bind(max);
        }
        query.push(" ORDER BY id ASC");

        query
            .build_query_as::<Review>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to filter reviews", e))
    }

    async fn list_by_device(&self, device_id: &str) -> Result<Vec<Review>> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, device_id, name, comment, rating, landmark_id, created_at, updated_at
            FROM reviews
            WHERE device_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(device_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to list reviews of device", e))
    }

    async fn find_by_device_and_landmark(
        &self,
        device_id: &str,
        landmark_id: i64,
    ) -> Result<Option<Review>> {
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id, device_id, name, comment, rating, landmark_id, created_at, updated_at
            FROM reviews
            WHERE device_id = $1 AND landmark_id = $2
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(device_id)
        .bind(landmark_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_store("Failed to fetch review of device", e))
    }
}
