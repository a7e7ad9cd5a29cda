use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::PhotoRepository;
use crate::core::error::{AppError, Result};
use crate::features::photos::models::{NewPhoto, Photo, PhotoParent};

pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Column list with the parent column aliased to `parent_id`
fn columns(parent: PhotoParent) -> String {
    format!(
        "id, {} AS parent_id, name, path, created_at, updated_at, deleted_at",
        parent.parent_column()
    )
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    async fn parent_label(&self, parent: PhotoParent, parent_id: i64) -> Result<Option<String>> {
        let sql = match parent {
            PhotoParent::Landmark => "SELECT name FROM landmarks WHERE id = $1",
            PhotoParent::Review => "SELECT device_id FROM reviews WHERE id = $1",
        };

        sqlx::query_scalar::<_, String>(sql)
            .bind(parent_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to fetch photo parent", e))
    }

    async fn count_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            parent.table(),
            parent.parent_column()
        );

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to count photos", e))
    }

    async fn insert(&self, parent: PhotoParent, photo: &NewPhoto) -> Result<Photo> {
        let sql = format!(
            "INSERT INTO {} ({}, name, path, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) RETURNING {}",
            parent.table(),
            parent.parent_column(),
            columns(parent)
        );

        sqlx::query_as::<_, Photo>(&sql)
            .bind(photo.parent_id)
            .bind(&photo.name)
            .bind(&photo.path)
            .bind(photo.at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to record photo", e))
    }

    async fn list(&self, parent: PhotoParent) -> Result<Vec<Photo>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE deleted_at IS NULL ORDER BY id ASC",
            columns(parent),
            parent.table()
        );

        sqlx::query_as::<_, Photo>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to list photos", e))
    }

    async fn list_for_parent(&self, parent: PhotoParent, parent_id: i64) -> Result<Vec<Photo>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = $1 AND deleted_at IS NULL ORDER BY id ASC",
            columns(parent),
            parent.table(),
            parent.parent_column()
        );

        sqlx::query_as::<_, Photo>(&sql)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to list photos of parent", e))
    }

    async fn find(&self, parent: PhotoParent, id: i64) -> Result<Option<Photo>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1 AND deleted_at IS NULL",
            columns(parent),
            parent.table()
        );

        sqlx::query_as::<_, Photo>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to fetch photo", e))
    }

    async fn soft_delete(&self, parent: PhotoParent, id: i64, at: DateTime<Utc>) -> Result<bool> {
        let sql = format!(
            "UPDATE {} SET deleted_at = $2, updated_at = $2 WHERE id = $1 AND deleted_at IS NULL",
            parent.table()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_store("Failed to delete photo", e))?;

        Ok(result.rows_affected() > 0)
    }
}
