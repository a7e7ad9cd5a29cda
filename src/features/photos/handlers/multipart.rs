use std::str::FromStr;

use axum::extract::multipart::Field;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::photos::services::PhotoUpload;

/// Read a file field of a multipart form into a [`PhotoUpload`]
pub async fn read_upload(field: Field<'_>) -> Result<PhotoUpload> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unnamed".to_string());

    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read file bytes: {}", e);
        AppError::BadRequest(format!("Failed to read file data: {}", e))
    })?;

    Ok(PhotoUpload {
        file_name,
        content_type,
        data: data.to_vec(),
    })
}

pub async fn read_text(field: Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// Parse a numeric form value, naming the field on failure
pub fn parse_field<T: FromStr>(name: &str, text: &str) -> Result<T> {
    text.trim()
        .parse::<T>()
        .map_err(|_| AppError::Validation(format!("{} must be a number, got '{}'", name, text)))
}
