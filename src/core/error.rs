use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Classify a store error raised while running `context`.
    ///
    /// Foreign-key violations become `Conflict` naming the missing parent, and
    /// check-constraint violations become `Validation`. Everything else stays
    /// a database error.
    pub fn from_store(context: &str, err: sqlx::Error) -> Self {
        Self::classify(context, err, Self::missing_reference)
    }

    /// Like [`AppError::from_store`] for deletes, where a foreign-key
    /// violation means other rows still point at the record.
    pub fn from_delete(context: &str, err: sqlx::Error) -> Self {
        Self::classify(context, err, Self::still_referenced)
    }

    pub fn missing_reference(context: &str) -> Self {
        AppError::Conflict(format!("{}: referenced record does not exist", context))
    }

    pub fn still_referenced(context: &str) -> Self {
        AppError::Conflict(format!(
            "{}: record is still referenced by other records",
            context
        ))
    }

    fn classify(context: &str, err: sqlx::Error, foreign_key: fn(&str) -> Self) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_foreign_key_violation() {
                tracing::warn!("{}: restricted by foreign key: {}", context, db_err);
                return foreign_key(context);
            }
            if db_err.is_check_violation() {
                return AppError::Validation(format!("{}: {}", context, db_err.message()));
            }
        }

        tracing::error!("{}: {:?}", context, err);
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
