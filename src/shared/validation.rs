use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::error::{AppError, Result};

lazy_static! {
    /// Runs of whitespace or path separators, collapsed to `_` in storage names
    /// - "Eiffel Tower" -> "Eiffel_Tower"
    /// - "a / b" -> "a_b"
    pub static ref STORAGE_NAME_SEPARATOR_REGEX: Regex = Regex::new(r"[\s/\\]+").unwrap();

    /// Device identifiers sent by the mobile clients
    /// - Valid: "device-123", "A1B2:C3", "4f2c_ab.9"
    /// - Invalid: "", "has space", "semi;colon"
    pub static ref DEVICE_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9._:\-]{1,128}$").unwrap();
}

/// Reject a filter whose lower bound lies above its upper bound
pub fn ensure_range<T: PartialOrd + Display>(field: &str, min: Option<T>, max: Option<T>) -> Result<()> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(AppError::Validation(format!(
            "min_{} ({}) must not exceed max_{} ({})",
            field, min, field, max
        ))),
        _ => Ok(()),
    }
}

/// Trimmed, non-empty text parameter or a `BadRequest` naming it
pub fn required_text(name: &str, value: Option<&str>) -> Result<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(AppError::BadRequest(format!(
            "{} query parameter is required",
            name
        ))),
    }
}
