//! Storage names for uploaded photos: `{namespace}/{base}/{base}_{seq}{.ext}`

use std::path::Path;

use crate::features::photos::models::PhotoParent;
use crate::shared::constants::FALLBACK_PHOTO_BASE_NAME;
use crate::shared::validation::STORAGE_NAME_SEPARATOR_REGEX;

/// Base name derived from a parent's label.
///
/// Whitespace runs and path separators become `_`; a label with nothing
/// usable left falls back to `unnamed`.
pub fn base_name(label: &str) -> String {
    let base = STORAGE_NAME_SEPARATOR_REGEX.replace_all(label, "_");
    if base.chars().all(|c| c == '_' || c == '.') {
        FALLBACK_PHOTO_BASE_NAME.to_string()
    } else {
        base.into_owned()
    }
}

/// Extension (with the dot) from the uploaded filename, or from the content type
pub fn extension(file_name: &str, content_type: &str) -> String {
    let from_name = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 5)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()));

    if let Some(ext) = from_name {
        return format!(".{}", ext.to_ascii_lowercase());
    }

    match content_type {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => "",
    }
    .to_string()
}

pub fn storage_key(parent: PhotoParent, base: &str, sequence: i64, extension: &str) -> String {
    format!(
        "{}/{}/{}_{}{}",
        parent.namespace(),
        base,
        base,
        sequence,
        extension
    )
}
