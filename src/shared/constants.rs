/// Mean Earth radius in kilometres used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Maximum accepted photo size in bytes (10MB)
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;

/// Image MIME types accepted by the photo upload endpoints
pub const ALLOWED_PHOTO_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// How many sequence numbers a photo upload may skip over before giving up
pub const MAX_PHOTO_NAME_ATTEMPTS: i64 = 1000;

/// Base name used when a parent's display name has nothing usable in it
pub const FALLBACK_PHOTO_BASE_NAME: &str = "unnamed";

/// Inclusive bounds of a review rating
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
