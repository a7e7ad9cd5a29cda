use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// What a photo is attached to; each kind has its own table and key namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoParent {
    Landmark,
    Review,
}

impl PhotoParent {
    pub fn table(self) -> &'static str {
        match self {
            PhotoParent::Landmark => "landmark_photos",
            PhotoParent::Review => "review_photos",
        }
    }

    pub fn parent_column(self) -> &'static str {
        match self {
            PhotoParent::Landmark => "landmark_id",
            PhotoParent::Review => "review_id",
        }
    }

    /// First segment of every storage key for this kind
    pub fn namespace(self) -> &'static str {
        match self {
            PhotoParent::Landmark => "landmarks",
            PhotoParent::Review => "reviews",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PhotoParent::Landmark => "Landmark",
            PhotoParent::Review => "Review",
        }
    }
}

/// Photo metadata row; the binary lives in photo storage at `path`
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: i64,
    pub parent_id: i64,
    /// Original filename as uploaded
    pub name: String,
    /// Local path or public URL
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub parent_id: i64,
    pub name: String,
    pub path: String,
    pub at: DateTime<Utc>,
}
