mod landmark_repository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::landmarks::models::{Landmark, LandmarkFilter};

pub use landmark_repository::PgLandmarkRepository;

#[async_trait]
pub trait LandmarkRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Landmark>>;
    /// Case-insensitive keyword match over name and description
    async fn search(&self, keyword: &str) -> Result<Vec<Landmark>>;
    async fn filter(&self, filter: &LandmarkFilter) -> Result<Vec<Landmark>>;
    async fn list_by_city(&self, city_id: i64) -> Result<Vec<Landmark>>;
    /// Landmarks of every city in the region
    async fn list_by_region(&self, region_id: i64) -> Result<Vec<Landmark>>;
}
