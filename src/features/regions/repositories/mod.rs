//! Store access for regions and their boundary documents

mod geojson_repository;
mod region_repository;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::features::regions::models::{GeoJson, GeoJsonUpsert, Region, RegionFilter, RegionInput};

pub use geojson_repository::PgGeoJsonRepository;
pub use region_repository::PgRegionRepository;

#[async_trait]
pub trait RegionRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Region>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Region>>;
    async fn list_by_country(&self, country_id: i64) -> Result<Vec<Region>>;
    async fn create(&self, input: &RegionInput) -> Result<Region>;
    /// Full replace; `None` when the region does not exist
    async fn update(&self, id: i64, input: &RegionInput) -> Result<Option<Region>>;
    /// Hard delete; `false` when nothing was deleted
    async fn delete(&self, id: i64) -> Result<bool>;
    /// Case-insensitive substring match on the name
    async fn search_by_name(&self, name: &str) -> Result<Vec<Region>>;
    async fn filter(&self, filter: &RegionFilter) -> Result<Vec<Region>>;
    /// Move `updated_at` forward to `at` (never backwards)
    async fn touch(&self, id: i64, at: DateTime<Utc>) -> Result<()>;
}

#[async_trait]
pub trait GeoJsonRepository: Send + Sync {
    /// Insert or replace the document of `record.region_id` in one step
    async fn upsert(&self, record: &GeoJsonUpsert) -> Result<GeoJson>;
    async fn find_by_region(&self, region_id: i64) -> Result<Option<GeoJson>>;
    /// Every document in ascending id order
    async fn list(&self) -> Result<Vec<GeoJson>>;
}
