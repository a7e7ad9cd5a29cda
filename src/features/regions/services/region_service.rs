use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::regions::models::{Region, RegionFilter, RegionInput};
use crate::features::regions::repositories::RegionRepository;
use crate::shared::validation::ensure_range;

/// Service for region records
pub struct RegionService {
    regions: Arc<dyn RegionRepository>,
}

impl RegionService {
    pub fn new(regions: Arc<dyn RegionRepository>) -> Self {
        Self { regions }
    }

    pub async fn list(&self) -> Result<Vec<Region>> {
        self.regions.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Region> {
        self.regions
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: RegionInput) -> Result<Region> {
        let region = self.regions.create(&input).await?;
        tracing::info!("Created region {} ({})", region.id, region.name);
        Ok(region)
    }

    /// Full replace of every writable field
    pub async fn update(&self, id: i64, input: RegionInput) -> Result<Region> {
        self.regions
            .update(id, &input)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Hard delete; fails with `Conflict` while cities or a boundary reference the region
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.regions.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!("Deleted region {}", id);
        Ok(())
    }

    pub async fn search(&self, name: &str) -> Result<Vec<Region>> {
        self.regions.search_by_name(name).await
    }

    pub async fn filter(&self, filter: RegionFilter) -> Result<Vec<Region>> {
        ensure_range("population", filter.min_population, filter.max_population)?;
        ensure_range("area", filter.min_area, filter.max_area)?;
        self.regions.filter(&filter).await
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Region with id {} not found", id))
}
