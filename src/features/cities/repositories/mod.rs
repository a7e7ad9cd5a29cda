mod city_repository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::cities::models::{City, CityFilter};

pub use city_repository::PgCityRepository;

#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<City>>;
    /// Case-insensitive substring match on the name
    async fn search_by_name(&self, name: &str) -> Result<Vec<City>>;
    async fn filter(&self, filter: &CityFilter) -> Result<Vec<City>>;
}
