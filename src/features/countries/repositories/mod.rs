mod country_repository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::countries::models::Country;

pub use country_repository::PgCountryRepository;

#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Every country in ascending id order
    async fn list(&self) -> Result<Vec<Country>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Country>>;
}
