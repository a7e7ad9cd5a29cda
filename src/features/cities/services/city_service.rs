use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::cities::models::{City, CityFilter};
use crate::features::cities::repositories::CityRepository;
use crate::features::regions::models::Region;
use crate::features::regions::repositories::RegionRepository;
use crate::shared::validation::ensure_range;

pub struct CityService {
    cities: Arc<dyn CityRepository>,
    regions: Arc<dyn RegionRepository>,
}

impl CityService {
    pub fn new(cities: Arc<dyn CityRepository>, regions: Arc<dyn RegionRepository>) -> Self {
        Self { cities, regions }
    }

    pub async fn search(&self, name: &str) -> Result<Vec<City>> {
        self.cities.search_by_name(name).await
    }

    pub async fn filter(&self, filter: CityFilter) -> Result<Vec<City>> {
        ensure_range("population", filter.min_population, filter.max_population)?;
        ensure_range("area", filter.min_area, filter.max_area)?;
        ensure_range("latitude", filter.min_latitude, filter.max_latitude)?;
        ensure_range("longitude", filter.min_longitude, filter.max_longitude)?;
        self.cities.filter(&filter).await
    }

    /// Region the city belongs to
    pub async fn region_of_city(&self, city_id: i64) -> Result<Region> {
        let city = self
            .cities
            .find_by_id(city_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("City with id {} not found", city_id)))?;

        self.regions
            .find_by_id(city.region_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Region with id {} not found for city {}",
                    city.region_id, city_id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MemoryStore;
    use fake::faker::address::en::CityName;
    use fake::Fake;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = MemoryStore::new();
        let region = store.add_region(None, "Bali");
        let denpasar = store.add_city(region.id, "Denpasar", 900_000);
        store.add_city(region.id, "Ubud", 75_000);
        let service = CityService::new(store.clone(), store.clone());

        let found = service.search("PASAR").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, denpasar.id);

        assert!(service.search("nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filter_by_population_bounds() {
        let store = MemoryStore::new();
        let region = store.add_region(None, "Bali");
        for population in [10_000, 50_000, 250_000] {
            let name: String = CityName().fake();
            store.add_city(region.id, &name, population);
        }
        let service = CityService::new(store.clone(), store.clone());

        let mid = service
            .filter(CityFilter {
                min_population: Some(20_000),
                max_population: Some(100_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mid.len(), 1);
        assert_eq!(mid[0].population, 50_000);

        let none = service
            .filter(CityFilter {
                min_population: Some(1_000_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_filter_rejects_inverted_bounds() {
        let store = MemoryStore::new();
        let service = CityService::new(store.clone(), store.clone());

        let result = service
            .filter(CityFilter {
                min_latitude: Some(10.0),
                max_latitude: Some(-10.0),
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("latitude")));
    }

    #[tokio::test]
    async fn test_region_of_city() {
        let store = MemoryStore::new();
        let region = store.add_region(None, "Bali");
        let city = store.add_city(region.id, "Denpasar", 900_000);
        let service = CityService::new(store.clone(), store.clone());

        let found = assert_ok!(service.region_of_city(city.id).await);
        assert_eq!(found.id, region.id);
        assert_eq!(found.name, "Bali");

        let missing = assert_err!(service.region_of_city(999).await);
        assert!(matches!(missing, AppError::NotFound(_)));
    }
}
