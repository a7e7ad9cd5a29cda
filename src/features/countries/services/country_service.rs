use std::sync::Arc;

use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::features::countries::models::Country;
use crate::features::countries::repositories::CountryRepository;
use crate::features::regions::models::Region;
use crate::features::regions::repositories::RegionRepository;
use crate::features::regions::services::GeoJsonService;
use crate::shared::constants::EARTH_RADIUS_KM;

#[derive(Debug, Clone)]
pub struct RegionWithGeoJson {
    pub region: Region,
    pub geojson: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct CountryWithRegions {
    pub country: Country,
    pub regions: Vec<RegionWithGeoJson>,
}

/// Great-circle distance in kilometres between two points given in degrees
/// (spherical law of cosines)
pub fn great_circle_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let delta_lambda = (lon2 - lon1).to_radians();

    let cos_angle = phi1.cos() * phi2.cos() * delta_lambda.cos() + phi1.sin() * phi2.sin();
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Country lookups with their regions and boundary documents attached
pub struct CountryService {
    countries: Arc<dyn CountryRepository>,
    regions: Arc<dyn RegionRepository>,
    geojson: Arc<GeoJsonService>,
}

impl CountryService {
    pub fn new(
        countries: Arc<dyn CountryRepository>,
        regions: Arc<dyn RegionRepository>,
        geojson: Arc<GeoJsonService>,
    ) -> Self {
        Self {
            countries,
            regions,
            geojson,
        }
    }

    pub async fn list(&self) -> Result<Vec<CountryWithRegions>> {
        let countries = self.countries.list().await?;
        let mut result = Vec::with_capacity(countries.len());
        for country in countries {
            result.push(self.with_regions(country).await?);
        }
        Ok(result)
    }

    pub async fn get(&self, id: i64) -> Result<CountryWithRegions> {
        let country = self
            .countries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Country with id {} not found", id)))?;
        self.with_regions(country).await
    }

    /// Country whose reference point is closest to the given coordinates.
    ///
    /// Ties go to the lowest id. Countries whose stored coordinates give no
    /// finite distance are skipped.
    pub async fn nearest(&self, latitude: &str, longitude: &str) -> Result<CountryWithRegions> {
        let latitude = parse_coordinate("latitude", latitude)?;
        let longitude = parse_coordinate("longitude", longitude)?;

        let mut countries = self.countries.list().await?;
        countries.sort_by_key(|c| c.id);

        let mut nearest: Option<(f64, Country)> = None;
        for country in countries {
            let distance = great_circle_km(latitude, longitude, country.latitude, country.longitude);
            if !distance.is_finite() {
                tracing::warn!("Skipping country {} with unusable coordinates", country.id);
                continue;
            }
            if nearest.as_ref().is_none_or(|(best, _)| distance < *best) {
                nearest = Some((distance, country));
            }
        }

        let (distance, country) =
            nearest.ok_or_else(|| AppError::NotFound("No countries available".to_string()))?;
        tracing::debug!(
            "Nearest country to ({}, {}) is {} at {:.1} km",
            latitude,
            longitude,
            country.id,
            distance
        );

        self.with_regions(country).await
    }

    async fn with_regions(&self, country: Country) -> Result<CountryWithRegions> {
        let regions = self.regions.list_by_country(country.id).await?;
        let mut attached = Vec::with_capacity(regions.len());
        for region in regions {
            let geojson = self.geojson.payload_of(region.id).await?;
            attached.push(RegionWithGeoJson { region, geojson });
        }
        Ok(CountryWithRegions {
            country,
            regions: attached,
        })
    }
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| AppError::Validation(format!("{} must be a number, got '{}'", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::MemoryStore;
    use serde_json::json;

    fn service(store: &Arc<MemoryStore>) -> (CountryService, Arc<GeoJsonService>) {
        let geojson = Arc::new(GeoJsonService::new(store.clone(), store.clone(), true));
        (
            CountryService::new(store.clone(), store.clone(), geojson.clone()),
            geojson,
        )
    }

    #[test]
    fn test_great_circle_km() {
        assert_eq!(great_circle_km(0.0, 0.0, 0.0, 0.0), 0.0);

        let quarter = great_circle_km(0.0, 0.0, 0.0, 90.0);
        assert!((quarter - EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2).abs() < 1e-6);

        let one_degree = great_circle_km(0.0, 0.0, 0.0, 1.0);
        assert!((one_degree - 111.19).abs() < 0.01);

        // Antipodes stay finite despite rounding
        let antipodal = great_circle_km(10.0, 20.0, -10.0, -160.0);
        assert!((antipodal - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_nearest_country() {
        let store = MemoryStore::new();
        store.add_country("Ten", 10.0, 10.0);
        store.add_country("Minus five", -5.0, -5.0);
        let near = store.add_country("Zero one", 0.0, 1.0);
        let (service, _) = service(&store);

        let found = service.nearest("0", "0").await.unwrap();
        assert_eq!(found.country.id, near.id);
    }

    #[tokio::test]
    async fn test_nearest_country_tie_goes_to_lowest_id() {
        let store = MemoryStore::new();
        let first = store.add_country("East", 0.0, 1.0);
        store.add_country("West", 0.0, -1.0);
        let (service, _) = service(&store);

        let found = service.nearest("0", "0").await.unwrap();
        assert_eq!(found.country.id, first.id);
    }

    #[tokio::test]
    async fn test_nearest_country_skips_unusable_coordinates() {
        let store = MemoryStore::new();
        store.add_country("Broken", f64::NAN, 0.0);
        let far = store.add_country("Far", 40.0, 40.0);
        let (service, _) = service(&store);

        let found = service.nearest("0", "0").await.unwrap();
        assert_eq!(found.country.id, far.id);
    }

    #[tokio::test]
    async fn test_nearest_country_without_countries() {
        let (service, _) = service(&MemoryStore::new());
        assert!(matches!(
            service.nearest("0", "0").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_nearest_country_rejects_bad_coordinates() {
        let store = MemoryStore::new();
        store.add_country("Any", 0.0, 0.0);
        let (service, _) = service(&store);

        for (lat, lon) in [("abc", "0"), ("0", ""), ("NaN", "0"), ("0", "inf")] {
            assert!(
                matches!(service.nearest(lat, lon).await, Err(AppError::Validation(_))),
                "({}, {}) should be rejected",
                lat,
                lon
            );
        }
    }

    #[tokio::test]
    async fn test_regions_carry_geojson() {
        let store = MemoryStore::new();
        let country = store.add_country("Indonesia", -2.5, 118.0);
        let bali = store.add_region(Some(country.id), "Bali");
        let java = store.add_region(Some(country.id), "Java");
        store.add_region(None, "Elsewhere");
        let (service, geojson) = service(&store);

        let payload = json!({"middle_point": [115.1, -8.4], "zoom": 9, "type": "Feature"});
        geojson
            .submit(bali.id, payload.as_object().unwrap().clone())
            .await
            .unwrap();

        let found = service.get(country.id).await.unwrap();
        assert_eq!(found.regions.len(), 2);
        assert_eq!(found.regions[0].region.id, bali.id);
        assert_eq!(found.regions[0].geojson, Some(payload));
        assert_eq!(found.regions[1].region.id, java.id);
        assert_eq!(found.regions[1].geojson, None);

        assert_eq!(service.list().await.unwrap().len(), 1);
        assert!(matches!(service.get(999).await, Err(AppError::NotFound(_))));
    }
}
