mod country_service;

pub use country_service::{CountryService, CountryWithRegions, RegionWithGeoJson};
