mod country_dto;

pub use country_dto::{CountryResponseDto, CountryWithRegionsDto, NearestCountryQuery, RegionWithGeoJsonDto};
