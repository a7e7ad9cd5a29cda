mod city_dto;

pub use city_dto::{CityFilterQuery, CityResponseDto, CitySearchQuery};
