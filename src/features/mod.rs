pub mod cities;
pub mod countries;
pub mod landmarks;
pub mod photos;
pub mod regions;
pub mod reviews;
