mod geojson_service;
mod region_service;

pub use geojson_service::{GeoJsonFetch, GeoJsonService};
pub use region_service::RegionService;
