mod geojson;
mod region;

pub use geojson::{BoundarySummary, GeoJson, GeoJsonUpsert};
pub use region::{Region, RegionFilter, RegionInput};
