mod geojson_handler;
mod region_handler;

pub use geojson_handler::*;
pub use region_handler::*;
