//! Regions and their per-region GeoJSON boundary documents.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET, POST | `/api/regions` | List or create regions |
//! | GET, PUT, DELETE | `/api/regions/{id}` | Read, replace or delete a region |
//! | GET | `/api/regions/search?name=` | Case-insensitive name search |
//! | GET | `/api/regions/filter` | Population and area bounds |
//! | POST | `/api/regions/{id}/geojson` | Store the region's boundary |
//! | GET | `/api/geojson` | Every stored boundary |
//! | GET, POST | `/api/geojson/{region_id}` | Conditional fetch / store |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::{GeoJsonService, RegionService};
