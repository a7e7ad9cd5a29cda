//! Landmark and review photos: upload, naming and metadata

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::PhotoService;
