//! Reviews: creation with photos, keyword search and rating filters

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ReviewService;
