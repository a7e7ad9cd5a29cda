//! Landmark queries, review statistics and detail views

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::LandmarkService;
