//! City lookups: name search, bounds filter and parent region

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CityService;
