use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::cities::handlers;
use crate::features::cities::services::CityService;

pub fn routes(service: Arc<CityService>) -> Router {
    Router::new()
        .route("/api/cities/search", get(handlers::search_cities))
        .route("/api/cities/filter", get(handlers::filter_cities))
        .route("/api/cities/{id}/region", get(handlers::get_city_region))
        .with_state(service)
}
