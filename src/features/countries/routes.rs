use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::countries::handlers;
use crate::features::countries::services::CountryService;

pub fn routes(service: Arc<CountryService>) -> Router {
    Router::new()
        .route("/api/countries", get(handlers::list_countries))
        .route("/api/countries/lookup", get(handlers::lookup_country))
        .route("/api/countries/{id}", get(handlers::get_country))
        .with_state(service)
}
