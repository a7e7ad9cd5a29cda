use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reviews::handlers;
use crate::features::reviews::services::ReviewService;

pub fn routes(service: Arc<ReviewService>) -> Router {
    Router::new()
        .route("/api/reviews", post(handlers::create_review))
        .route("/api/reviews/search", get(handlers::search_reviews))
        .route("/api/reviews/filter", get(handlers::filter_reviews))
        .route(
            "/api/reviews/user/{device_id}",
            get(handlers::list_device_reviews),
        )
        .with_state(service)
}
