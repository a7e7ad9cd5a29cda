use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::photos::handlers;
use crate::features::photos::services::PhotoService;

pub fn routes(service: Arc<PhotoService>) -> Router {
    Router::new()
        .route(
            "/api/landmarkphotos",
            get(handlers::list_landmark_photos).post(handlers::upload_landmark_photo),
        )
        .route(
            "/api/landmarkphotos/{id}",
            get(handlers::get_landmark_photo).delete(handlers::delete_landmark_photo),
        )
        .route(
            "/api/reviewphotos",
            get(handlers::list_review_photos).post(handlers::upload_review_photo),
        )
        .route(
            "/api/reviewphotos/{id}",
            get(handlers::get_review_photo).delete(handlers::delete_review_photo),
        )
        .with_state(service)
}
