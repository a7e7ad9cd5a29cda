use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::landmarks::handlers;
use crate::features::landmarks::services::LandmarkService;

pub fn routes(service: Arc<LandmarkService>) -> Router {
    Router::new()
        .route("/api/landmarks/search", get(handlers::search_landmarks))
        .route("/api/landmarks/filter", get(handlers::filter_landmarks))
        .route(
            "/api/landmarks/city/{city_id}",
            get(handlers::list_city_landmarks),
        )
        .route(
            "/api/landmarks/region/{region_id}",
            get(handlers::list_region_landmarks),
        )
        .route(
            "/api/landmarks/{id}/reviews",
            get(handlers::list_landmark_reviews),
        )
        .route(
            "/api/landmarks/{id}/review-count",
            get(handlers::get_review_count),
        )
        .route(
            "/api/landmarks/{id}/average-rating",
            get(handlers::get_average_rating),
        )
        .route(
            "/api/landmarks/{id}/details",
            get(handlers::get_landmark_details),
        )
        .route("/api/landmarks/{id}/photos", get(handlers::get_landmark_photos))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::photos::PhotoService;
    use crate::shared::test_helpers::{MemoryPhotoStorage, MemoryStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(store: &Arc<MemoryStore>) -> TestServer {
        let photos = Arc::new(PhotoService::new(store.clone(), MemoryPhotoStorage::new()));
        let service = LandmarkService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            photos,
        );
        TestServer::new(routes(Arc::new(service))).unwrap()
    }

    #[tokio::test]
    async fn test_search_and_filter() {
        let store = MemoryStore::new();
        let region = store.add_region(None, "Bali");
        let city = store.add_city(region.id, "Tabanan", 460_000);
        let landmark = store.add_landmark(city.id, "Tanah Lot", "temple");
        let server = server(&store);

        let found = server.get("/api/landmarks/search?keyword=lot").await;
        found.assert_status_ok();
        let body = found.json::<Value>();
        assert_eq!(body["data"][0]["id"], json!(landmark.id));
        assert_eq!(body["data"][0]["type"], json!("temple"));

        server
            .get("/api/landmarks/search?keyword=%20")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let filtered = server
            .get("/api/landmarks/filter?type=museum")
            .await
            .json::<Value>();
        assert_eq!(filtered["data"], json!([]));

        let by_region = server
            .get(&format!("/api/landmarks/region/{}", region.id))
            .await
            .json::<Value>();
        assert_eq!(by_region["meta"]["total"], json!(1));
    }

    #[tokio::test]
    async fn test_details_and_statistics() {
        let store = MemoryStore::new();
        let region = store.add_region(None, "Bali");
        let city = store.add_city(region.id, "Tabanan", 460_000);
        let landmark = store.add_landmark(city.id, "Tanah Lot", "temple");
        store.add_review(landmark.id, "device-a", 3);
        store.add_review(landmark.id, "device-b", 5);
        let server = server(&store);

        let count = server
            .get(&format!("/api/landmarks/{}/review-count", landmark.id))
            .await
            .json::<Value>();
        assert_eq!(count["data"]["review_count"], json!(2));

        let average = server
            .get(&format!("/api/landmarks/{}/average-rating", landmark.id))
            .await
            .json::<Value>();
        assert_eq!(average["data"]["average_rating"], json!(4.0));

        let details = server
            .get(&format!("/api/landmarks/{}/details?device_id=device-b", landmark.id))
            .await
            .json::<Value>();
        assert_eq!(details["data"]["landmark"]["name"], json!("Tanah Lot"));
        assert_eq!(details["data"]["review_count"], json!(2));
        assert_eq!(details["data"]["user_review"]["rating"], json!(5));
        assert_eq!(details["data"]["photos"], json!([]));

        let without_device = server
            .get(&format!("/api/landmarks/{}/details", landmark.id))
            .await
            .json::<Value>();
        assert!(without_device["data"].get("user_review").is_none());

        let photos = server
            .get(&format!("/api/landmarks/{}/photos", landmark.id))
            .await
            .json::<Value>();
        assert_eq!(photos["data"]["photo_links"], json!([]));

        server
            .get("/api/landmarks/999/details")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/landmarks/abc/reviews")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
