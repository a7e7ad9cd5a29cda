use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::{GeoJsonService, RegionService};

/// Routes for regions and their boundary documents
pub fn routes(regions: Arc<RegionService>, geojson: Arc<GeoJsonService>) -> Router {
    let region_routes = Router::new()
        .route(
            "/api/regions",
            get(handlers::list_regions).post(handlers::create_region),
        )
        // Static segments win over {id}
        .route("/api/regions/search", get(handlers::search_regions))
        .route("/api/regions/filter", get(handlers::filter_regions))
        .route(
            "/api/regions/{id}",
            get(handlers::get_region)
                .put(handlers::update_region)
                .delete(handlers::delete_region),
        )
        .with_state(regions);

    let geojson_routes = Router::new()
        .route("/api/geojson", get(handlers::list_geojson))
        .route(
            "/api/geojson/{region_id}",
            get(handlers::get_geojson).post(handlers::submit_geojson),
        )
        .route(
            "/api/regions/{id}/geojson",
            axum::routing::post(handlers::submit_region_geojson),
        )
        .with_state(geojson);

    region_routes.merge(geojson_routes)
}
