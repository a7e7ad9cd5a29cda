use utoipa::{Modify, OpenApi};

use crate::features::cities::{dtos as cities_dtos, handlers as cities_handlers};
use crate::features::countries::{dtos as countries_dtos, handlers as countries_handlers};
use crate::features::landmarks::{dtos as landmarks_dtos, handlers as landmarks_handlers};
use crate::features::photos::{dtos as photos_dtos, handlers as photos_handlers};
use crate::features::regions::{dtos as regions_dtos, handlers as regions_handlers};
use crate::features::reviews::{dtos as reviews_dtos, handlers as reviews_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Countries
        countries_handlers::list_countries,
        countries_handlers::get_country,
        countries_handlers::lookup_country,
        // Regions
        regions_handlers::list_regions,
        regions_handlers::get_region,
        regions_handlers::create_region,
        regions_handlers::update_region,
        regions_handlers::delete_region,
        regions_handlers::search_regions,
        regions_handlers::filter_regions,
        // GeoJSON
        regions_handlers::submit_geojson,
        regions_handlers::submit_region_geojson,
        regions_handlers::get_geojson,
        regions_handlers::list_geojson,
        // Cities
        cities_handlers::search_cities,
        cities_handlers::filter_cities,
        cities_handlers::get_city_region,
        // Landmarks
        landmarks_handlers::search_landmarks,
        landmarks_handlers::filter_landmarks,
        landmarks_handlers::list_city_landmarks,
        landmarks_handlers::list_region_landmarks,
        landmarks_handlers::list_landmark_reviews,
        landmarks_handlers::get_review_count,
        landmarks_handlers::get_average_rating,
        landmarks_handlers::get_landmark_details,
        landmarks_handlers::get_landmark_photos,
        // Reviews
        reviews_handlers::create_review,
        reviews_handlers::search_reviews,
        reviews_handlers::filter_reviews,
        reviews_handlers::list_device_reviews,
        // Photos
        photos_handlers::upload_landmark_photo,
        photos_handlers::list_landmark_photos,
        photos_handlers::get_landmark_photo,
        photos_handlers::delete_landmark_photo,
        photos_handlers::upload_review_photo,
        photos_handlers::list_review_photos,
        photos_handlers::get_review_photo,
        photos_handlers::delete_review_photo,
    ),
    components(
        schemas(
            Meta,
            // Countries
            countries_dtos::CountryResponseDto,
            countries_dtos::RegionWithGeoJsonDto,
            countries_dtos::CountryWithRegionsDto,
            ApiResponse<countries_dtos::CountryWithRegionsDto>,
            ApiResponse<Vec<countries_dtos::CountryWithRegionsDto>>,
            // Regions
            regions_dtos::RegionRequestDto,
            regions_dtos::RegionResponseDto,
            regions_dtos::GeoJsonIdDto,
            regions_dtos::GeoJsonResponseDto,
            regions_dtos::GeoJsonRecordDto,
            ApiResponse<regions_dtos::RegionResponseDto>,
            ApiResponse<Vec<regions_dtos::RegionResponseDto>>,
            ApiResponse<regions_dtos::GeoJsonIdDto>,
            ApiResponse<regions_dtos::GeoJsonResponseDto>,
            ApiResponse<Vec<regions_dtos::GeoJsonRecordDto>>,
            // Cities
            cities_dtos::CityResponseDto,
            ApiResponse<Vec<cities_dtos::CityResponseDto>>,
            // Landmarks
            landmarks_dtos::LandmarkResponseDto,
            landmarks_dtos::LandmarkDetailsDto,
            landmarks_dtos::ReviewCountDto,
            landmarks_dtos::AverageRatingDto,
            landmarks_dtos::PhotoLinksDto,
            ApiResponse<Vec<landmarks_dtos::LandmarkResponseDto>>,
            ApiResponse<landmarks_dtos::LandmarkDetailsDto>,
            ApiResponse<landmarks_dtos::ReviewCountDto>,
            ApiResponse<landmarks_dtos::AverageRatingDto>,
            ApiResponse<landmarks_dtos::PhotoLinksDto>,
            // Reviews
            reviews_dtos::CreateReviewForm,
            reviews_dtos::ReviewResponseDto,
            reviews_dtos::ReviewWithPhotosDto,
            ApiResponse<Vec<reviews_dtos::ReviewResponseDto>>,
            ApiResponse<reviews_dtos::ReviewWithPhotosDto>,
            // Photos
            photos_dtos::LandmarkPhotoUploadForm,
            photos_dtos::ReviewPhotoUploadForm,
            photos_dtos::PhotoResponseDto,
            ApiResponse<photos_dtos::PhotoResponseDto>,
            ApiResponse<Vec<photos_dtos::PhotoResponseDto>>,
        )
    ),
    tags(
        (name = "countries", description = "Countries and nearest-country lookup"),
        (name = "regions", description = "Regions and their GeoJSON boundaries"),
        (name = "cities", description = "City search and filters"),
        (name = "landmarks", description = "Landmarks, review statistics and details"),
        (name = "reviews", description = "Landmark reviews"),
        (name = "photos", description = "Landmark and review photo uploads"),
    ),
    info(
        title = "Landmarks API",
        version = "0.1.0",
        description = "API documentation for the landmarks service",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/countries/lookup",
            "/api/regions/{id}",
            "/api/geojson/{region_id}",
            "/api/cities/{id}/region",
            "/api/landmarks/{id}/details",
            "/api/reviews",
            "/api/landmarkphotos/{id}",
            "/api/reviewphotos",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{} is missing", path);
        }
    }

    #[test]
    fn test_info_modifier_overrides_config_values() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Custom".to_string(),
            version: "9.9.9".to_string(),
            description: "From config".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Custom");
        assert_eq!(doc.info.version, "9.9.9");
        assert_eq!(doc.info.description.as_deref(), Some("From config"));
    }
}
