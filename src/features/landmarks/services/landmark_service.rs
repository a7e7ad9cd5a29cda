use std::sync::Arc;

use futures::try_join;

use crate::core::error::{AppError, Result};
use crate::features::cities::repositories::CityRepository;
use crate::features::landmarks::models::{Landmark, LandmarkFilter};
use crate::features::landmarks::repositories::LandmarkRepository;
use crate::features::photos::models::{Photo, PhotoParent};
use crate::features::photos::PhotoService;
use crate::features::regions::repositories::RegionRepository;
use crate::features::reviews::models::Review;
use crate::features::reviews::repositories::ReviewRepository;
use crate::shared::validation::ensure_range;

/// Everything the landmark detail page shows
#[derive(Debug, Clone)]
pub struct LandmarkDetails {
    pub landmark: Landmark,
    pub photos: Vec<Photo>,
    pub reviews: Vec<Review>,
    pub review_count: i64,
    pub average_rating: f64,
    pub user_review: Option<Review>,
}

/// Read side of landmarks and the reviews attached to them
pub struct LandmarkService {
    landmarks: Arc<dyn LandmarkRepository>,
    cities: Arc<dyn CityRepository>,
    regions: Arc<dyn RegionRepository>,
    reviews: Arc<dyn ReviewRepository>,
    photos: Arc<PhotoService>,
}

impl LandmarkService {
    pub fn new(
        landmarks: Arc<dyn LandmarkRepository>,
        cities: Arc<dyn CityRepository>,
        regions: Arc<dyn RegionRepository>,
        reviews: Arc<dyn ReviewRepository>,
        photos: Arc<PhotoService>,
    ) -> Self {
        Self {
            landmarks,
            cities,
            regions,
            reviews,
            photos,
        }
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Landmark>> {
        self.landmarks.search(keyword).await
    }

    pub async fn filter(&self, filter: LandmarkFilter) -> Result<Vec<Landmark>> {
        ensure_range("latitude", filter.min_latitude, filter.max_latitude)?;
        ensure_range("longitude", filter.min_longitude, filter.max_longitude)?;
        self.landmarks.filter(&filter).await
    }

    pub async fn by_city(&self, city_id: i64) -> Result<Vec<Landmark>> {
        if self.cities.find_by_id(city_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "City with id {} not found",
                city_id
            )));
        }
        self.landmarks.list_by_city(city_id).await
    }

    pub async fn by_region(&self, region_id: i64) -> Result<Vec<Landmark>> {
        if self.regions.find_by_id(region_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Region with id {} not found",
                region_id
            )));
        }
        self.landmarks.list_by_region(region_id).await
    }

    pub async fn reviews(&self, id: i64) -> Result<Vec<Review>> {
        self.get(id).await?;
        self.reviews.list_by_landmark(id).await
    }

    pub async fn review_count(&self, id: i64) -> Result<i64> {
        self.get(id).await?;
        self.reviews.count_by_landmark(id).await
    }

    /// Mean rating, 0 when the landmark has no reviews
    pub async fn average_rating(&self, id: i64) -> Result<f64> {
        self.get(id).await?;
        self.reviews.average_rating(id).await
    }

    /// Landmark with its photos and reviews.
    ///
    /// With a `device_id` the latest review from that device is included.
    pub async fn details(&self, id: i64, device_id: Option<&str>) -> Result<LandmarkDetails> {
        let landmark = self.get(id).await?;
        let (photos, reviews, review_count, average_rating) = try_join!(
            self.photos.list_for_parent(PhotoParent::Landmark, id),
            self.reviews.list_by_landmark(id),
            self.reviews.count_by_landmark(id),
            self.reviews.average_rating(id),
        )?;

        let user_review = match device_id {
            Some(device_id) => {
                self.reviews
                    .find_by_device_and_landmark(device_id, id)
                    .await?
            }
            None => None,
        };

        Ok(LandmarkDetails {
            landmark,
            photos,
            reviews,
            review_count,
            average_rating,
            user_review,
        })
    }

    /// Stored paths or URLs of the landmark's live photos
    pub async fn photo_links(&self, id: i64) -> Result<Vec<String>> {
        let photos = self.photos.list_for_parent(PhotoParent::Landmark, id).await?;
        Ok(photos.into_iter().map(|photo| photo.path).collect())
    }

    async fn get(&self, id: i64) -> Result<Landmark> {
        self.landmarks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Landmark with id {} not found", id)))
    }
}
