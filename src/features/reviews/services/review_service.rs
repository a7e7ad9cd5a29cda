use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::landmarks::repositories::LandmarkRepository;
use crate::features::photos::models::{Photo, PhotoParent};
use crate::features::photos::services::PhotoUpload;
use crate::features::photos::PhotoService;
use crate::features::reviews::models::{Review, ReviewFilter, ReviewInput};
use crate::features::reviews::repositories::ReviewRepository;
use crate::shared::constants::{MAX_RATING, MIN_RATING};
use crate::shared::validation::{ensure_range, DEVICE_ID_REGEX};

/// A newly created review and the photos stored with it
#[derive(Debug, Clone)]
pub struct ReviewWithPhotos {
    pub review: Review,
    pub photos: Vec<Photo>,
}

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    landmarks: Arc<dyn LandmarkRepository>,
    photos: Arc<PhotoService>,
}

impl ReviewService {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        landmarks: Arc<dyn LandmarkRepository>,
        photos: Arc<PhotoService>,
    ) -> Self {
        Self {
            reviews,
            landmarks,
            photos,
        }
    }

    /// Insert a review, then store each attached photo.
    ///
    /// Input and every upload are validated before anything is written. Past
    /// that it is not atomic: if storing a photo fails the review stays and the
    /// photo error is returned.
    pub async fn create_with_photos(
        &self,
        input: ReviewInput,
        uploads: Vec<PhotoUpload>,
    ) -> Result<ReviewWithPhotos> {
        validate_input(&input)?;
        for upload in &uploads {
            upload.validate()?;
        }

        if self.landmarks.find_by_id(input.landmark_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Landmark with id {} not found",
                input.landmark_id
            )));
        }

        let review = self.reviews.create(&input).await?;
        tracing::info!(
            "Created review {} for landmark {} from device {}",
            review.id,
            review.landmark_id,
            review.device_id
        );

        let mut photos = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let photo = self
                .photos
                .ingest(PhotoParent::Review, review.id, upload)
                .await
                .inspect_err(|e| {
                    tracing::warn!("Review {} kept without all photos: {}", review.id, e);
                })?;
            photos.push(photo);
        }

        Ok(ReviewWithPhotos { review, photos })
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Review>> {
        self.reviews.search(keyword).await
    }

    pub async fn filter(&self, filter: ReviewFilter) -> Result<Vec<Review>> {
        ensure_range("rating", filter.min_rating, filter.max_rating)?;
        self.reviews.filter(&filter).await
    }

    pub async fn by_device(&self, device_id: &str) -> Result<Vec<Review>> {
        self.reviews.list_by_device(device_id).await
    }
}

fn validate_input(input: &ReviewInput) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&input.rating) {
        return Err(AppError::Validation(format!(
            "rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }
    if input.device_id.trim().is_empty() {
        return Err(AppError::Validation("device_id cannot be empty".to_string()));
    }
    if !DEVICE_ID_REGEX.is_match(&input.device_id) {
        return Err(AppError::Validation(format!(
            "device_id '{}' contains invalid characters",
            input.device_id
        )));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{MemoryPhotoStorage, MemoryStore};

    struct Fixture {
        store: Arc<MemoryStore>,
        storage: Arc<MemoryPhotoStorage>,
        service: ReviewService,
        landmark_id: i64,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let region = store.add_region(None, "Bali");
        let city = store.add_city(region.id, "Tabanan", 460_000);
        let landmark = store.add_landmark(city.id, "Tanah Lot", "temple");
        let storage = MemoryPhotoStorage::new();
        let photos = Arc::new(PhotoService::new(store.clone(), storage.clone()));
        let service = ReviewService::new(store.clone(), store.clone(), photos);
        Fixture {
            store,
            storage,
            service,
            landmark_id: landmark.id,
        }
    }

    fn input(landmark_id: i64) -> ReviewInput {
        ReviewInput {
            device_id: "device-42".to_string(),
            name: "Ayu".to_string(),
            comment: "Great sunset".to_string(),
            rating: 5,
            landmark_id,
        }
    }

    fn png(name: &str) -> PhotoUpload {
        PhotoUpload {
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4E, 0x47],
        }
    }

    #[tokio::test]
    async fn test_create_with_photos_returns_review_and_photos() {
        let f = fixture();

        let created = f
            .service
            .create_with_photos(input(f.landmark_id), vec![png("a.png"), png("b.png")])
            .await
            .unwrap();

        assert_eq!(created.review.landmark_id, f.landmark_id);
        assert_eq!(created.photos.len(), 2);
        assert!(created.photos.iter().all(|p| p.parent_id == created.review.id));
        assert_eq!(
            f.storage.keys(),
            [
                "reviews/device-42/device-42_1.png",
                "reviews/device-42/device-42_2.png"
            ]
        );
    }

    #[tokio::test]
    async fn test_create_without_photos() {
        let f = fixture();

        let created = f
            .service
            .create_with_photos(input(f.landmark_id), Vec::new())
            .await
            .unwrap();

        assert!(created.photos.is_empty());
        assert_eq!(f.store.review_count(), 1);
    }

    #[tokio::test]
    async fn test_photo_failure_keeps_review() {
        let f = fixture();
        f.store.fail_photo_inserts(true);

        let result = f
            .service
            .create_with_photos(input(f.landmark_id), vec![png("a.png")])
            .await;

        assert!(matches!(result, Err(AppError::Database(_))));
        assert_eq!(f.store.review_count(), 1);
        assert!(f.storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_review_is_rejected_before_insert() {
        let f = fixture();

        for bad in [
            ReviewInput {
                rating: 0,
                ..input(f.landmark_id)
            },
            ReviewInput {
                rating: 6,
                ..input(f.landmark_id)
            },
            ReviewInput {
                device_id: "  ".to_string(),
                ..input(f.landmark_id)
            },
            ReviewInput {
                device_id: "bad id".to_string(),
                ..input(f.landmark_id)
            },
            ReviewInput {
                name: String::new(),
                ..input(f.landmark_id)
            },
        ] {
            let result = f.service.create_with_photos(bad, Vec::new()).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        let missing = f.service.create_with_photos(input(999), Vec::new()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
        assert_eq!(f.store.review_count(), 0);
    }

    #[tokio::test]
    async fn test_bad_upload_is_rejected_before_insert() {
        let f = fixture();
        let pdf = PhotoUpload {
            file_name: "menu.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: b"%PDF-1.7".to_vec(),
        };
        let empty = PhotoUpload {
            data: Vec::new(),
            ..png("empty.png")
        };

        for uploads in [vec![png("ok.png"), pdf], vec![empty]] {
            let result = f
                .service
                .create_with_photos(input(f.landmark_id), uploads)
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }

        assert_eq!(f.store.review_count(), 0);
        assert!(f.storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_search_filter_and_by_device() {
        let f = fixture();
        f.store.add_review(f.landmark_id, "device-a", 2);
        f.store.add_review(f.landmark_id, "device-b", 4);
        f.service
            .create_with_photos(input(f.landmark_id), Vec::new())
            .await
            .unwrap();

        let sunset = f.service.search("SUNSET").await.unwrap();
        assert_eq!(sunset.len(), 1);
        assert_eq!(sunset[0].device_id, "device-42");

        // rating text is searchable too
        assert_eq!(f.service.search("4").await.unwrap().len(), 1);

        let high = f
            .service
            .filter(ReviewFilter {
                min_rating: Some(4),
                max_rating: None,
            })
            .await
            .unwrap();
        assert_eq!(high.len(), 2);

        let inverted = f
            .service
            .filter(ReviewFilter {
                min_rating: Some(5),
                max_rating: Some(1),
            })
            .await;
        assert!(matches!(inverted, Err(AppError::Validation(_))));

        assert_eq!(f.service.by_device("device-a").await.unwrap().len(), 1);
        assert!(f.service.by_device("nobody").await.unwrap().is_empty());
    }
}
