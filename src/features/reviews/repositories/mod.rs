mod review_repository;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::reviews::models::{Review, ReviewFilter, ReviewInput};

pub use review_repository::PgReviewRepository;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, input: &ReviewInput) -> Result<Review>;
    async fn list_by_landmark(&self, landmark_id: i64) -> Result<Vec<Review>>;
    async fn count_by_landmark(&self, landmark_id: i64) -> Result<i64>;
    /// Mean rating of a landmark, 0 when it has no reviews
    async fn average_rating(&self, landmark_id: i64) -> Result<f64>;
    /// Case-insensitive keyword match over name, comment and rating text
    async fn search(&self, keyword: &str) -> Result<Vec<Review>>;
    async fn filter(&self, filter: &ReviewFilter) -> Result<Vec<Review>>;
    async fn list_by_device(&self, device_id: &str) -> Result<Vec<Review>>;
    /// Latest review a device left on a landmark
    async fn find_by_device_and_landmark(
        &self,
        device_id: &str,
        landmark_id: i64,
    ) -> Result<Option<Review>>;
}
