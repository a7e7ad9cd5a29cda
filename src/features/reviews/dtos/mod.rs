mod review_dto;

pub use review_dto::{
    CreateReviewForm, ReviewFilterQuery, ReviewResponseDto, ReviewSearchQuery,
    ReviewWithPhotosDto,
};
