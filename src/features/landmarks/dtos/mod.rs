mod landmark_dto;

pub use landmark_dto::{
    AverageRatingDto, LandmarkDetailsDto, LandmarkDetailsQuery, LandmarkFilterQuery,
    LandmarkResponseDto, LandmarkSearchQuery, PhotoLinksDto, ReviewCountDto,
};
