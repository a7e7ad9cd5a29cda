mod landmark_service;

pub use landmark_service::{LandmarkDetails, LandmarkService};
