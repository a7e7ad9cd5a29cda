mod photo_naming;
mod photo_service;

pub use photo_service::{PhotoService, PhotoUpload};
