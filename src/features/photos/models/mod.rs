mod photo;

pub use photo::{NewPhoto, Photo, PhotoParent};
