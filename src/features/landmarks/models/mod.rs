mod landmark;

pub use landmark::{Landmark, LandmarkFilter};
