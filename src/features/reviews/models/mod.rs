mod review;

pub use review::{Review, ReviewFilter, ReviewInput};
