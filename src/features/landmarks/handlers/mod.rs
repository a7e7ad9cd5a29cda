mod landmark_handler;

pub use landmark_handler::*;
