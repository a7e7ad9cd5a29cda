mod multipart;
mod photo_handler;

pub use multipart::{parse_field, read_text, read_upload};
pub use photo_handler::*;
