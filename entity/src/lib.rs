pub mod enum_featured;
pub mod enum_status;

pub mod photo;

pub use enum_featured::Featured;
pub use enum_status::PropertyStatus;
pub use photo::{Photo, MIN_PHOTOS_TO_PUBLISH};
