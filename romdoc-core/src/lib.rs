pub mod hex;
pub mod model;
pub mod slug;

pub use hex::{block_range, file_range, to_hex};
pub use slug::slugify;
