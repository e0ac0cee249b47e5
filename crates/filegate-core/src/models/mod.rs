//! Data models shared across crates

mod category;

pub use category::{FileCategory, UnknownCategoryError};
