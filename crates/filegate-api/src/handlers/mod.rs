pub mod ai;
pub mod combined;
pub mod files;
pub mod info;
