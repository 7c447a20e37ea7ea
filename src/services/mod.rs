pub mod analytics;
pub mod combined;
pub mod listing;
pub mod seed;
