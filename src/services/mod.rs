pub mod fetcher;
pub mod images;
