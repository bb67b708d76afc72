pub mod app;
pub mod columns;
pub mod events;
pub mod lazy_image;
pub mod plain;
pub(crate) mod render;
