pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod navbar;
pub mod pagination;
pub mod render;
pub mod session;
pub mod view;

pub use client::{IdeasClient, IdeasSource};
pub use error::ListingError;
pub use pagination::{PageMarker, build_pagination_control};
