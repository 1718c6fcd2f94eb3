pub mod api;
pub mod cache;
pub mod config;
pub mod editor;
pub mod error;
pub mod schema;
pub mod store;
