//! Error types for the admin client.
//!
//! Each concern has its own error enum; [`Error`] aggregates them for callers such as the
//! binary entry point that only need to propagate failures with `?`.

pub mod api;
pub mod config;
pub mod editor;

use thiserror::Error;

use crate::client::{
    error::{api::ApiError, config::ConfigError, editor::EditorError},
    schema::ValidationError,
};

/// Main error type for the admin client.
///
/// Resource operations and the cache surface [`ApiError`] directly; this type exists so that
/// startup code can mix configuration, HTTP client construction and API calls in one function.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Normalized error from a resource operation.
    #[error(transparent)]
    ApiError(#[from] ApiError),
    /// Pricing editor error (invalid path, inapplicable field, failed submission).
    #[error(transparent)]
    EditorError(#[from] EditorError),
    /// Client-side validation failure of a payload.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// HTTP client construction error.
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
}
