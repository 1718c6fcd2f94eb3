use thiserror::Error;

use crate::{client::schema::ValidationError, model::api::ErrorDto};

/// Classification of an [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Network,
    Validation,
    NotFound,
    Conflict,
    Unauthorized,
    Server,
    Cancelled,
}

/// Uniform error shape for every resource operation.
///
/// Each variant carries the message shown to the user: the server-provided message when the
/// response had one, otherwise a per-operation fallback such as "Failed to fetch games".
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure (timeout, DNS, connection refused)
    #[error("{0}")]
    Network(String),
    /// 4xx rejection of the payload, or a client-side check that failed before sending
    #[error("{0}")]
    Validation(String),
    /// 404 for a single resource
    #[error("{0}")]
    NotFound(String),
    /// 409, e.g. deleting a record that is still referenced
    #[error("{0}")]
    Conflict(String),
    /// 401/403; redirecting to login is up to the session owner
    #[error("{0}")]
    Unauthorized(String),
    /// 5xx or a response body that could not be decoded
    #[error("{0}")]
    Server(String),
    /// The request was aborted before it completed
    #[error("Request was cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Network(_) => ApiErrorKind::Network,
            Self::Validation(_) => ApiErrorKind::Validation,
            Self::NotFound(_) => ApiErrorKind::NotFound,
            Self::Conflict(_) => ApiErrorKind::Conflict,
            Self::Unauthorized(_) => ApiErrorKind::Unauthorized,
            Self::Server(_) => ApiErrorKind::Server,
            Self::Cancelled => ApiErrorKind::Cancelled,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Network(message)
            | Self::Validation(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Unauthorized(message)
            | Self::Server(message) => message,
            Self::Cancelled => "Request was cancelled",
        }
    }

    /// Normalize a non-success HTTP response.
    ///
    /// # Arguments
    /// - `status` - HTTP status code of the response
    /// - `body` - Raw response body, parsed as [`ErrorDto`] when possible
    /// - `fallback` - Message used when the server did not provide one
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ErrorDto>(body)
            .ok()
            .and_then(|dto| dto.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());

        match status {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            400..=499 => Self::Validation(message),
            _ => Self::Server(message),
        }
    }

    /// Normalize a failure that happened before a usable response was received
    pub fn from_transport(err: &reqwest::Error, fallback: &str) -> Self {
        if err.is_decode() {
            return Self::Server(format!("{}: unexpected response from server", fallback));
        }

        Self::Network(format!("{}: failed to reach server", fallback))
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
