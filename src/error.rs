//! Error types for the CricSphere CLI

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for CricSphere operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result of a fetch that may be shared between several waiters
pub type SharedResult<T> = std::result::Result<T, Arc<Error>>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure of a request whose outcome was shared by concurrent callers
    #[error(transparent)]
    Shared(#[from] Arc<Error>),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

impl Error {
    /// Whether this error (or the shared error it wraps) is an authentication rejection
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Api(ApiError::Unauthorized) => true,
            Error::Shared(inner) => inner.is_unauthorized(),
            _ => false,
        }
    }
}

/// API-related errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Session expired or not logged in. Run `cricsphere login` to sign in.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Local key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine a data directory for local storage")]
    NoHome,

    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Storage database error: {0}")]
    Database(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}
