//! Error types and Result alias for the Flowva rewards client

use thiserror::Error;

/// Main error type for the Flowva rewards client
///
/// The first four variants are what views render. The remaining ones are
/// transport-level failures that action boundaries fold into
/// [`Error::BackendError`] or [`Error::LoadError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Please sign in to continue")]
    NotAuthenticated,

    #[error("{0}")]
    AlreadyClaimed(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Failed to load: {0}")]
    LoadError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Session token expired")]
    TokenExpired,

    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Raw message without the variant prefix, as shown in inline panels
    pub fn message(&self) -> String {
        match self {
            Error::AlreadyClaimed(msg)
            | Error::BackendError(msg)
            | Error::LoadError(msg)
            | Error::AuthenticationError(msg)
            | Error::ApiError(msg)
            | Error::NetworkError(msg)
            | Error::InvalidData(msg)
            | Error::Config(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
