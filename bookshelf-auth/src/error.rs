use bookshelf_api::{ApiError, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Network failure: {0}")]
    NetworkFailure(#[source] ApiError),

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication rejected ({status}): {detail}")]
    AuthRejected { status: StatusCode, detail: String },

    #[error("Profile fetch failed: {0}")]
    ProfileFetchFailed(#[source] ApiError),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    /// Classify a failed token or registration call.
    pub(crate) fn from_auth_call(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, detail } => AuthError::AuthRejected { status, detail },
            ApiError::Timeout => AuthError::Timeout,
            ApiError::Decode(e) => AuthError::InvalidResponse(e.to_string()),
            other => AuthError::NetworkFailure(other),
        }
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
