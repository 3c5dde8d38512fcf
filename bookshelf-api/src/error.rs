use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("({status}) {detail}")]
    Status { status: StatusCode, detail: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    ///
    /// The backend reports failures as `{"detail": "..."}` (some account views
    /// use `{"message": "..."}`); anything else is kept as the raw body text.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(response) => response.detail,
            Err(_) if body.is_empty() => status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string(),
            Err(_) => body.to_string(),
        };
        ApiError::Status { status, detail }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub detail: String,
}
