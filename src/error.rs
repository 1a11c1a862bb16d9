//! Error taxonomy for backend operations.
//!
//! Errors are `Clone` so they can sit in provider state and travel inside
//! network responses.

use thiserror::Error;

/// Failure of a backend or upload operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error("Connection failed: {0}")]
    Transport(String),

    /// Non-success HTTP status; `message` comes from the body when present
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("{0}")]
    Io(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// HTTP status, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else if e.is_timeout() {
            ApiError::Transport(format!("request timed out: {}", e))
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
