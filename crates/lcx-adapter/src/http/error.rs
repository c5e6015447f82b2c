/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, validation, WebSocket)
[OUTPUT]: Structured error types with precondition/transport classification
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

use crate::auth::AUTH_REQUIRED_MESSAGE;

/// Main error type for the LCX adapter
#[derive(Error, Debug)]
pub enum LcxError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Credentials missing or rejected
    #[error("{message}")]
    Authentication { message: String },

    /// Caller-supplied payload is malformed
    #[error("{0}")]
    Validation(String),

    /// Signature could not be computed
    #[error("Signing error: {0}")]
    Signing(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// WebSocket transport error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Attempted to send on a connection that is not open
    #[error("WebSocket is not open. Cannot subscribe to {topic}.")]
    NotConnected { topic: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LcxError {
    /// Error raised when a private operation runs without a full credential pair
    pub fn missing_credentials() -> Self {
        LcxError::Authentication {
            message: AUTH_REQUIRED_MESSAGE.to_string(),
        }
    }

    /// Validation failure with the standard prefix
    pub fn validation(message: impl AsRef<str>) -> Self {
        LcxError::Validation(format!("Validation Error: {}", message.as_ref()))
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, LcxError::Authentication { .. })
    }

    /// Caller errors raised before any network I/O
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            LcxError::Authentication { .. }
                | LcxError::Validation(_)
                | LcxError::Signing(_)
                | LcxError::NotConnected { .. }
        )
    }

    /// Create an API error from status code and response body
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        LcxError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for LCX operations
pub type Result<T> = std::result::Result<T, LcxError>;
