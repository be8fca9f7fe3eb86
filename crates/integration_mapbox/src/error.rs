//! Mapbox client error types

use domain::InvalidCoordinates;
use thiserror::Error;

/// Errors that can occur when talking to the Mapbox APIs
#[derive(Debug, Error)]
pub enum MapboxError {
    /// No access token was supplied
    #[error("Mapbox access token is missing")]
    MissingToken,

    /// The access token was rejected (HTTP 401)
    #[error("Mapbox API error unauthorized")]
    Unauthorized,

    /// Rate limit exceeded (HTTP 429)
    #[error("Mapbox API rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Connection to the API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// The API answered with an unexpected HTTP status
    #[error("Request failed: {detail}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// `HTTP <status>` plus the provider message, if any
        detail: String,
    },

    /// Failed to decode the response body
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The request could not be built from the given input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl MapboxError {
    /// Returns true if this error is transient and the call may be repeated
    ///
    /// Of the unexpected statuses only server errors and 408 qualify.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded { .. } => {
                true
            },
            Self::RequestFailed { status, .. } => *status >= 500 || *status == 408,
            _ => false,
        }
    }

    /// Build a [`MapboxError::RequestFailed`] from a status and optional provider message
    #[must_use]
    pub fn request_failed(status: u16, message: Option<&str>) -> Self {
        let detail = match message {
            Some(message) => format!("HTTP {status}: {message}"),
            None => format!("HTTP {status}"),
        };
        Self::RequestFailed { status, detail }
    }
}

impl From<InvalidCoordinates> for MapboxError {
    fn from(err: InvalidCoordinates) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
