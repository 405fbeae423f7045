//! Error types for the audit events client.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while fetching audit events.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request error not classified as a timeout or connect failure.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success API response that has no dedicated variant.
    #[error("API error ({status}) at {url}: {message}")]
    ApiError {
        status: u16,
        url: String,
        message: String,
    },

    /// The API rejected the credentials (HTTP 401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The response body could not be interpreted as an events page.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Rate limited - too many requests.
    #[error("Rate limited: retry after {0:?}")]
    RateLimited(Option<Duration>),

    /// Request timed out.
    #[error("Request to {0} timed out")]
    Timeout(String),

    /// Connection refused.
    #[error("Connection refused to {0}")]
    ConnectionRefused(String),

    /// Maximum retries exceeded. Carries the attempt count and the last failure.
    #[error("Maximum retries exceeded ({0} attempts): {1}")]
    MaxRetriesExceeded(usize, #[source] Box<ClientError>),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A required client setting was not provided to the builder.
    #[error("{0} is required")]
    MissingSetting(&'static str),

    /// The event sink refused an event.
    #[error("Sink error: {0}")]
    Sink(String),
}

impl ClientError {
    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::ConnectionRefused(_) | Self::RateLimited(_) => true,
            Self::HttpError(e) => e.is_timeout() || e.is_connect(),
            Self::ApiError { status, .. } => Self::is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if an HTTP status code is retryable.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// Everything else fails immediately, including 500 which
    /// typically indicates a bug rather than a transient condition.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// The innermost error, looking through `MaxRetriesExceeded`.
    pub fn root(&self) -> &ClientError {
        match self {
            Self::MaxRetriesExceeded(_, last) => last.root(),
            other => other,
        }
    }

    /// Classify a transport error, keeping timeouts and refused connections distinct.
    pub(crate) fn from_transport(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout(url.to_string())
        } else if err.is_connect() {
            Self::ConnectionRefused(url.to_string())
        } else {
            Self::HttpError(err)
        }
    }
}
