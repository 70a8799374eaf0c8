//! Error types for the Rundeck client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Longest slice of an error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

/// Errors that can occur when querying Rundeck
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The server answered successfully but flagged an error in the document
    #[error("Rundeck reported an error: {0}")]
    ServerError(String),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and response body
    ///
    /// Long bodies (typically HTML error pages) are cut short.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = match message.trim().char_indices().nth(MAX_ERROR_BODY) {
            Some((cut, _)) => format!("{}...", &message.trim()[..cut]),
            None => message.trim().to_string(),
        };

        Self::ApiError { status, message }
    }

    /// Check if the response body could not be decoded
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }

    /// Check if the server rejected the credentials (401/403)
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::ApiError { status: 401 | 403, .. })
    }
}
