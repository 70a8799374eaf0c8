//! Error types for the Mandrill client

use thiserror::Error;

/// Result type alias for mail operations
pub type Result<T> = std::result::Result<T, MailError>;

/// Errors that can occur when sending through Mandrill
#[derive(Debug, Error)]
pub enum MailError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Mandrill answered with its error object
    #[error("Mandrill rejected the call ({name}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Mandrill error name (e.g. "Invalid_Key")
        name: String,
        /// Human-readable message
        message: String,
    },

    /// Non-success status without a Mandrill error object
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The message cannot be sent as built
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}
