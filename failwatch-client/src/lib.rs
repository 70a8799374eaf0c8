//! Rundeck HTTP Client
//!
//! A small, type-safe client for the part of the Rundeck API failwatch needs:
//! listing the failed executions of a project within a recency window.
//!
//! # Example
//!
//! ```no_run
//! use failwatch_client::RundeckClient;
//! use failwatch_core::domain::query::ExecutionQuery;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RundeckClient::new("https://rundeck.example.com", "12", "token");
//!
//!     let query = ExecutionQuery::new("web", "", "1h")?;
//!     let report = client.failed_executions(&query).await?;
//!
//!     println!("{} failed executions", report.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod executions;
pub mod parse;

pub use error::{ClientError, Result};

use reqwest::Client;
use reqwest::header::HeaderValue;

/// Header carrying the API token
pub const AUTH_TOKEN_HEADER: &str = "X-Rundeck-Auth-Token";

/// API token that never shows up in `Debug` output
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Header value for [`AUTH_TOKEN_HEADER`], flagged as sensitive
    fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&self.0).map_err(|_| {
            ClientError::InvalidRequest(
                "auth token contains characters not allowed in a header".to_string(),
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// HTTP client for the Rundeck executions API
#[derive(Debug, Clone)]
pub struct RundeckClient {
    /// Base URL of the server (e.g., "https://rundeck.example.com")
    base_url: String,
    /// API version segment of the path (e.g., "12")
    api_version: String,
    token: AuthToken,
    /// HTTP client instance
    client: Client,
}

impl RundeckClient {
    /// Create a new Rundeck client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the Rundeck server
    /// * `api_version` - API version used in request paths
    /// * `token` - API token sent in the [`AUTH_TOKEN_HEADER`] header
    ///
    /// # Example
    /// ```
    /// use failwatch_client::RundeckClient;
    ///
    /// let client = RundeckClient::new("https://rundeck.example.com", "12", "token");
    /// ```
    pub fn new(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::with_client(base_url, api_version, token, Client::new())
    }

    /// Create a new Rundeck client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use failwatch_client::RundeckClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = RundeckClient::with_client("https://rundeck.example.com", "12", "token", http_client);
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        api_version: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        let api_version = api_version.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: api_version.trim_matches('/').to_string(),
            token: AuthToken::new(token),
            client,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Read the body of a response, failing on a non-success status
    async fn read_body(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = RundeckClient::new("http://localhost:4440", "12", "token");
        assert_eq!(client.base_url(), "http://localhost:4440");
        assert_eq!(client.api_version(), "12");
    }

    #[test]
    fn test_client_trims_slashes() {
        let client = RundeckClient::new("http://localhost:4440/", "/12/", "token");
        assert_eq!(client.base_url(), "http://localhost:4440");
        assert_eq!(client.api_version(), "12");
    }

    #[test]
    fn test_debug_output_hides_token() {
        let client = RundeckClient::new("http://localhost:4440", "12", "s3cr3t-token");
        let debug = format!("{client:?}");

        assert!(!debug.contains("s3cr3t-token"));
        assert!(debug.contains("AuthToken(***)"));
    }

    #[test]
    fn test_token_header_is_sensitive() {
        let value = AuthToken::new("abc").header_value().unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "abc");
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let error = AuthToken::new("abc\ndef").header_value().unwrap_err();
        assert!(matches!(error, ClientError::InvalidRequest(_)));
    }
}
