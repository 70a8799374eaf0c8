//! Mandrill HTTP Client
//!
//! Sends the failure digest through Mandrill's `messages/send` API. One call
//! carries every recipient; there is no per-recipient fan-out and no retry.
//!
//! # Example
//!
//! ```no_run
//! use failwatch_core::domain::message::{OutboundMessage, Recipient, Sender};
//! use failwatch_mailer::MandrillClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = MandrillClient::new("mandrill-key");
//!
//!     let message = OutboundMessage::new(
//!         Sender { email: "rundeck@example.com".into(), name: "Rundeck".into() },
//!         vec![Recipient { email: "ops@example.com".into(), name: "Ops".into(), send_type: "to".into() }],
//!         "[RunDeck] [web] 1 failures!",
//!         "1 Failed Executions from project [web].",
//!     );
//!
//!     let results = client.send(&message).await?;
//!     println!("sent to {} recipient(s)", results.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod messages;

pub use error::{MailError, Result};
pub use failwatch_core::dto::mandrill::SendResult;

use reqwest::Client;

/// Public Mandrill API endpoint
pub const DEFAULT_API_URL: &str = "https://mandrillapp.com/api/1.0";

/// HTTP client for the Mandrill API
#[derive(Clone)]
pub struct MandrillClient {
    /// Base URL of the API (e.g., "https://mandrillapp.com/api/1.0")
    base_url: String,
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl MandrillClient {
    /// Create a client for the public Mandrill endpoint
    ///
    /// # Example
    /// ```
    /// use failwatch_mailer::MandrillClient;
    ///
    /// let client = MandrillClient::new("mandrill-key");
    /// assert_eq!(client.base_url(), "https://mandrillapp.com/api/1.0");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(DEFAULT_API_URL, api_key, Client::new())
    }

    /// Create a client for a custom endpoint with a configured HTTP client
    ///
    /// # Arguments
    /// * `base_url` - API base URL, without the `/messages/send.json` suffix
    /// * `api_key` - Mandrill API key
    /// * `client` - A configured reqwest Client (timeouts, proxies, TLS...)
    pub fn with_endpoint(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for MandrillClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MandrillClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}
