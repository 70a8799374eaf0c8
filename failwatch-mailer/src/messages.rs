//! Message-related API endpoints

use failwatch_core::domain::message::OutboundMessage;
use failwatch_core::dto::mandrill::{MandrillErrorBody, SendMessageRequest, SendResult};
use tracing::{debug, info, warn};

use crate::MandrillClient;
use crate::error::{MailError, Result};

impl MandrillClient {
    // =============================================================================
    // Sending
    // =============================================================================

    /// Send a message to all of its recipients in one call
    ///
    /// # Arguments
    /// * `message` - The message to send
    ///
    /// # Returns
    /// Mandrill's per-recipient delivery status. Recipients Mandrill rejects
    /// are logged but do not make the call fail.
    pub async fn send(&self, message: &OutboundMessage) -> Result<Vec<SendResult>> {
        if message.recipients.is_empty() {
            return Err(MailError::InvalidMessage(
                "message has no recipients".to_string(),
            ));
        }

        let url = format!("{}/messages/send.json", self.base_url);
        info!(
            recipients = message.recipients.len(),
            subject = %message.subject,
            "Sending message through Mandrill"
        );

        let response = self
            .client
            .post(&url)
            .json(&SendMessageRequest::new(self.api_key.as_str(), message))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        let results: Vec<SendResult> = serde_json::from_str(&body).map_err(|e| {
            match serde_json::from_str::<MandrillErrorBody>(&body) {
                Ok(error) if error.status == "error" => MailError::Rejected {
                    status: status.as_u16(),
                    name: error.name,
                    message: error.message,
                },
                _ => MailError::ParseError(format!("unexpected send response: {e}")),
            }
        })?;

        for result in &results {
            if result.is_rejected() {
                warn!(
                    email = %result.email,
                    status = %result.status,
                    reason = result.reject_reason.as_deref().unwrap_or_default(),
                    "Mandrill did not accept recipient"
                );
            } else {
                debug!(email = %result.email, status = %result.status, "Recipient accepted");
            }
        }

        Ok(results)
    }
}

/// Build the error for a non-success response
fn error_from_body(status: u16, body: &str) -> MailError {
    match serde_json::from_str::<MandrillErrorBody>(body) {
        Ok(error) => MailError::Rejected {
            status,
            name: error.name,
            message: error.message,
        },
        Err(_) => MailError::ApiError {
            status,
            message: body.trim().to_string(),
        },
    }
}
