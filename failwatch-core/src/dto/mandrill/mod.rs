//! Mandrill DTOs
//!
//! Request and response bodies of `POST /messages/send.json`.

use serde::{Deserialize, Serialize};

use crate::domain::message::{OutboundMessage, Recipient};

/// Body of a `messages/send` call
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub key: String,
    pub message: MandrillMessage,
}

impl SendMessageRequest {
    pub fn new(key: impl Into<String>, message: &OutboundMessage) -> Self {
        Self {
            key: key.into(),
            message: MandrillMessage::from(message),
        }
    }
}

/// The message part of a `messages/send` call
#[derive(Debug, Clone, Serialize)]
pub struct MandrillMessage {
    pub from_email: String,
    pub from_name: String,
    pub to: Vec<MandrillRecipient>,
    pub subject: String,
    pub text: String,
}

impl From<&OutboundMessage> for MandrillMessage {
    fn from(message: &OutboundMessage) -> Self {
        MandrillMessage {
            from_email: message.sender.email.clone(),
            from_name: message.sender.name.clone(),
            to: message
                .recipients
                .iter()
                .map(MandrillRecipient::from)
                .collect(),
            subject: message.subject.clone(),
            text: message.text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MandrillRecipient {
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub send_type: String,
}

impl From<&Recipient> for MandrillRecipient {
    fn from(recipient: &Recipient) -> Self {
        MandrillRecipient {
            email: recipient.email.clone(),
            name: recipient.name.clone(),
            send_type: recipient.send_type.clone(),
        }
    }
}

/// Per-recipient result of a successful `messages/send` call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendResult {
    pub email: String,

    /// One of `sent`, `queued`, `scheduled`, `rejected` or `invalid`
    pub status: String,

    #[serde(default)]
    pub reject_reason: Option<String>,

    #[serde(rename = "_id", default)]
    pub id: Option<String>,
}

impl SendResult {
    /// `true` when Mandrill refused delivery to this recipient
    pub fn is_rejected(&self) -> bool {
        matches!(self.status.as_str(), "rejected" | "invalid")
    }
}

/// Error object Mandrill returns instead of a result list
#[derive(Debug, Clone, Deserialize)]
pub struct MandrillErrorBody {
    pub status: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}
