//! Outbound mail message types

use serde::{Deserialize, Serialize};

/// Who the digest is sent from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub email: String,
    pub name: String,
}

/// One recipient of the digest
///
/// `send_type` ("to", "cc", "bcc") is passed to the mail provider untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
    pub send_type: String,
}

/// The single message sent at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub sender: Sender,
    /// Recipients in configured order
    pub recipients: Vec<Recipient>,
    pub subject: String,
    /// Plain-text body
    pub text: String,
}

impl OutboundMessage {
    pub fn new(
        sender: Sender,
        recipients: Vec<Recipient>,
        subject: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            sender,
            recipients,
            subject: subject.into(),
            text: text.into(),
        }
    }
}
