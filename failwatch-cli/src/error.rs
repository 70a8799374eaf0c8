//! Error taxonomy of a failwatch run
//!
//! Every variant is fatal for the run. Components return these as values;
//! only `main` turns them into a diagnostic and an exit status.

use failwatch_client::ClientError;
use failwatch_core::domain::query::QueryError;
use failwatch_mailer::MailError;
use thiserror::Error;

/// Result type alias for a run
pub type Result<T> = std::result::Result<T, FailwatchError>;

#[derive(Debug, Error)]
pub enum FailwatchError {
    /// A required input is missing or invalid
    #[error("{0}")]
    Precondition(#[from] QueryError),

    /// The configuration file could not be read, decoded or validated
    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),

    /// The Rundeck request could not be sent or did not succeed
    #[error("request to Rundeck failed: {0}")]
    Transport(ClientError),

    /// The Rundeck response is not a valid executions document
    #[error("could not decode Rundeck response: {0}")]
    Decode(ClientError),

    /// The mail provider failed or refused the message
    #[error("sending the digest failed: {0}")]
    Dispatch(#[from] MailError),
}

impl From<ClientError> for FailwatchError {
    fn from(err: ClientError) -> Self {
        if err.is_parse_error() {
            FailwatchError::Decode(err)
        } else {
            FailwatchError::Transport(err)
        }
    }
}

impl FailwatchError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            FailwatchError::Precondition(_) => 2,
            FailwatchError::Config(_) => 3,
            FailwatchError::Transport(_) => 4,
            FailwatchError::Decode(_) => 5,
            FailwatchError::Dispatch(_) => 6,
        }
    }

    /// Operator hint for common mistakes
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FailwatchError::Transport(err) if err.is_auth_error() => {
                Some("check RundeckAuthToken in the configuration file")
            }
            FailwatchError::Dispatch(MailError::Rejected { name, .. }) if name == "Invalid_Key" => {
                Some("check MandrillKey in the configuration file")
            }
            _ => None,
        }
    }
}
