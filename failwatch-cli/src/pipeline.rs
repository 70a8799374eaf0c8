//! Report pipeline
//!
//! Query Rundeck, stop early when nothing failed, otherwise render the
//! digest and hand it to the mail provider. Both external systems sit
//! behind traits so the whole flow can be exercised without a network.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use failwatch_client::{ClientError, RundeckClient};
use failwatch_core::digest::{render_digest, subject_line};
use failwatch_core::domain::message::{OutboundMessage, Recipient, Sender};
use failwatch_core::domain::query::ExecutionQuery;
use failwatch_core::domain::report::Report;
use failwatch_mailer::{MailError, MandrillClient, SendResult};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;

/// Source of failed executions
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    /// Fetch the failed executions matching a query
    async fn failed_executions(
        &self,
        query: &ExecutionQuery,
    ) -> std::result::Result<Report, ClientError>;
}

/// Delivery channel for the digest
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send one message to all of its recipients
    async fn send(
        &self,
        message: &OutboundMessage,
    ) -> std::result::Result<Vec<SendResult>, MailError>;
}

#[async_trait]
impl ExecutionSource for RundeckClient {
    async fn failed_executions(
        &self,
        query: &ExecutionQuery,
    ) -> std::result::Result<Report, ClientError> {
        RundeckClient::failed_executions(self, query).await
    }
}

#[async_trait]
impl Notifier for MandrillClient {
    async fn send(
        &self,
        message: &OutboundMessage,
    ) -> std::result::Result<Vec<SendResult>, MailError> {
        MandrillClient::send(self, message).await
    }
}

/// Who receives the digest and how its subject is branded
#[derive(Debug, Clone)]
pub struct DigestSettings {
    pub sender: Sender,
    pub recipients: Vec<Recipient>,
    pub system_name: String,
}

impl From<&Config> for DigestSettings {
    fn from(config: &Config) -> Self {
        Self {
            sender: config.sender(),
            recipients: config.recipients(),
            system_name: config.system_name.clone(),
        }
    }
}

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing failed in the window; no message was built
    NoFailures { recent_filter: String },

    /// The digest was handed to the mail provider
    Dispatched { failures: usize },

    /// The digest was built but only printed
    DryRun {
        failures: usize,
        subject: String,
        body: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::NoFailures { recent_filter } => {
                write!(f, "No failed jobs found in the period [{recent_filter}].")
            }
            Outcome::Dispatched { failures } => write!(f, "{failures} failed jobs found."),
            Outcome::DryRun {
                failures,
                subject,
                body,
            } => {
                writeln!(f, "Subject: {subject}")?;
                writeln!(f)?;
                write!(f, "{body}")?;
                write!(f, "{failures} failed jobs found (dry run, nothing sent).")
            }
        }
    }
}

/// Build the message for a non-empty report
pub fn build_message(settings: &DigestSettings, report: &Report) -> OutboundMessage {
    OutboundMessage::new(
        settings.sender.clone(),
        settings.recipients.clone(),
        subject_line(&settings.system_name, report),
        render_digest(report),
    )
}

/// One query-format-dispatch run
pub struct Pipeline {
    source: Arc<dyn ExecutionSource>,
    notifier: Arc<dyn Notifier>,
    settings: DigestSettings,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn ExecutionSource>,
        notifier: Arc<dyn Notifier>,
        settings: DigestSettings,
    ) -> Self {
        Self {
            source,
            notifier,
            settings,
        }
    }

    /// Run the pipeline once
    ///
    /// # Arguments
    /// * `query` - Project, group and recency window to report on
    /// * `dry_run` - Build the digest but do not send it
    pub async fn run(&self, query: &ExecutionQuery, dry_run: bool) -> Result<Outcome> {
        let report = self.source.failed_executions(query).await?;

        if report.is_empty() {
            info!(
                recent_filter = query.recent_filter(),
                "No failed executions in window, skipping dispatch"
            );
            return Ok(Outcome::NoFailures {
                recent_filter: query.recent_filter().to_string(),
            });
        }

        let failures = report.len();
        let message = build_message(&self.settings, &report);

        if dry_run {
            info!("Dry run, not sending the digest");
            return Ok(Outcome::DryRun {
                failures,
                subject: message.subject,
                body: message.text,
            });
        }

        let results = self.notifier.send(&message).await?;

        let rejected = results.iter().filter(|result| result.is_rejected()).count();
        if rejected > 0 {
            warn!(
                "{} of {} recipient(s) were rejected by the mail provider",
                rejected,
                results.len()
            );
        }
        info!(failures, recipients = results.len(), "Digest sent");

        Ok(Outcome::Dispatched { failures })
    }
}
