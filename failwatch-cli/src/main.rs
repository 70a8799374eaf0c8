//! Failwatch CLI
//!
//! Reports the recently failed executions of a Rundeck project by email.
//! Meant to be started by an external scheduler; every run is independent
//! and exits when the digest is sent (or when there is nothing to send).

mod args;
mod config;
mod error;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::*;
use failwatch_client::RundeckClient;
use failwatch_core::domain::query::{DEFAULT_RECENT_FILTER, ExecutionQuery};
use failwatch_mailer::MandrillClient;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::{FailwatchError, Result};
use crate::pipeline::{DigestSettings, Outcome, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "failwatch")]
#[command(about = "Email a digest of recently failed Rundeck executions", long_about = None)]
struct Cli {
    /// The project name
    #[arg(long)]
    project: String,

    /// A group or partial group path to include all jobs within that group path
    #[arg(long, default_value = "")]
    group: String,

    /// Only report executions that completed within this period (e.g. 1h, 2d, 1w)
    #[arg(long = "recentfilter", default_value = DEFAULT_RECENT_FILTER)]
    recent_filter: String,

    /// Configuration file [default: conf.json next to the executable]
    #[arg(long, env = "FAILWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Print the digest instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout only carries the run summary
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "failwatch=info,failwatch_client=info,failwatch_mailer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_from(args::normalize_legacy_flags(std::env::args_os()));

    match run(cli).await {
        Ok(outcome) => {
            match &outcome {
                Outcome::NoFailures { .. } => println!("{}", outcome.to_string().yellow()),
                _ => println!("{outcome}"),
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(exit_code = e.exit_code(), error = ?e, "Run failed");
            eprintln!("{} {}", "error:".red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", "hint:".cyan(), hint);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Validate inputs, load the configuration and run the pipeline once
async fn run(cli: Cli) -> Result<Outcome> {
    let query = ExecutionQuery::new(cli.project, cli.group, cli.recent_filter)?;

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path().map_err(FailwatchError::Config)?,
    };
    info!("Loading configuration from {}", config_path.display());
    let config = Config::load(&config_path).map_err(FailwatchError::Config)?;

    let http = http_client(config.request_timeout())?;

    let source = RundeckClient::with_client(
        &config.rundeck_server_url,
        &config.rundeck_api_version,
        &config.rundeck_auth_token,
        http.clone(),
    );
    let notifier =
        MandrillClient::with_endpoint(&config.mandrill_api_url, &config.mandrill_key, http);

    info!(
        "Rundeck at {} (API {}), {} recipient(s)",
        source.base_url(),
        source.api_version(),
        config.mandrill_recipients.len()
    );

    let pipeline = Pipeline::new(
        Arc::new(source),
        Arc::new(notifier),
        DigestSettings::from(&config),
    );

    pipeline.run(&query, cli.dry_run).await
}

/// HTTP client shared by the Rundeck and Mandrill calls
fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("failwatch/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(failwatch_client::ClientError::from)?;

    Ok(client)
}
