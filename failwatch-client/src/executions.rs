//! Execution-related API endpoints

use failwatch_core::domain::query::ExecutionQuery;
use failwatch_core::domain::report::Report;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::{debug, info};

use crate::error::Result;
use crate::parse::parse_executions;
use crate::{AUTH_TOKEN_HEADER, RundeckClient};

/// `statusFilter` value selecting failed executions
const FAILED_STATUS: &str = "failed";

impl RundeckClient {
    // =============================================================================
    // Execution Queries
    // =============================================================================

    /// Fetch the failed executions matching a query
    ///
    /// Issues exactly one `GET /api/<version>/executions` request. The token
    /// only travels in the auth header; project and group are URL-encoded.
    ///
    /// # Arguments
    /// * `query` - Project, optional group path and recency window
    ///
    /// # Returns
    /// A report holding the query and the executions in server order
    pub async fn failed_executions(&self, query: &ExecutionQuery) -> Result<Report> {
        let url = format!("{}/api/{}/executions", self.base_url, self.api_version);

        info!(
            project = query.project(),
            group = query.group().unwrap_or_default(),
            recent_filter = query.recent_filter(),
            "Querying failed executions"
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("project", query.project()),
                ("groupPath", query.group().unwrap_or_default()),
                ("statusFilter", FAILED_STATUS),
                ("recentFilter", query.recent_filter()),
            ])
            .header(AUTH_TOKEN_HEADER, self.token.header_value()?)
            .header(ACCEPT, HeaderValue::from_static("application/xml"))
            .send()
            .await?;

        let body = self.read_body(response).await?;
        let executions = parse_executions(&body)?;

        info!("Found {} failed execution(s)", executions.len());
        for execution in &executions {
            debug!(
                id = execution.id.as_deref().unwrap_or_default(),
                href = %execution.href,
                "Failed execution"
            );
        }

        Ok(Report::new(query.clone(), executions))
    }
}
