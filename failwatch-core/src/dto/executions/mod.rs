//! Rundeck executions DTOs
//!
//! Mirrors the XML returned by `GET /api/<version>/executions`. Attribute
//! fields are renamed with an `@` prefix and element text with `$text`, the
//! convention `quick-xml`'s serde support uses. Every field is optional on
//! the wire so that a sparse document still decodes.
//!
//! Two document shapes exist:
//!
//! ```xml
//! <!-- API >= 11 -->
//! <executions count="1"><execution .../></executions>
//!
//! <!-- API < 11 -->
//! <result success="true"><executions count="1"><execution .../></executions></result>
//! ```

use serde::Deserialize;

use crate::domain::execution::{Execution, Job, Node};

/// Root of an executions response, either `<executions>` or `<result>`
#[derive(Debug, Default, Deserialize)]
pub struct ExecutionsDocument {
    /// `error="true"` on a legacy `<result>` envelope
    #[serde(rename = "@error", default)]
    pub error: Option<String>,

    /// Error details on a legacy `<result>` envelope
    #[serde(rename = "error", default)]
    pub error_detail: Option<ErrorDetail>,

    /// Executions directly under an `<executions>` root
    #[serde(rename = "execution", default)]
    pub executions: Vec<ExecutionXml>,

    /// `<executions>` nested inside a legacy `<result>` envelope
    #[serde(rename = "executions", default)]
    pub envelope: Option<ExecutionList>,
}

impl ExecutionsDocument {
    /// Error message reported by a legacy envelope, if the server flagged one
    pub fn error_message(&self) -> Option<String> {
        let flagged = self
            .error
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true"));

        if !flagged {
            return None;
        }

        Some(
            self.error_detail
                .as_ref()
                .map(|detail| detail.message.trim().to_string())
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "server reported an error".to_string()),
        )
    }

    /// Convert into domain executions, preserving document order
    pub fn into_executions(self) -> Vec<Execution> {
        let executions = match self.envelope {
            Some(list) => list.executions,
            None => self.executions,
        };

        executions.into_iter().map(Execution::from).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: String,
}

/// An `<executions>` element
#[derive(Debug, Default, Deserialize)]
pub struct ExecutionList {
    #[serde(rename = "execution", default)]
    pub executions: Vec<ExecutionXml>,
}

/// An `<execution>` element
#[derive(Debug, Default, Deserialize)]
pub struct ExecutionXml {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,

    #[serde(rename = "@href", default)]
    pub href: String,

    #[serde(default)]
    pub user: String,

    #[serde(rename = "date-started", default)]
    pub date_started: Option<DateXml>,

    #[serde(rename = "date-ended", default)]
    pub date_ended: Option<DateXml>,

    #[serde(rename = "job", default)]
    pub jobs: Vec<JobXml>,

    #[serde(rename = "failedNodes", default)]
    pub failed_nodes: Option<NodeListXml>,
}

/// A date element: `<date-started unixtime="...">2015-06-01T10:00:00Z</date-started>`
#[derive(Debug, Default, Deserialize)]
pub struct DateXml {
    #[serde(rename = "$text", default)]
    pub value: String,
}

/// A `<job>` element
#[derive(Debug, Default, Deserialize)]
pub struct JobXml {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub description: String,
}

/// A `<failedNodes>` element
#[derive(Debug, Default, Deserialize)]
pub struct NodeListXml {
    #[serde(rename = "node", default)]
    pub nodes: Vec<NodeXml>,
}

/// A `<node name="..."/>` element
#[derive(Debug, Default, Deserialize)]
pub struct NodeXml {
    #[serde(rename = "@name", default)]
    pub name: String,
}

impl From<ExecutionXml> for Execution {
    fn from(xml: ExecutionXml) -> Self {
        Execution {
            id: xml.id,
            href: xml.href,
            user: xml.user,
            started: xml.date_started.map(|date| date.value).unwrap_or_default(),
            ended: xml.date_ended.map(|date| date.value).unwrap_or_default(),
            jobs: xml.jobs.into_iter().map(Job::from).collect(),
            failed_nodes: xml
                .failed_nodes
                .map(|list| list.nodes.into_iter().map(Node::from).collect())
                .unwrap_or_default(),
        }
    }
}

impl From<JobXml> for Job {
    fn from(xml: JobXml) -> Self {
        Job {
            name: xml.name,
            group: xml.group,
            project: xml.project,
            description: xml.description,
        }
    }
}

impl From<NodeXml> for Node {
    fn from(xml: NodeXml) -> Self {
        Node::new(xml.name)
    }
}
