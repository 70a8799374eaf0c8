//! Execution domain types

use serde::{Deserialize, Serialize};

/// A failed run of one or more jobs, as reported by Rundeck
///
/// Timestamps are kept as the opaque strings the server sent; they are only
/// ever displayed, never compared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Execution id, when the server provides one
    pub id: Option<String>,

    /// Link to the execution in the Rundeck UI
    pub href: String,

    /// User that triggered the execution
    pub user: String,

    pub started: String,
    pub ended: String,

    /// Job definitions associated with this execution, in document order
    pub jobs: Vec<Job>,

    /// Nodes that reported failure; may be empty even for a failed execution
    pub failed_nodes: Vec<Node>,
}

impl Execution {
    /// Names of the failed nodes, in document order
    pub fn failed_node_names(&self) -> impl Iterator<Item = &str> {
        self.failed_nodes.iter().map(|node| node.name.as_str())
    }
}

/// Identifying metadata of a job definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub group: String,
    pub project: String,
    pub description: String,
}

/// An execution target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
