//! Report domain type

use crate::domain::execution::Execution;
use crate::domain::query::ExecutionQuery;

/// Failed executions found by one query, together with the query itself
///
/// Exists only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    query: ExecutionQuery,
    executions: Vec<Execution>,
}

impl Report {
    pub fn new(query: ExecutionQuery, executions: Vec<Execution>) -> Self {
        Self { query, executions }
    }

    pub fn query(&self) -> &ExecutionQuery {
        &self.query
    }

    /// Executions in the order the server returned them
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    /// Number of failed executions
    pub fn len(&self) -> usize {
        self.executions.len()
    }

    /// `true` when no execution failed in the window
    pub fn is_empty(&self) -> bool {
        self.executions.is_empty()
    }
}
