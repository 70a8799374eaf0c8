//! Failed-executions query parameters

use thiserror::Error;

/// Recency window used when none is given
pub const DEFAULT_RECENT_FILTER: &str = "1h";

/// Units Rundeck accepts in a recency window (`s`econd, mi`n`ute, `h`our,
/// `d`ay, `w`eek, `m`onth, `y`ear)
const RECENT_FILTER_UNITS: &[char] = &['s', 'n', 'h', 'd', 'w', 'm', 'y'];

/// Errors raised while building a query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The project name was empty
    #[error("Missing required [project] param!")]
    MissingProject,

    /// The recency window is not of the form `<number><unit>`
    #[error("invalid recent filter [{0}]: expected <number><unit> with unit one of s, n, h, d, w, m, y")]
    InvalidRecentFilter(String),
}

/// Parameters of one failed-executions query
///
/// A value of this type always has a non-empty project, so anything that
/// receives one can issue the request without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionQuery {
    project: String,
    group: Option<String>,
    recent_filter: String,
}

impl ExecutionQuery {
    /// Build a query
    ///
    /// # Arguments
    /// * `project` - Project name, required
    /// * `group` - Group path filter; empty means no filter
    /// * `recent_filter` - Recency window such as `1h`; blank means [`DEFAULT_RECENT_FILTER`]
    pub fn new(
        project: impl Into<String>,
        group: impl Into<String>,
        recent_filter: impl Into<String>,
    ) -> Result<Self, QueryError> {
        let project = project.into();
        if project.trim().is_empty() {
            return Err(QueryError::MissingProject);
        }

        let group = group.into();
        let group = if group.is_empty() {
            None
        } else {
            Some(group)
        };

        let recent_filter = recent_filter.into();
        let recent_filter = if recent_filter.trim().is_empty() {
            DEFAULT_RECENT_FILTER.to_string()
        } else {
            validate_recent_filter(recent_filter.trim())?;
            recent_filter.trim().to_string()
        };

        Ok(Self {
            project,
            group,
            recent_filter,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    /// Group path filter, if one was applied
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn recent_filter(&self) -> &str {
        &self.recent_filter
    }
}

fn validate_recent_filter(value: &str) -> Result<(), QueryError> {
    let invalid = || QueryError::InvalidRecentFilter(value.to_string());

    let unit = value.chars().last().ok_or_else(invalid)?;
    let amount = &value[..value.len() - unit.len_utf8()];

    if !RECENT_FILTER_UNITS.contains(&unit)
        || amount.is_empty()
        || !amount.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    Ok(())
}
