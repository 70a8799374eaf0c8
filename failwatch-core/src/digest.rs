//! Report formatting
//!
//! Turns a [`Report`] into the plain-text digest mailed to recipients and
//! builds the matching subject line. Everything here is a pure function of
//! its inputs.

use std::fmt::Write;

use crate::domain::report::Report;

/// System name used in subjects when none is configured
pub const DEFAULT_SYSTEM_NAME: &str = "RunDeck";

const INDENT: &str = "\t";
const NODE_SEPARATOR: &str = " / ";

/// Render the digest body for a non-empty report
///
/// Layout:
///
/// ```text
/// <count> Failed Executions from project [<project>] group [<group>].
///
/// Executions:
/// \t<job name>
/// \t\t<href>
/// \t\tStarted: <started> | User:<user>
/// \t\tNodes: <node> / <node>
///
/// ```
///
/// The group segment is only present when the query had a group filter.
pub fn render_digest(report: &Report) -> String {
    let query = report.query();
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = write!(
        out,
        "{} Failed Executions from project [{}]",
        report.len(),
        query.project()
    );
    if let Some(group) = query.group() {
        let _ = write!(out, " group [{group}]");
    }
    out.push_str(".\n\n");

    out.push_str("Executions:\n");

    for execution in report.executions() {
        for job in &execution.jobs {
            let _ = writeln!(out, "{INDENT}{}", job.name);
        }

        let _ = writeln!(out, "{INDENT}{INDENT}{}", execution.href);
        let _ = writeln!(
            out,
            "{INDENT}{INDENT}Started: {} | User:{}",
            execution.started, execution.user
        );
        let nodes = execution
            .failed_node_names()
            .collect::<Vec<_>>()
            .join(NODE_SEPARATOR);
        let _ = writeln!(out, "{INDENT}{INDENT}Nodes: {nodes}");

        out.push('\n');
    }

    out
}

/// Build the subject line for a report
///
/// `[<system>] [<project>] [<group>] <count> failures!`, without the group
/// segment when the query had no group filter.
pub fn subject_line(system_name: &str, report: &Report) -> String {
    let query = report.query();
    match query.group() {
        Some(group) => format!(
            "[{}] [{}] [{}] {} failures!",
            system_name,
            query.project(),
            group,
            report.len()
        ),
        None => format!(
            "[{}] [{}] {} failures!",
            system_name,
            query.project(),
            report.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::{Execution, Job, Node};
    use crate::domain::query::ExecutionQuery;

    fn job(name: &str) -> Job {
        Job {
            name: name.to_string(),
            group: "ops".to_string(),
            project: "web".to_string(),
            description: String::new(),
        }
    }

    fn execution(id: u32, jobs: &[&str], nodes: &[&str]) -> Execution {
        Execution {
            id: Some(id.to_string()),
            href: format!("https://rundeck.local/execution/follow/{id}"),
            user: "admin".to_string(),
            started: format!("2015-06-0{id}T10:00:00Z"),
            ended: format!("2015-06-0{id}T10:05:00Z"),
            jobs: jobs.iter().map(|name| job(name)).collect(),
            failed_nodes: nodes.iter().map(|name| Node::new(*name)).collect(),
        }
    }

    fn report(group: &str, executions: Vec<Execution>) -> Report {
        Report::new(ExecutionQuery::new("web", group, "1h").unwrap(), executions)
    }

    #[test]
    fn test_render_single_execution_exact() {
        let report = report("", vec![execution(1, &["deploy"], &["n1", "n2", "n3"])]);

        let expected = "1 Failed Executions from project [web].\n\
                        \n\
                        Executions:\n\
                        \tdeploy\n\
                        \t\thttps://rundeck.local/execution/follow/1\n\
                        \t\tStarted: 2015-06-01T10:00:00Z | User:admin\n\
                        \t\tNodes: n1 / n2 / n3\n\
                        \n";

        assert_eq!(render_digest(&report), expected);
    }

    #[test]
    fn test_render_with_group_in_header() {
        let report = report("teamA", vec![execution(1, &["deploy"], &[])]);
        let digest = render_digest(&report);

        let header = digest.lines().next().unwrap();
        assert_eq!(header, "1 Failed Executions from project [web] group [teamA].");
        assert_eq!(digest.matches(" group [teamA]").count(), 1);
    }

    #[test]
    fn test_render_without_group_omits_segment() {
        let report = report("", vec![execution(1, &["deploy"], &[])]);
        assert!(!render_digest(&report).contains("group ["));
    }

    #[test]
    fn test_render_empty_nodes_keeps_label() {
        let report = report("", vec![execution(1, &["deploy"], &[])]);
        let digest = render_digest(&report);

        assert!(digest.contains("\t\tNodes: \n"));
    }

    #[test]
    fn test_render_blocks_in_input_order() {
        let report = report(
            "",
            vec![
                execution(3, &["backup"], &["db-1"]),
                execution(1, &["deploy", "migrate"], &["web-1", "web-2"]),
                execution(2, &["cleanup"], &[]),
            ],
        );
        let digest = render_digest(&report);

        assert!(digest.starts_with("3 Failed Executions from project [web].\n\n"));

        let body = digest.split_once("Executions:\n").unwrap().1;
        let blocks: Vec<&str> = body.split_terminator("\n\n").collect();
        assert_eq!(blocks.len(), 3);

        assert!(blocks[0].starts_with("\tbackup\n\t\thttps://rundeck.local/execution/follow/3"));
        assert!(blocks[1].starts_with("\tdeploy\n\tmigrate\n"));
        assert!(blocks[1].ends_with("Nodes: web-1 / web-2"));
        assert!(blocks[2].ends_with("Nodes: "));
    }

    #[test]
    fn test_render_execution_without_jobs() {
        let report = report("", vec![execution(1, &[], &["n1"])]);
        let digest = render_digest(&report);

        assert!(digest.contains("Executions:\n\t\thttps://rundeck.local/execution/follow/1\n"));
    }

    #[test]
    fn test_subject_without_group() {
        let report = report(
            "",
            vec![execution(1, &["a"], &[]), execution(2, &["b"], &[])],
        );
        assert_eq!(
            subject_line(DEFAULT_SYSTEM_NAME, &report),
            "[RunDeck] [web] 2 failures!"
        );
    }

    #[test]
    fn test_subject_with_group() {
        let report = report("teamA", vec![execution(1, &["a"], &[])]);
        let subject = subject_line(DEFAULT_SYSTEM_NAME, &report);

        assert_eq!(subject, "[RunDeck] [web] [teamA] 1 failures!");
        assert_eq!(subject.matches(" [teamA] ").count(), 1);
    }

    #[test]
    fn test_subject_custom_system_name() {
        let report = report("", vec![execution(1, &["a"], &[])]);
        assert_eq!(
            subject_line("Rundeck Prod", &report),
            "[Rundeck Prod] [web] 1 failures!"
        );
    }
}
