//! Executions response parsing
//!
//! Decoding is permissive about content (missing jobs, nodes or dates become
//! empty values) but strict about structure: a body that is not a
//! well-formed `<executions>` or `<result>` document is an error, never an
//! empty list.

use failwatch_core::domain::execution::Execution;
use failwatch_core::dto::executions::ExecutionsDocument;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{ClientError, Result};

const EXECUTIONS_ROOT: &str = "executions";
const LEGACY_ROOT: &str = "result";

/// Decode an executions response body into executions, in document order
pub fn parse_executions(body: &str) -> Result<Vec<Execution>> {
    let root = check_structure(body)?;

    let document: ExecutionsDocument = quick_xml::de::from_str(body)
        .map_err(|e| ClientError::ParseError(format!("invalid executions document: {e}")))?;

    if let Some(message) = document.error_message() {
        return Err(ClientError::ServerError(message));
    }

    if root == LEGACY_ROOT && document.envelope.is_none() {
        return Err(ClientError::ParseError(
            "<result> envelope does not contain <executions>".to_string(),
        ));
    }

    Ok(document.into_executions())
}

/// Walk the whole document once, checking it is well formed with a single
/// known root element, and return that root's name
fn check_structure(body: &str) -> Result<String> {
    let mut reader = Reader::from_str(body);
    let mut root: Option<String> = None;
    let mut open: Vec<String> = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            ClientError::ParseError(format!(
                "malformed XML at position {}: {e}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                if open.is_empty() {
                    accept_root(&mut root, &name)?;
                }
                open.push(name);
            }
            Event::Empty(start) => {
                if open.is_empty() {
                    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    accept_root(&mut root, &name)?;
                }
            }
            Event::End(_) => {
                open.pop();
            }
            Event::Text(text) if open.is_empty() => {
                if !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(ClientError::ParseError(
                        "response is not an XML document".to_string(),
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(ClientError::ParseError(format!(
            "unexpected end of document: <{unclosed}> is not closed"
        )));
    }

    root.ok_or_else(|| ClientError::ParseError("empty response body".to_string()))
}

fn accept_root(root: &mut Option<String>, name: &str) -> Result<()> {
    if root.is_some() {
        return Err(ClientError::ParseError(
            "document has more than one root element".to_string(),
        ));
    }

    if name != EXECUTIONS_ROOT && name != LEGACY_ROOT {
        return Err(ClientError::ParseError(format!(
            "unexpected root element <{name}>, expected <{EXECUTIONS_ROOT}> or <{LEGACY_ROOT}>"
        )));
    }

    *root = Some(name.to_string());
    Ok(())
}
