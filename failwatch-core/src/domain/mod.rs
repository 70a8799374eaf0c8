//! Core domain types
//!
//! These types represent what a single failwatch run works with: the query
//! sent to Rundeck, the failed executions that come back, the report built
//! from them and the message handed to the mail provider. All of them are
//! immutable once constructed.

pub mod execution;
pub mod message;
pub mod query;
pub mod report;
