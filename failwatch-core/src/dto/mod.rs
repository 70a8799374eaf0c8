//! Data Transfer Objects for the external APIs
//!
//! Wire representations of what failwatch exchanges with Rundeck (XML) and
//! Mandrill (JSON). DTOs stay close to the documents on the wire and are
//! converted into domain types at the edge.

pub mod executions;
pub mod mandrill;
