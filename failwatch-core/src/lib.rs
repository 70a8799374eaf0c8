//! Failwatch Core
//!
//! Core types and pure transformations for the failwatch reporting bridge.
//!
//! This crate contains:
//! - Domain types: executions, jobs, queries, reports and outbound messages
//! - DTOs: wire representations of the Rundeck and Mandrill APIs
//! - Digest: the plain-text report formatter and subject builder

pub mod digest;
pub mod domain;
pub mod dto;
