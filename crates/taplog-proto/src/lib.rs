//! # taplog-proto
//!
//! Shared types and traits for the taplog crates.
//!
//! This crate provides the vocabulary a test driver uses to talk to a TAP
//! emitter, including:
//! - Incident outcomes reported for each test point
//! - Message severities for diagnostic output
//! - The [`RunContext`] trait the emitter reads identity and counters from

mod context;
mod incident;
mod message;

pub use context::RunContext;
pub use incident::{IncidentKind, SourceLocation};
pub use message::MessageKind;
