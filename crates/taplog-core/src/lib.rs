//! # taplog-core
//!
//! Streaming Test Anything Protocol (TAP 13) emitter.
//!
//! This crate provides:
//! - [`TapEmitter`], which turns test lifecycle events into TAP lines
//! - YAMLish diagnostic blocks for failing or annotated test points
//! - Best-effort expected/actual extraction from failure descriptions
//! - [`RunTally`], an in-memory [`RunContext`] for drivers that do not
//!   keep their own statistics
//!
//! # Example
//!
//! ```
//! use taplog_core::{IncidentKind, RunTally, TapEmitter};
//!
//! let mut tally = RunTally::new("Suite");
//! let mut emitter = TapEmitter::new(Vec::new());
//!
//! emitter.start(&tally).unwrap();
//! tally.set_function(Some("foo"));
//! emitter.enter_function(Some("foo")).unwrap();
//! tally.count(IncidentKind::Pass);
//! emitter.record_incident(&tally, IncidentKind::Pass, "", None).unwrap();
//! emitter.finish(&tally).unwrap();
//!
//! let tap = String::from_utf8(emitter.into_inner()).unwrap();
//! assert!(tap.starts_with("TAP version 13\n# Suite\nok 1 - foo()\n1..1\n"));
//! ```

mod buffer;
mod classify;
mod config;
mod emitter;
mod error;
mod heuristic;
mod line;
mod tally;
pub mod yamlish;

pub use buffer::{Message, PendingMessages};
pub use classify::{Classification, DirectiveKind, classify};
pub use config::EmitterConfig;
pub use emitter::TapEmitter;
pub use error::{ConfigError, TapError};
pub use heuristic::{FailureDetails, FailureShape};
pub use line::{Directive, TestPoint, identifier};
pub use tally::RunTally;
pub use taplog_proto::{IncidentKind, MessageKind, RunContext, SourceLocation};
