//! Diagnostic message severities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic message.
///
/// The first five come from the code under test; the `Internal*` kinds are
/// produced by the driver itself and are rendered as comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Debug,
    Info,
    Warning,
    Critical,
    Fatal,
    InternalInfo,
    InternalWarn,
}

impl MessageKind {
    /// Word written in front of the message text.
    pub fn flavor(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Fatal => "fatal",
            Self::InternalInfo => "inform",
            Self::InternalWarn => "warn",
        }
    }

    /// Returns true for driver-originated messages.
    pub fn is_internal(self) -> bool {
        matches!(self, Self::InternalInfo | Self::InternalWarn)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flavor())
    }
}
