//! Incident outcomes reported by the test driver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single check, as reported by the driver.
///
/// "Expected" kinds come from checks marked as known failures; "blacklisted"
/// kinds come from tests whose result is recorded but not trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    Pass,
    Fail,
    Skip,
    /// A check failed where a failure was expected.
    ExpectedFail,
    /// A check passed where a failure was expected.
    ExpectedPass,
    BlacklistedPass,
    BlacklistedFail,
    BlacklistedXFail,
    BlacklistedXPass,
}

impl IncidentKind {
    /// Every variant, in declaration order.
    pub const ALL: [IncidentKind; 9] = [
        Self::Pass,
        Self::Fail,
        Self::Skip,
        Self::ExpectedFail,
        Self::ExpectedPass,
        Self::BlacklistedPass,
        Self::BlacklistedFail,
        Self::BlacklistedXFail,
        Self::BlacklistedXPass,
    ];

    /// Returns true for the kinds that are followed by a redundant pass.
    pub fn is_expected_failure(self) -> bool {
        matches!(self, Self::ExpectedFail | Self::BlacklistedXFail)
    }

    /// Returns the snake_case name used in event logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::ExpectedFail => "expected_fail",
            Self::ExpectedPass => "expected_pass",
            Self::BlacklistedPass => "blacklisted_pass",
            Self::BlacklistedFail => "blacklisted_fail",
            Self::BlacklistedXFail => "blacklisted_x_fail",
            Self::BlacklistedXPass => "blacklisted_x_pass",
        }
    }
}

impl fmt::Display for IncidentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source position a check was made at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_failure_kinds() {
        let expected: Vec<_> = IncidentKind::ALL
            .iter()
            .copied()
            .filter(|k| k.is_expected_failure())
            .collect();
        assert_eq!(
            expected,
            vec![IncidentKind::ExpectedFail, IncidentKind::BlacklistedXFail]
        );
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for kind in IncidentKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: IncidentKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::new("tst_foo.rs", 42);
        assert_eq!(loc.to_string(), "tst_foo.rs:42");
    }
}
