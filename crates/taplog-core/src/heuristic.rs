//! Best-effort extraction of expected/actual values from failure text.
//!
//! Drivers only hand the emitter a rendered description, so the values are
//! recovered by matching the two layouts assertion helpers produce:
//!
//! ```text
//! 'list.is_empty()' returned FALSE. (queue must drain)
//!
//! Compared values are not the same
//!    Actual   (len): 3
//!    Expected (4)  : 4
//! ```
//!
//! Anything else yields `None` and is reported as a plain comment instead.

use crate::yamlish::{INDENT, push_field};
use regex::Regex;
use std::sync::LazyLock;

static VERIFY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^'(?<expression>.*)' returned (?<actual>\w+).+\((?<message>.*)\)\n?$")
        .expect("verify pattern is valid")
});

static COMPARE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?<message>.*)\n",
        r"\s*Actual\s+\((?<actual_expression>.*)\)\s*: (?<actual>.*)\n",
        r"\s*Expected\s+\((?<expected_expression>.*)\)\s*: (?<expected>.*)\n?$",
    ))
    .expect("compare pattern is valid")
});

const DEFAULT_VERIFY_MESSAGE: &str = "Verification failed";

/// Which failure layout matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureShape {
    /// A boolean check on a single expression.
    Verify,
    /// A comparison of two values.
    Compare,
}

impl FailureShape {
    /// Value of the `type` key in a diagnostic block.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verify => "QVERIFY",
            Self::Compare => "QCOMPARE",
        }
    }
}

/// Structured fields recovered from a failure description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDetails {
    pub shape: FailureShape,
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl FailureDetails {
    /// Tries the verify layout first, then the compare layout.
    pub fn parse(description: &str) -> Option<Self> {
        Self::parse_verify(description).or_else(|| Self::parse_compare(description))
    }

    fn parse_verify(description: &str) -> Option<Self> {
        let caps = VERIFY_PATTERN.captures(description)?;
        let suffix = format!(" ({})", &caps["expression"]);
        let returned = caps["actual"].to_lowercase();
        let negated = if returned.starts_with("true") {
            "false"
        } else {
            "true"
        };
        let message = match &caps["message"] {
            "" => DEFAULT_VERIFY_MESSAGE.to_string(),
            message => message.to_string(),
        };

        Some(Self {
            shape: FailureShape::Verify,
            message,
            expected: format!("{negated}{suffix}"),
            actual: format!("{returned}{suffix}"),
        })
    }

    fn parse_compare(description: &str) -> Option<Self> {
        let caps = COMPARE_PATTERN.captures(description)?;
        Some(Self {
            shape: FailureShape::Compare,
            message: caps["message"].to_string(),
            expected: format!("{} ({})", &caps["expected"], &caps["expected_expression"]),
            actual: format!("{} ({})", &caps["actual"], &caps["actual_expression"]),
        })
    }

    /// Appends the block fields for this failure.
    ///
    /// Some consumers read `wanted`/`found`, others `expected`/`actual`, so
    /// both pairs are written.
    pub fn write_yaml(&self, out: &mut String) {
        push_field(out, INDENT, "type", self.shape.as_str());
        push_field(out, INDENT, "message", &self.message);
        push_field(out, INDENT, "wanted", &self.expected);
        push_field(out, INDENT, "found", &self.actual);
        push_field(out, INDENT, "expected", &self.expected);
        push_field(out, INDENT, "actual", &self.actual);
    }
}
