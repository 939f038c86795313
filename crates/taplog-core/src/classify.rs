//! Mapping of incident kinds onto TAP outcomes and directives.

use crate::line::Directive;
use taplog_proto::IncidentKind;

/// Directive keyword an incident is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Todo,
    Skip,
}

impl DirectiveKind {
    /// Attaches a reason; an empty reason renders as the bare keyword.
    pub fn with_reason(self, reason: &str) -> Directive {
        match self {
            Self::Todo => Directive::Todo(reason.to_string()),
            Self::Skip => Directive::Skip(reason.to_string()),
        }
    }
}

/// How an incident appears on its test line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub ok: bool,
    pub directive: Option<DirectiveKind>,
}

/// Classifies an incident.
///
/// Expected and blacklisted results are reported as TODO points, which
/// consumers should treat as soft issues.
pub fn classify(kind: IncidentKind) -> Classification {
    let (ok, directive) = match kind {
        IncidentKind::Pass => (true, None),
        IncidentKind::Fail => (false, None),
        IncidentKind::Skip => (true, Some(DirectiveKind::Skip)),
        IncidentKind::BlacklistedPass => (true, Some(DirectiveKind::Todo)),
        IncidentKind::ExpectedPass | IncidentKind::BlacklistedXPass => {
            (true, Some(DirectiveKind::Todo))
        }
        IncidentKind::ExpectedFail | IncidentKind::BlacklistedXFail => {
            (false, Some(DirectiveKind::Todo))
        }
        IncidentKind::BlacklistedFail => (false, Some(DirectiveKind::Todo)),
    };
    Classification { ok, directive }
}
