//! In-memory run statistics implementing [`RunContext`].

use taplog_proto::{IncidentKind, RunContext};

/// Identity and counters for a run, updated by the driver.
///
/// Call [`RunTally::count`] before handing the same incident to the emitter
/// so the emitter sees counters that already include it.
#[derive(Debug, Clone, Default)]
pub struct RunTally {
    subject: String,
    function: Option<String>,
    data_tag: Option<String>,
    global_data_tag: Option<String>,
    passed: usize,
    failed: usize,
    skipped: usize,
    blacklisted: usize,
}

impl RunTally {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            ..Self::default()
        }
    }

    /// Sets the current function and clears any data tags.
    pub fn set_function(&mut self, function: Option<&str>) {
        self.function = function.map(str::to_string);
        self.data_tag = None;
        self.global_data_tag = None;
    }

    pub fn set_data_tag(&mut self, tag: Option<&str>) {
        self.data_tag = tag.map(str::to_string);
    }

    pub fn set_global_data_tag(&mut self, tag: Option<&str>) {
        self.global_data_tag = tag.map(str::to_string);
    }

    /// Counts an incident.
    ///
    /// Expected failures are not counted themselves: the pass reported
    /// right after each one is.
    pub fn count(&mut self, kind: IncidentKind) {
        match kind {
            IncidentKind::Pass => self.passed += 1,
            IncidentKind::Fail | IncidentKind::ExpectedPass => self.failed += 1,
            IncidentKind::Skip => self.skipped += 1,
            IncidentKind::BlacklistedPass
            | IncidentKind::BlacklistedFail
            | IncidentKind::BlacklistedXPass => self.blacklisted += 1,
            IncidentKind::ExpectedFail | IncidentKind::BlacklistedXFail => {}
        }
    }

    pub fn skip_count(&self) -> usize {
        self.skipped
    }

    pub fn blacklisted_count(&self) -> usize {
        self.blacklisted
    }
}

impl RunContext for RunTally {
    fn subject_name(&self) -> &str {
        &self.subject
    }

    fn function_name(&self) -> Option<&str> {
        self.function.as_deref()
    }

    fn data_tag(&self) -> Option<&str> {
        self.data_tag.as_deref()
    }

    fn global_data_tag(&self) -> Option<&str> {
        self.global_data_tag.as_deref()
    }

    fn total_count(&self) -> usize {
        self.passed + self.failed + self.skipped + self.blacklisted
    }

    fn pass_count(&self) -> usize {
        self.passed
    }

    fn fail_count(&self) -> usize {
        self.failed
    }
}
