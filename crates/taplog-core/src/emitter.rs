//! Streaming TAP 13 emitter.
//!
//! Data-driven tests build their rows lazily, so the number of test points
//! is unknown until the run ends. The plan is therefore written last, after
//! every test line, and summarised in comments.
//!
//! Each failing or annotated test line is followed by a YAMLish diagnostic
//! block. Messages recorded while a function or data row is running are
//! held back and written into the next block, so they stay attached to the
//! test point they belong to.

use crate::buffer::PendingMessages;
use crate::classify::classify;
use crate::config::EmitterConfig;
use crate::error::TapError;
use crate::heuristic::FailureDetails;
use crate::line::{self, Directive, TestPoint};
use crate::yamlish::{BLOCK_END, BLOCK_START, INDENT, push_comment, push_field};
use std::fmt::Write as _;
use std::io::Write;
use taplog_proto::{IncidentKind, MessageKind, RunContext, SourceLocation};
use tracing::{debug, trace, warn};

/// Whether messages are written immediately or held for the next block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Gathering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    NotStarted,
    Running,
    Finished,
}

/// Renders test lifecycle events as a TAP 13 stream.
///
/// Calls must follow the order
/// `start → (enter_function → (enter_data_row → incident/message*)*)* → finish`.
/// Out-of-order calls are rejected with [`TapError::ProtocolViolation`].
pub struct TapEmitter<W: Write> {
    sink: W,
    config: EmitterConfig,
    lifecycle: Lifecycle,
    phase: Phase,
    /// Set right after an expected failure, whose accompanying pass must
    /// not produce a second test point.
    expected_failure: bool,
    /// Synthetic points emitted so far. The driver never counts them, so
    /// every later ordinal and the plan are shifted by this amount.
    synthetic_points: usize,
    pending: PendingMessages,
}

impl<W: Write> TapEmitter<W> {
    pub fn new(sink: W) -> Self {
        Self::with_config(sink, EmitterConfig::default())
    }

    pub fn with_config(sink: W, config: EmitterConfig) -> Self {
        Self {
            sink,
            config,
            lifecycle: Lifecycle::NotStarted,
            phase: Phase::Idle,
            expected_failure: false,
            synthetic_points: 0,
            pending: PendingMessages::new(),
        }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Returns true while messages are being held for the current scope.
    pub fn is_gathering(&self) -> bool {
        self.phase == Phase::Gathering
    }

    pub fn has_pending_messages(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.lifecycle == Lifecycle::Finished
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes the version header and the subject comment.
    pub fn start(&mut self, ctx: &dyn RunContext) -> Result<(), TapError> {
        match self.lifecycle {
            Lifecycle::NotStarted => {}
            Lifecycle::Running => return Err(reject("start called twice")),
            Lifecycle::Finished => return Err(TapError::Finished),
        }
        self.lifecycle = Lifecycle::Running;
        debug!(subject = ctx.subject_name(), "starting TAP stream");

        let mut out = String::from("TAP version 13\n");
        push_comment(&mut out, "", ctx.subject_name());
        self.write(&out)
    }

    /// Writes the plan and summary. Nothing may be emitted afterwards.
    pub fn finish(&mut self, ctx: &dyn RunContext) -> Result<(), TapError> {
        self.ensure_running("finish")?;
        if !self.pending.is_empty() {
            self.flush_pending(ctx)?;
        }
        self.phase = Phase::Idle;
        self.lifecycle = Lifecycle::Finished;

        let total = ctx.total_count() + self.synthetic_points;
        // Synthetic points are plain `ok` lines, so consumers count them as passes.
        let passed = ctx.pass_count() + self.synthetic_points;
        let failed = ctx.fail_count();
        debug!(total, passed, failed, "finishing TAP stream");
        let mut out = format!("1..{total}\n");
        if self.config.summary {
            let _ = write!(out, "# tests {total}\n# pass {passed}\n# fail {failed}\n");
        }
        self.write(&out)
    }

    /// Opens a test function scope. `None` marks the end of all functions.
    pub fn enter_function(&mut self, name: Option<&str>) -> Result<(), TapError> {
        self.ensure_running("enter_function")?;
        self.expected_failure = false;
        if self.phase == Phase::Gathering {
            return Err(reject(
                "enter_function called while the previous scope is still gathering",
            ));
        }
        if !self.pending.is_empty() {
            return Err(reject(
                "enter_function called with undelivered messages from the previous scope",
            ));
        }
        self.phase = if name.is_some() {
            Phase::Gathering
        } else {
            Phase::Idle
        };
        debug!(function = name, "entered test function");
        Ok(())
    }

    /// Closes a test function scope. Nothing is written.
    pub fn leave_function(&mut self) -> Result<(), TapError> {
        self.ensure_running("leave_function")
    }

    /// Opens a data row scope. `None` marks the end of the function's rows.
    ///
    /// Messages still pending from the previous row are delivered first
    /// through a synthetic "Data prepared" test point.
    pub fn enter_data_row(
        &mut self,
        ctx: &dyn RunContext,
        tag: Option<&str>,
    ) -> Result<(), TapError> {
        self.ensure_running("enter_data_row")?;
        self.expected_failure = false;
        if !self.pending.is_empty() {
            self.flush_pending(ctx)?;
        }
        self.phase = if tag.is_some() {
            Phase::Gathering
        } else {
            Phase::Idle
        };
        debug!(tag, "entered data row");
        Ok(())
    }

    /// Reports the outcome of a check as a test point.
    ///
    /// `ctx` counters must already include this incident.
    pub fn record_incident(
        &mut self,
        ctx: &dyn RunContext,
        kind: IncidentKind,
        description: &str,
        location: Option<&SourceLocation>,
    ) -> Result<(), TapError> {
        self.ensure_running("record_incident")?;
        self.phase = Phase::Idle;

        if self.expected_failure
            && matches!(
                kind,
                IncidentKind::Pass
                    | IncidentKind::BlacklistedPass
                    | IncidentKind::ExpectedFail
                    | IncidentKind::BlacklistedXFail
            )
        {
            debug!(%kind, "suppressed incident following an expected failure");
            return Ok(());
        }
        self.expected_failure = kind.is_expected_failure();

        let class = classify(kind);
        // The pass that accompanies an expected failure is not counted yet
        // but takes this slot.
        let mut number = ctx.total_count() + self.synthetic_points;
        if self.expected_failure {
            number += 1;
        }
        let point = TestPoint {
            ok: class.ok,
            number,
            identifier: current_identifier(ctx),
            directive: class.directive.map(|d| d.with_reason(description)),
        };
        debug!(number, ok = point.ok, %kind, "emitting test point");

        let mut out = format!("{point}\n");
        if !class.ok || !self.pending.is_empty() {
            self.begin_block(&mut out);
            if !class.ok && !kind.is_expected_failure() {
                self.describe_failure(&mut out, description, point.directive.is_some());
            }
            if let Some(location) = location.filter(|_| self.config.emit_location) {
                push_location(&mut out, ctx, location);
            }
            out.push_str(BLOCK_END);
        }
        self.write(&out)
    }

    /// Records a diagnostic message.
    ///
    /// Outside a gathering scope the message is written straight away as a
    /// comment. Inside one, driver messages become block comments and all
    /// others become `extensions.messages` entries of the next block.
    pub fn record_message(
        &mut self,
        kind: MessageKind,
        text: &str,
        _location: Option<&SourceLocation>,
    ) -> Result<(), TapError> {
        self.ensure_running("record_message")?;
        match self.phase {
            Phase::Idle => {
                let mut out = String::new();
                push_comment(&mut out, "", &format!("{}: {}", kind.flavor(), text));
                self.write(&out)
            }
            Phase::Gathering if kind.is_internal() => {
                trace!(%kind, "buffered comment");
                self.pending.push_comment(kind, text);
                Ok(())
            }
            Phase::Gathering => {
                trace!(%kind, "buffered message");
                self.pending.push_message(kind, text);
                Ok(())
            }
        }
    }

    /// Delivers pending messages attached to a synthetic passing point.
    fn flush_pending(&mut self, ctx: &dyn RunContext) -> Result<(), TapError> {
        self.synthetic_points += 1;
        let point = TestPoint {
            ok: true,
            number: ctx.total_count() + self.synthetic_points,
            identifier: line::identifier(ctx.function_name().unwrap_or_default(), None, None),
            directive: Some(Directive::Note("Data prepared")),
        };
        debug!(number = point.number, "flushing pending messages");

        let mut out = format!("{point}\n");
        self.begin_block(&mut out);
        out.push_str(BLOCK_END);
        self.write(&out)
    }

    /// Opens a diagnostic block and moves the pending buffer into it.
    fn begin_block(&mut self, out: &mut String) {
        out.push_str(BLOCK_START);
        self.pending.take().write_yaml(out);
    }

    fn describe_failure(&self, out: &mut String, description: &str, has_directive: bool) {
        let details = if self.config.parse_failure_text {
            FailureDetails::parse(description)
        } else {
            None
        };
        match details {
            Some(details) => details.write_yaml(out),
            // A directive already carries the description.
            None if !has_directive && !description.is_empty() => {
                push_comment(out, INDENT, description);
            }
            None => {}
        }
    }

    fn ensure_running(&self, operation: &str) -> Result<(), TapError> {
        match self.lifecycle {
            Lifecycle::Running => Ok(()),
            Lifecycle::NotStarted => Err(reject(format!("{operation} called before start"))),
            Lifecycle::Finished => {
                warn!(operation, "call after the TAP stream was finished");
                Err(TapError::Finished)
            }
        }
    }

    fn write(&mut self, out: &str) -> Result<(), TapError> {
        self.sink.write_all(out.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }
}

fn reject(message: impl Into<String>) -> TapError {
    let err = TapError::violation(message);
    warn!(%err, "rejected out-of-order call");
    err
}

fn current_identifier(ctx: &dyn RunContext) -> String {
    line::identifier(
        ctx.function_name().unwrap_or_default(),
        ctx.global_data_tag(),
        ctx.data_tag(),
    )
}

fn push_location(out: &mut String, ctx: &dyn RunContext, location: &SourceLocation) {
    let at = format!(
        "{}::{}() ({})",
        ctx.subject_name(),
        ctx.function_name().unwrap_or_default(),
        location
    );
    push_field(out, INDENT, "at", &at);
    push_field(out, INDENT, "file", &location.file);
    let _ = writeln!(out, "{INDENT}line: {}", location.line);
}
