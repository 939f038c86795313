//! Replay of recorded test events through a [`TapEmitter`].
//!
//! An event log is JSONL, one event per line, tagged by `event`:
//!
//! ```text
//! {"event":"start"}
//! {"event":"enter_function","name":"parses_header"}
//! {"event":"incident","kind":"fail","description":"boom","file":"parser.rs","line":12}
//! {"event":"finish"}
//! ```
//!
//! Events are applied in order to a [`RunTally`] and an emitter, the same
//! way a live test driver would call them.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use taplog_core::{EmitterConfig, RunTally, TapEmitter, TapError};
use taplog_proto::{IncidentKind, MessageKind, SourceLocation};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while replaying an event log.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read event log: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed event on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Tap(#[from] TapError),
}

/// A single recorded lifecycle call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    Start,
    EnterFunction {
        #[serde(default)]
        name: Option<String>,
    },
    LeaveFunction,
    EnterDataRow {
        #[serde(default)]
        tag: Option<String>,
        #[serde(default)]
        global_tag: Option<String>,
    },
    Incident {
        kind: IncidentKind,
        #[serde(default)]
        description: String,
        #[serde(default)]
        file: Option<String>,
        #[serde(default)]
        line: Option<u32>,
    },
    Message {
        kind: MessageKind,
        text: String,
    },
    Finish,
}

/// Parses a JSONL event log, skipping blank lines.
pub fn parse_events(content: &str) -> Result<Vec<ReplayEvent>, ReplayError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| ReplayError::Parse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Reads and parses an event log file.
pub fn load_events(path: &Path) -> Result<Vec<ReplayEvent>, ReplayError> {
    let content = std::fs::read_to_string(path)?;
    parse_events(&content)
}

/// Feeds events into an emitter while keeping the run statistics.
pub struct Replayer<W: Write> {
    tally: RunTally,
    emitter: TapEmitter<W>,
}

impl<W: Write> Replayer<W> {
    pub fn new(subject: &str, sink: W, config: EmitterConfig) -> Self {
        Self {
            tally: RunTally::new(subject),
            emitter: TapEmitter::with_config(sink, config),
        }
    }

    pub fn tally(&self) -> &RunTally {
        &self.tally
    }

    /// Applies one event.
    pub fn apply(&mut self, event: &ReplayEvent) -> Result<(), TapError> {
        match event {
            ReplayEvent::Start => self.emitter.start(&self.tally),
            ReplayEvent::EnterFunction { name } => {
                self.tally.set_function(name.as_deref());
                self.emitter.enter_function(name.as_deref())
            }
            ReplayEvent::LeaveFunction => self.emitter.leave_function(),
            ReplayEvent::EnterDataRow { tag, global_tag } => {
                self.tally.set_global_data_tag(global_tag.as_deref());
                self.tally.set_data_tag(tag.as_deref());
                self.emitter.enter_data_row(&self.tally, tag.as_deref())
            }
            ReplayEvent::Incident {
                kind,
                description,
                file,
                line,
            } => {
                self.tally.count(*kind);
                let location = file
                    .as_ref()
                    .map(|file| SourceLocation::new(file.clone(), line.unwrap_or(0)));
                self.emitter
                    .record_incident(&self.tally, *kind, description, location.as_ref())
            }
            ReplayEvent::Message { kind, text } => self.emitter.record_message(*kind, text, None),
            ReplayEvent::Finish => self.emitter.finish(&self.tally),
        }
    }

    pub fn into_inner(self) -> W {
        self.emitter.into_inner()
    }
}

/// Replays `events` into `sink` and returns the sink.
pub fn replay<W: Write>(
    events: &[ReplayEvent],
    subject: &str,
    sink: W,
    config: EmitterConfig,
) -> Result<W, ReplayError> {
    let mut replayer = Replayer::new(subject, sink, config);
    for (index, event) in events.iter().enumerate() {
        debug!(index, ?event, "applying event");
        replayer.apply(event)?;
    }
    Ok(replayer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let content = concat!(
            "{\"event\":\"start\"}\n",
            "\n",
            "{\"event\":\"enter_function\",\"name\":\"foo\"}\n",
            "{\"event\":\"incident\",\"kind\":\"skip\",\"description\":\"not supported\"}\n",
            "{\"event\":\"enter_data_row\"}\n",
            "{\"event\":\"finish\"}\n",
        );
        let events = parse_events(content).unwrap();
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[1],
            ReplayEvent::EnterFunction {
                name: Some("foo".to_string())
            }
        );
        assert_eq!(
            events[2],
            ReplayEvent::Incident {
                kind: IncidentKind::Skip,
                description: "not supported".to_string(),
                file: None,
                line: None,
            }
        );
        assert_eq!(
            events[3],
            ReplayEvent::EnterDataRow {
                tag: None,
                global_tag: None
            }
        );
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let content = "{\"event\":\"start\"}\n\n{\"event\":\"bogus\"}\n";
        let err = parse_events(content).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 3, .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_replay_scenario() {
        let events = vec![
            ReplayEvent::Start,
            ReplayEvent::EnterFunction {
                name: Some("foo".to_string()),
            },
            ReplayEvent::Incident {
                kind: IncidentKind::Pass,
                description: String::new(),
                file: None,
                line: None,
            },
            ReplayEvent::LeaveFunction,
            ReplayEvent::Finish,
        ];
        let out = replay(&events, "Suite", Vec::new(), EmitterConfig::default()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "TAP version 13\n# Suite\nok 1 - foo()\n1..1\n# tests 1\n# pass 1\n# fail 0\n"
        );
    }

    #[test]
    fn test_replay_incident_location() {
        let events = vec![
            ReplayEvent::Start,
            ReplayEvent::EnterFunction {
                name: Some("foo".to_string()),
            },
            ReplayEvent::Incident {
                kind: IncidentKind::Fail,
                description: String::new(),
                file: Some("foo.rs".to_string()),
                line: Some(9),
            },
            ReplayEvent::Finish,
        ];
        let out = replay(&events, "Suite", Vec::new(), EmitterConfig::default()).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("  at: Suite::foo() (foo.rs:9)\n  file: foo.rs\n  line: 9\n"));
    }

    #[test]
    fn test_replay_surfaces_protocol_violation() {
        let events = vec![
            ReplayEvent::EnterFunction {
                name: Some("foo".to_string()),
            },
        ];
        let err = replay(&events, "Suite", Vec::new(), EmitterConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Tap(TapError::ProtocolViolation(_))
        ));
    }

    #[test]
    fn test_replayer_tracks_tally() {
        let mut replayer = Replayer::new("Suite", Vec::new(), EmitterConfig::default());
        replayer.apply(&ReplayEvent::Start).unwrap();
        replayer
            .apply(&ReplayEvent::EnterFunction {
                name: Some("foo".to_string()),
            })
            .unwrap();
        replayer
            .apply(&ReplayEvent::Incident {
                kind: IncidentKind::Fail,
                description: "boom".to_string(),
                file: None,
                line: None,
            })
            .unwrap();
        assert_eq!(taplog_proto::RunContext::fail_count(replayer.tally()), 1);
    }
}
