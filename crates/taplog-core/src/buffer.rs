//! Messages held back until the next diagnostic block.

use crate::yamlish::{INDENT, push_comment, push_field};
use std::fmt::Write;
use taplog_proto::MessageKind;

/// A structured entry for the `extensions.messages` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub text: String,
}

/// Comments and messages recorded while a scope is gathering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingMessages {
    comments: Vec<String>,
    messages: Vec<Message>,
}

impl PendingMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty() && self.messages.is_empty()
    }

    /// Queues a driver comment, written as a top-level block comment.
    pub fn push_comment(&mut self, kind: MessageKind, text: &str) {
        self.comments.push(format!("{}: {}", kind.flavor(), text));
    }

    /// Queues a structured message for the `extensions` mapping.
    pub fn push_message(&mut self, kind: MessageKind, text: &str) {
        self.messages.push(Message {
            kind,
            text: text.to_string(),
        });
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Moves everything out, leaving this buffer empty.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Appends the buffered content as the opening lines of a block.
    pub fn write_yaml(&self, out: &mut String) {
        for comment in &self.comments {
            push_comment(out, INDENT, comment);
        }
        if self.messages.is_empty() {
            return;
        }
        let _ = writeln!(out, "{INDENT}extensions:");
        let _ = writeln!(out, "{INDENT}{INDENT}messages:");
        let item = format!("{INDENT}{INDENT}- ");
        let nested = format!("{INDENT}{INDENT}{INDENT}");
        for message in &self.messages {
            push_field(out, &item, "severity", message.kind.flavor());
            push_field(out, &nested, "message", &message.text);
        }
    }
}
