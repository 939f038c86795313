//! Rendering helpers for the YAMLish subset used in diagnostic blocks.
//!
//! Consumers parse blocks with minimal YAML readers, so output sticks to
//! flat `key: value` lines, two-space indentation and double-quoted scalars
//! whenever a plain scalar could be misread.

use std::borrow::Cow;
use std::fmt::Write;

/// One level of indentation. Matches the width of a list item's `- ` prefix.
pub const INDENT: &str = "  ";

/// First line of a diagnostic block.
pub const BLOCK_START: &str = "  ---\n";

/// Last line of a diagnostic block.
pub const BLOCK_END: &str = "  ...\n";

/// Renders `value` as a YAML scalar, quoting only when required.
pub fn scalar(value: &str) -> Cow<'_, str> {
    if needs_quotes(value) {
        Cow::Owned(quote(value))
    } else {
        Cow::Borrowed(value)
    }
}

fn needs_quotes(value: &str) -> bool {
    let Some(first) = value.chars().next() else {
        return true;
    };
    if first.is_whitespace() || value.ends_with(char::is_whitespace) || value.ends_with(':') {
        return true;
    }
    if "-?:,[]{}#&*!|>'\"%@`".contains(first) {
        return true;
    }
    value.chars().any(char::is_control) || value.contains(": ") || value.contains(" #")
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c) & 0xff);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Appends `indent` + `key: value` with the value rendered as a scalar.
pub fn push_field(out: &mut String, indent: &str, key: &str, value: &str) {
    let _ = writeln!(out, "{indent}{key}: {}", scalar(value));
}

/// Appends `text` as comment lines, one `# ` line per line of input.
///
/// `\r\n`, a lone `\r` and `\n` all end a line, so no carriage return
/// reaches the stream.
pub fn push_comment(out: &mut String, indent: &str, text: &str) {
    for line in text.replace("\r\n", "\n").split(['\n', '\r']) {
        if line.is_empty() {
            let _ = writeln!(out, "{indent}#");
        } else {
            let _ = writeln!(out, "{indent}# {line}");
        }
    }
}
