//! TAP test line rendering.

use std::borrow::Cow;
use std::fmt;

/// Suffix carried by a test line after its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `# TODO [reason]`: the result is a soft issue.
    Todo(String),
    /// `# SKIP [reason]`: the test did not run to completion.
    Skip(String),
    /// A fixed annotation that is not a TAP directive keyword.
    Note(&'static str),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (keyword, reason) = match self {
            Self::Todo(reason) => ("TODO", reason.as_str()),
            Self::Skip(reason) => ("SKIP", reason.as_str()),
            Self::Note(text) => return write!(f, " # {text}"),
        };
        if reason.is_empty() {
            write!(f, " # {keyword}")
        } else {
            write!(f, " # {keyword} {}", escape_reason(reason))
        }
    }
}

/// A single `ok` / `not ok` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPoint {
    pub ok: bool,
    pub number: usize,
    pub identifier: String,
    pub directive: Option<Directive>,
}

impl fmt::Display for TestPoint {
    /// Renders the line without its trailing newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {}",
            if self.ok { "ok" } else { "not ok" },
            self.number,
            escape_identifier(&self.identifier)
        )?;
        if let Some(directive) = &self.directive {
            write!(f, "{directive}")?;
        }
        Ok(())
    }
}

/// Builds `function(tags)`, joining a global and a local data tag with `:`.
pub fn identifier(function: &str, global_tag: Option<&str>, tag: Option<&str>) -> String {
    let tags = match (global_tag, tag) {
        (Some(global), Some(local)) => format!("{global}:{local}"),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    };
    format!("{function}({tags})")
}

/// A `#` in a description would start a directive, so it is escaped.
fn escape_identifier(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '#', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '#' => out.push_str("\\#"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn escape_reason(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('\r', "\\r").replace('\n', "\\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ok: bool, number: usize, identifier: &str, directive: Option<Directive>) -> String {
        TestPoint {
            ok,
            number,
            identifier: identifier.to_string(),
            directive,
        }
        .to_string()
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(point(true, 1, "foo()", None), "ok 1 - foo()");
        assert_eq!(point(false, 7, "bar()", None), "not ok 7 - bar()");
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            point(true, 2, "foo()", Some(Directive::Skip("not supported".into()))),
            "ok 2 - foo() # SKIP not supported"
        );
        assert_eq!(
            point(false, 3, "foo()", Some(Directive::Todo(String::new()))),
            "not ok 3 - foo() # TODO"
        );
        assert_eq!(
            point(true, 4, "foo()", Some(Directive::Note("Data prepared"))),
            "ok 4 - foo() # Data prepared"
        );
    }

    #[test]
    fn test_identifier_tags() {
        assert_eq!(identifier("foo", None, None), "foo()");
        assert_eq!(identifier("foo", None, Some("row1")), "foo(row1)");
        assert_eq!(identifier("foo", Some("g"), None), "foo(g)");
        assert_eq!(identifier("foo", Some("g"), Some("row1")), "foo(g:row1)");
    }

    #[test]
    fn test_identifier_escaping() {
        assert_eq!(
            point(true, 1, "foo(#1)", None),
            "ok 1 - foo(\\#1)",
            "hash must not start a directive"
        );
        assert_eq!(point(true, 1, "foo(a\nb)", None), "ok 1 - foo(a\\nb)");
        assert_eq!(point(true, 1, "foo(c:\\tmp)", None), "ok 1 - foo(c:\\\\tmp)");
    }

    #[test]
    fn test_reason_newlines_are_escaped() {
        let line = point(
            false,
            5,
            "foo()",
            Some(Directive::Todo("line one\nline two".into())),
        );
        assert_eq!(line, "not ok 5 - foo() # TODO line one\\nline two");
        assert!(!line.contains('\n'));
    }
}
