//! Line classification
//!
//! Every line of a document belongs to exactly one [`LineKind`]. The kind is
//! derived from the text on demand and never stored.
//!
//! Precedence (first match wins, tested against the trimmed line):
//!
//! | Kind | Rule |
//! |------|------|
//! | Separator | equals `---` |
//! | Heading1 | starts with `# ` |
//! | Heading2 | starts with `## ` |
//! | Logbook | `<day> <month> <h:mm> <AM\|PM>` |
//! | Todo | starts with `- ` |
//! | Blank | empty |
//! | Text | anything else |

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Glyph marking a todo item as completed
pub const COMPLETION_GLYPH: char = '✓';

/// Leading marker of a todo item
pub const TODO_MARKER: &str = "- ";

/// Semantic kind of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Separator,
    Heading1,
    Heading2,
    Logbook,
    Todo,
    Blank,
    Text,
}

impl LineKind {
    /// Returns true if this kind ends a logbook section
    pub fn is_section_boundary(&self) -> bool {
        matches!(
            self,
            LineKind::Heading1 | LineKind::Heading2 | LineKind::Separator | LineKind::Logbook
        )
    }

    /// Returns a display label for the kind
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Separator => "separator",
            LineKind::Heading1 => "heading1",
            LineKind::Heading2 => "heading2",
            LineKind::Logbook => "logbook",
            LineKind::Todo => "todo",
            LineKind::Blank => "blank",
            LineKind::Text => "text",
        }
    }
}

fn logbook_pattern() -> &'static Regex {
    static RE_LOGBOOK: OnceLock<Regex> = OnceLock::new();
    RE_LOGBOOK.get_or_init(|| {
        Regex::new(r"^[0-9]{1,2}\s+[A-Za-z0-9_]+\s+[0-9]{1,2}:[0-9]{2}\s+(AM|PM)$")
            .expect("logbook pattern is valid")
    })
}

/// Returns true if the line is a logbook timestamp such as `5 March 9:15 AM`
pub fn is_logbook_timestamp(line: &str) -> bool {
    logbook_pattern().is_match(line.trim())
}

/// Classifies a line
pub fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();

    if trimmed == "---" {
        LineKind::Separator
    } else if trimmed.starts_with("# ") {
        LineKind::Heading1
    } else if trimmed.starts_with("## ") {
        LineKind::Heading2
    } else if logbook_pattern().is_match(trimmed) {
        LineKind::Logbook
    } else if trimmed.starts_with(TODO_MARKER) {
        LineKind::Todo
    } else if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Text
    }
}

/// Byte offset just past the todo marker, if the line is a todo item
fn marker_end(line: &str) -> Option<usize> {
    if classify(line) != LineKind::Todo {
        return None;
    }
    let indent = line.len() - line.trim_start().len();
    Some(indent + TODO_MARKER.len())
}

/// Returns true if the line is a todo item carrying the completion glyph
pub fn is_completed(line: &str) -> bool {
    marker_end(line)
        .map(|end| line[end..].starts_with(COMPLETION_GLYPH))
        .unwrap_or(false)
}

/// Marks a todo item as completed (`- x` becomes `- ✓ x`)
///
/// Lines that are not todo items, or are already completed, are returned as-is.
pub fn mark_completed(line: &str) -> String {
    match marker_end(line) {
        Some(end) if !line[end..].starts_with(COMPLETION_GLYPH) => {
            format!("{}{} {}", &line[..end], COMPLETION_GLYPH, &line[end..])
        }
        _ => line.to_string(),
    }
}

/// Removes the completion glyph (and the space after it) from a todo item
pub fn unmark_completed(line: &str) -> String {
    match marker_end(line) {
        Some(end) if line[end..].starts_with(COMPLETION_GLYPH) => {
            let rest = &line[end + COMPLETION_GLYPH.len_utf8()..];
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            format!("{}{}", &line[..end], rest)
        }
        _ => line.to_string(),
    }
}

/// Text of a todo item without indentation, marker or completion glyph
pub fn todo_text(line: &str) -> &str {
    let Some(end) = marker_end(line) else {
        return line.trim();
    };
    let rest = &line[end..];
    match rest.strip_prefix(COMPLETION_GLYPH) {
        Some(stripped) => stripped.trim_start(),
        None => rest,
    }
}
