//! Preview projection
//!
//! Maps the classified line sequence onto display fragments. Every fragment
//! that a pointer can interact with carries its source line index.

use serde::Serialize;

use super::line::{classify, is_completed, todo_text, LineKind};
use super::sections::logbook_sections;

/// A single display fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fragment {
    Heading1 {
        text: String,
    },
    Heading2 {
        text: String,
    },
    Separator,
    /// Logbook timestamp; a drop target for todo items
    Logbook {
        index: usize,
        text: String,
    },
    Todo {
        index: usize,
        text: String,
        completed: bool,
        in_logbook: bool,
    },
    Text {
        text: String,
    },
}

impl Fragment {
    /// Source line index for interactive fragments
    pub fn index(&self) -> Option<usize> {
        match self {
            Fragment::Logbook { index, .. } | Fragment::Todo { index, .. } => Some(*index),
            _ => None,
        }
    }
}

/// Projects lines into fragments; blank lines produce nothing
pub fn render(lines: &[String]) -> Vec<Fragment> {
    let sections = logbook_sections(lines);
    let in_logbook = |index: usize| sections.iter().any(|s| s.contains(&index));

    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim_start();
            let fragment = match classify(line) {
                LineKind::Blank => return None,
                LineKind::Separator => Fragment::Separator,
                LineKind::Heading1 => Fragment::Heading1 {
                    text: trimmed[2..].to_string(),
                },
                LineKind::Heading2 => Fragment::Heading2 {
                    text: trimmed[3..].to_string(),
                },
                LineKind::Logbook => Fragment::Logbook {
                    index,
                    text: line.trim().to_string(),
                },
                LineKind::Todo => Fragment::Todo {
                    index,
                    text: todo_text(line).to_string(),
                    completed: is_completed(line),
                    in_logbook: in_logbook(index),
                },
                LineKind::Text => Fragment::Text { text: line.clone() },
            };
            Some(fragment)
        })
        .collect()
}
