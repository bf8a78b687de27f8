//! Document model
//!
//! A document is an ordered sequence of lines. The sequence is the only source
//! of truth: no parsed structure survives between edits, and every engine
//! installs a complete new sequence through [`Document::set_lines`].

use serde::{Deserialize, Serialize};

use super::line::{classify, LineKind};

/// An ordered, index-addressed sequence of lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Creates a document from lines
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Splits raw text on `\n`; empty text yields a single empty line
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Joins the lines back into raw text
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the lines
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Replaces every line at once
    ///
    /// No validation is performed: callers must not pass lines containing `\n`.
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    /// Returns the number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns a single line
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Classifies a single line
    pub fn kind(&self, index: usize) -> Option<LineKind> {
        self.line(index).map(classify)
    }
}

impl From<Vec<String>> for Document {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}
