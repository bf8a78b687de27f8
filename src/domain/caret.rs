//! Caret positions
//!
//! A caret is addressed either as a `(line, column)` pair or as an absolute
//! character offset into the joined document text. Columns and offsets count
//! characters, not bytes.

use serde::{Deserialize, Serialize};

/// Caret position as line index and character column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Caret {
    pub line: usize,
    pub column: usize,
}

impl Caret {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolves an absolute character offset against the lines
    ///
    /// Offsets past the end land on the end of the last line.
    pub fn from_offset(lines: &[String], offset: usize) -> Self {
        let mut remaining = offset;
        for (line, text) in lines.iter().enumerate() {
            let len = text.chars().count();
            if remaining <= len {
                return Self::new(line, remaining);
            }
            remaining -= len + 1;
        }
        let last = lines.len().saturating_sub(1);
        Self::new(last, lines.last().map(|l| l.chars().count()).unwrap_or(0))
    }

    /// Absolute character offset of this caret
    pub fn to_offset(self, lines: &[String]) -> usize {
        let before: usize = lines
            .iter()
            .take(self.line)
            .map(|l| l.chars().count() + 1)
            .sum();
        before + self.column
    }

    /// Clamps the caret into the document bounds
    pub fn clamp(self, lines: &[String]) -> Self {
        if lines.is_empty() {
            return Self::default();
        }
        let line = self.line.min(lines.len() - 1);
        let column = self.column.min(lines[line].chars().count());
        Self::new(line, column)
    }
}

/// Byte index of a character column within a line
pub fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
