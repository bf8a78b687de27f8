//! Plain text editing on a line buffer
//!
//! The ordinary effects of keystrokes, used whenever no engine claims the key.
//! Every function takes a caret that is already clamped to the buffer.

use crate::domain::{byte_index, Caret};

use super::input::Key;

fn ensure_line(lines: &mut Vec<String>) {
    if lines.is_empty() {
        lines.push(String::new());
    }
}

/// Inserts a character at the caret
pub fn insert_char(lines: &mut Vec<String>, caret: Caret, c: char) -> Caret {
    ensure_line(lines);
    let line = &mut lines[caret.line];
    let at = byte_index(line, caret.column);
    line.insert(at, c);
    Caret::new(caret.line, caret.column + 1)
}

/// Splits the line at the caret; the caret moves to the start of the new line
pub fn split_line(lines: &mut Vec<String>, caret: Caret) -> Caret {
    ensure_line(lines);
    let line = &mut lines[caret.line];
    let at = byte_index(line, caret.column);
    let rest = line.split_off(at);
    lines.insert(caret.line + 1, rest);
    Caret::new(caret.line + 1, 0)
}

/// Deletes the character before the caret, joining lines at column zero
///
/// Returns `None` at the very start of the buffer.
pub fn backspace(lines: &mut Vec<String>, caret: Caret) -> Option<Caret> {
    if lines.is_empty() {
        return None;
    }
    if caret.column > 0 {
        let line = &mut lines[caret.line];
        let at = byte_index(line, caret.column - 1);
        line.remove(at);
        return Some(Caret::new(caret.line, caret.column - 1));
    }
    if caret.line == 0 {
        return None;
    }

    let tail = lines.remove(caret.line);
    let previous = &mut lines[caret.line - 1];
    let column = previous.chars().count();
    previous.push_str(&tail);
    Some(Caret::new(caret.line - 1, column))
}

/// Caret after a navigation key; other keys leave it in place
pub fn navigate(lines: &[String], caret: Caret, key: Key) -> Caret {
    let len = |line: usize| lines.get(line).map(|l| l.chars().count()).unwrap_or(0);
    let last = lines.len().saturating_sub(1);

    match key {
        Key::Left if caret.column > 0 => Caret::new(caret.line, caret.column - 1),
        Key::Left if caret.line > 0 => Caret::new(caret.line - 1, len(caret.line - 1)),
        Key::Right if caret.column < len(caret.line) => Caret::new(caret.line, caret.column + 1),
        Key::Right if caret.line < last => Caret::new(caret.line + 1, 0),
        Key::Up if caret.line > 0 => Caret::new(caret.line - 1, caret.column).clamp(lines),
        Key::Down if caret.line < last => Caret::new(caret.line + 1, caret.column).clamp(lines),
        Key::Home => Caret::new(caret.line, 0),
        Key::End => Caret::new(caret.line, len(caret.line)),
        _ => caret,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn insert_handles_multibyte_columns() {
        let mut lines = doc(&["- ✓ ab"]);
        let caret = insert_char(&mut lines, Caret::new(0, 5), 'X');
        assert_eq!(lines, doc(&["- ✓ aXb"]));
        assert_eq!(caret, Caret::new(0, 6));
    }

    #[test]
    fn insert_into_empty_buffer() {
        let mut lines = Vec::new();
        insert_char(&mut lines, Caret::default(), 'a');
        assert_eq!(lines, doc(&["a"]));
    }

    #[test]
    fn split_moves_tail_down() {
        let mut lines = doc(&["- buy milk", "next"]);
        let caret = split_line(&mut lines, Caret::new(0, 6));
        assert_eq!(lines, doc(&["- buy ", "milk", "next"]));
        assert_eq!(caret, Caret::new(1, 0));
    }

    #[test]
    fn backspace_within_line() {
        let mut lines = doc(&["- ✓ a"]);
        let caret = backspace(&mut lines, Caret::new(0, 3));
        assert_eq!(lines, doc(&["-  a"]));
        assert_eq!(caret, Some(Caret::new(0, 2)));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut lines = doc(&["ab", "cd"]);
        let caret = backspace(&mut lines, Caret::new(1, 0));
        assert_eq!(lines, doc(&["abcd"]));
        assert_eq!(caret, Some(Caret::new(0, 2)));
    }

    #[test]
    fn backspace_at_start_does_nothing() {
        let mut lines = doc(&["ab"]);
        assert_eq!(backspace(&mut lines, Caret::default()), None);
        assert_eq!(lines, doc(&["ab"]));
    }

    #[test]
    fn navigation_wraps_and_clamps() {
        let lines = doc(&["abc", "d"]);
        assert_eq!(navigate(&lines, Caret::new(1, 0), Key::Left), Caret::new(0, 3));
        assert_eq!(navigate(&lines, Caret::new(0, 3), Key::Right), Caret::new(1, 0));
        assert_eq!(navigate(&lines, Caret::new(0, 3), Key::Down), Caret::new(1, 1));
        assert_eq!(navigate(&lines, Caret::new(0, 1), Key::Up), Caret::new(0, 1));
        assert_eq!(navigate(&lines, Caret::new(1, 1), Key::Right), Caret::new(1, 1));
        assert_eq!(navigate(&lines, Caret::new(0, 2), Key::Home), Caret::new(0, 0));
        assert_eq!(navigate(&lines, Caret::new(0, 0), Key::End), Caret::new(0, 3));
    }
}
