//! Shared utilities for TUI views

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{is_completed, LineKind};

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// Converts a line or column count to a terminal coordinate, saturating
pub fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Style for a raw line in either view
pub fn line_style(kind: LineKind, line: &str) -> Style {
    match kind {
        LineKind::Heading1 => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        LineKind::Heading2 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        LineKind::Logbook => Style::default().fg(Color::Yellow),
        LineKind::Separator => Style::default().fg(Color::DarkGray),
        LineKind::Todo if is_completed(line) => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_saturate_instead_of_wrapping() {
        assert_eq!(saturating_u16(42), 42);
        assert_eq!(saturating_u16(65_535), u16::MAX);
        assert_eq!(saturating_u16(70_000), u16::MAX);
    }

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate_str("work", 10), "work");
    }

    #[test]
    fn truncate_long_page_name() {
        assert_eq!(truncate_str("side-projects", 8), "side-...");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("✓✓✓✓", 4), "✓✓✓✓");
    }

    #[test]
    fn completed_todos_are_dimmed() {
        assert_eq!(
            line_style(LineKind::Todo, "- ✓ done").fg,
            Some(Color::DarkGray)
        );
        assert_eq!(line_style(LineKind::Todo, "- open").fg, None);
    }
}
