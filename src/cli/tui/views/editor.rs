//! Edit view: the raw markdown with a caret

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::{App, InputMode};
use crate::cli::tui::utils::{line_style, saturating_u16};
use crate::domain::classify;
use crate::storage::KeyValueStore;

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.session();
    let caret = session.caret();

    let block = Block::default()
        .title(format!("Edit {}:{}", caret.line + 1, caret.column + 1))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);

    // Keep the caret line on screen
    let height = inner.height.max(1) as usize;
    let scroll = caret.line.saturating_sub(height - 1);
    app.set_viewport(inner, scroll);

    let lines: Vec<Line> = session
        .lines()
        .iter()
        .map(|line| Line::styled(line.as_str(), line_style(classify(line), line)))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((saturating_u16(scroll), 0));
    frame.render_widget(paragraph, area);

    if *app.input_mode() == InputMode::Normal && inner.width > 0 {
        let column = saturating_u16(caret.column).min(inner.width - 1);
        let row = saturating_u16(caret.line - scroll);
        frame.set_cursor_position(Position::new(inner.x + column, inner.y + row));
    }
}
