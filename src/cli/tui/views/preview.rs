//! Preview view: rendered fragments, selection and drag feedback
//!
//! Each fragment takes exactly one row so that screen rows map straight back
//! to fragments for mouse hit tests.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::cli::tui::app::App;
use crate::domain::{render, DropTarget, Fragment};
use crate::storage::KeyValueStore;

pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let session = app.session();
    let fragments = render(session.lines());
    let drag = session.drag();

    let title = match drag.source() {
        Some(source) => format!("Preview (dragging line {})", source + 1),
        None => "Preview".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);

    let height = inner.height.max(1) as usize;
    let selected_row = session
        .selected()
        .and_then(|line| fragments.iter().position(|f| f.index() == Some(line)));
    let scroll = selected_row.map(|row| row.saturating_sub(height - 1)).unwrap_or(0);
    app.set_viewport(inner, scroll);

    let target_line = drag.target().map(|target| match target {
        DropTarget::Item(index) | DropTarget::Logbook(index) => index,
    });

    let lines: Vec<Line> = fragments
        .iter()
        .skip(scroll)
        .take(height)
        .map(|fragment| {
            let mut line = fragment_line(fragment);
            let index = fragment.index();
            if index.is_some() && index == drag.source() {
                line = line.style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC));
            } else if index.is_some() && index == target_line {
                line = line.style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::UNDERLINED),
                );
            } else if index.is_some() && index == session.selected() {
                line = line.style(Style::default().bg(Color::DarkGray));
            }
            line
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn fragment_line(fragment: &Fragment) -> Line<'static> {
    match fragment {
        Fragment::Heading1 { text } => Line::styled(
            text.to_uppercase(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Fragment::Heading2 { text } => Line::styled(
            text.clone(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Fragment::Separator => Line::styled("─".repeat(40), Style::default().fg(Color::DarkGray)),
        Fragment::Logbook { text, .. } => Line::from(vec![
            Span::styled("◷ ", Style::default().fg(Color::Yellow)),
            Span::styled(text.clone(), Style::default().fg(Color::Yellow)),
        ]),
        Fragment::Todo {
            text,
            completed,
            in_logbook,
            ..
        } => {
            let indent = if *in_logbook { "  " } else { "" };
            if *completed {
                Line::from(vec![
                    Span::raw(indent),
                    Span::styled("[x] ", Style::default().fg(Color::Green)),
                    Span::styled(
                        text.clone(),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                ])
            } else {
                Line::from(vec![Span::raw(indent), Span::raw("[ ] "), Span::raw(text.clone())])
            }
        }
        Fragment::Text { text } => Line::raw(text.clone()),
    }
}
