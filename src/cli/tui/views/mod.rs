//! Screen layout: page tabs, the document view and a status bar

pub mod editor;
pub mod preview;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::cli::tui::app::{App, InputMode};
use crate::cli::tui::utils::truncate_str;
use crate::editor::Mode;
use crate::storage::KeyValueStore;

/// Draw the whole screen
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Page tabs
            Constraint::Min(5),    // Document
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    draw_tabs(frame, app, chunks[0]);
    match app.session().mode() {
        Mode::Edit => editor::draw(frame, app, chunks[1]),
        Mode::Preview => preview::draw(frame, app, chunks[1]),
    }
    draw_status_bar(frame, app, chunks[2]);
}

fn draw_tabs<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let ids = app.page_ids();
    let selected = ids.iter().position(|id| id == app.active_page()).unwrap_or(0);
    let titles: Vec<String> = ids.iter().map(|id| truncate_str(&id.title(), 20)).collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().title("Pages").borders(Borders::ALL))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn draw_status_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = app.status_message().unwrap_or(match app.session().mode() {
                Mode::Edit => "Alt+Up/Down move line  Alt+Shift+Up/Down preview  ^S save  ^N new  ^D delete  ^Q quit",
                Mode::Preview => "Up/Down select  Enter/x toggle  drag to move  Esc cancel  Alt+Shift+Up/Down edit",
            });
            (msg.to_string(), Style::default())
        }
        InputMode::NewPage(name) => (
            format!("New page: {}_", name),
            Style::default().fg(Color::Green),
        ),
        InputMode::ConfirmDelete(id) => (
            format!("Delete page {}? [y/n]", id),
            Style::default().fg(Color::Yellow),
        ),
    };

    let mode = match app.session().mode() {
        Mode::Edit => "[EDIT]",
        Mode::Preview => "[PREVIEW]",
    };
    let dirty = if app.is_dirty() { "*" } else { "" };
    let status_text = format!("{} {}{} {}", mode, app.active_page(), dirty, content);

    let paragraph = Paragraph::new(status_text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
