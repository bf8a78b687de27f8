//! Interactive terminal editor
//!
//! Edits one page at a time in either the raw edit view or the rendered
//! preview, using ratatui over crossterm. Keyboard and mouse input is mapped
//! onto an [`EditorSession`](crate::editor::EditorSession).

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::doc_cmd::open_page;
use super::logging;
use super::Output;
use crate::editor::Mode;
use crate::storage::Workspace;
use app::App;
use event::EventHandler;

/// Launch the editor
pub fn run(workspace: &Workspace, output: &Output, page: Option<&str>, preview: bool) -> Result<()> {
    logging::init_file(&workspace.log_path())?;
    output.verbose_ctx("tui", &format!("Logging to {}", workspace.log_path().display()));

    let config = &workspace.config().editor;
    let mode = if preview || config.start_in_preview {
        Mode::Preview
    } else {
        Mode::Edit
    };

    // Load before touching the terminal so errors print normally
    let store = open_page(workspace, page)?;
    let mut app = App::new(store, mode, config.autosave_seconds);

    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(config.tick_rate_ms);

    // Restore the terminal even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Editor panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Editor panicked: {}", s))
            } else {
                Err(anyhow!("Editor panicked with unknown error"))
            }
        }
    }
}
