//! Domain models for logbook
//!
//! The document mutation engine. Everything here is pure: functions take a
//! line sequence and return a new one, with no I/O.

mod caret;
mod command;
mod completion;
mod document;
mod drag;
mod line;
mod page;
mod render;
mod reorder;
mod sections;
mod timestamp;

pub use caret::{byte_index, Caret};
pub use command::{expand_command, Expansion, InlineCommand, TriggerKey};
pub use completion::toggle_completion;
pub use document::Document;
pub use drag::{apply_drop, hit_test, DragEnd, DragSession, DropTarget, Point};
pub use line::{
    classify, is_completed, is_logbook_timestamp, mark_completed, todo_text, unmark_completed,
    LineKind, COMPLETION_GLYPH,
};
pub use page::{page_template, PageId, PageIdError, MAIN_PAGE};
pub use render::{render, Fragment};
pub use reorder::{
    complete_drop, complete_logbook_drop, drop_position, move_line, Direction, LineMove,
};
pub use sections::{latest_logbook, logbook_block_end, logbook_sections};
pub use timestamp::{format_timestamp, Clock, FixedClock, SystemClock};
