//! logbook - Markdown todo lists with a built-in logbook
//!
//! A document is plain markdown edited line by line. Completing a todo item
//! stamps it and files it under the most recent logbook timestamp, so the
//! document keeps a running record of what got done and when.
//!
//! - [`domain`] holds the pure line engines (classification, completion,
//!   reordering, inline commands, drag sessions, pages).
//! - [`editor`] maps host input events onto those engines.
//! - [`storage`] persists documents, pages and configuration.
//! - [`cli`] is the `logbook` command line and terminal editor.

pub mod cli;
pub mod domain;
pub mod editor;
pub mod storage;

pub use domain::{Document, LineKind, PageId};
pub use editor::{EditOutcome, EditorSession, InputEvent, Mode};
pub use storage::{KeyValueStore, PageStore, Workspace};
