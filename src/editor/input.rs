//! Host input events
//!
//! Hosts translate their native events into these before handing them to an
//! [`EditorSession`](super::EditorSession). Pointer events address lines by
//! their index in the document; `None` means the pointer is not over a line.

use crate::domain::{Point, TriggerKey};

/// Keys the editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Escape,
}

/// A key press with its modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub alt: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            alt: false,
            shift: false,
        }
    }

    pub fn alt(key: Key) -> Self {
        Self {
            key,
            alt: true,
            shift: false,
        }
    }

    pub fn alt_shift(key: Key) -> Self {
        Self {
            key,
            alt: true,
            shift: true,
        }
    }

    /// Inline command trigger carried by this key, if any
    pub fn trigger(&self) -> Option<TriggerKey> {
        match self.key {
            Key::Enter => Some(TriggerKey::Enter),
            Key::Char(' ') => Some(TriggerKey::Space),
            _ => None,
        }
    }
}

/// Everything a host can send to the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyPress),
    PointerDown { line: Option<usize>, point: Point },
    PointerMove { line: Option<usize>, point: Point },
    PointerUp { line: Option<usize>, point: Point },
    /// Abort whatever gesture is in progress
    Cancel,
}

impl From<KeyPress> for InputEvent {
    fn from(press: KeyPress) -> Self {
        InputEvent::Key(press)
    }
}
