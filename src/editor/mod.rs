//! Editor session
//!
//! Host-agnostic controller that owns the active document, the caret, the
//! display mode, the preview selection and the drag session. Hosts feed it
//! [`InputEvent`]s and apply the returned [`EditOutcome`]:
//!
//! - `changed`: the document content changed and should be redrawn and saved
//! - `caret`: where the caret belongs, computed after the mutation
//! - `suppress_default`: an engine consumed the keystroke, so its ordinary
//!   effect (newline, space, text selection) must not happen
//!
//! Edit mode handles typing, line moves and inline commands. Preview mode
//! handles selection, completion toggles and drag-and-drop.

mod input;
mod text;

pub use input::{InputEvent, Key, KeyPress};

use serde::Serialize;
use tracing::debug;

use crate::domain::{
    classify, drop_position, expand_command, move_line, toggle_completion, Caret, Clock, Direction,
    Document, DragEnd, DragSession, DropTarget, LineKind, Point,
};

/// Which view of the document is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Edit,
    Preview,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Edit => Mode::Preview,
            Mode::Preview => Mode::Edit,
        }
    }
}

/// What an input event did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
    pub changed: bool,
    pub caret: Option<Caret>,
    pub suppress_default: bool,
}

impl EditOutcome {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            suppress_default: true,
            ..Self::default()
        }
    }

    fn edited(caret: Caret) -> Self {
        Self {
            changed: true,
            caret: Some(caret),
            suppress_default: false,
        }
    }
}

pub struct EditorSession<C: Clock> {
    document: Document,
    caret: Caret,
    mode: Mode,
    selected: Option<usize>,
    drag: DragSession,
    clock: C,
}

impl<C: Clock> EditorSession<C> {
    pub fn new(document: Document, clock: C) -> Self {
        let mut session = Self {
            document,
            caret: Caret::default(),
            mode: Mode::Edit,
            selected: None,
            drag: DragSession::Idle,
            clock,
        };
        session.selected = session.first_todo();
        session
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lines(&self) -> &[String] {
        self.document.lines()
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Selected line in preview mode
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replaces the document, e.g. after switching pages
    ///
    /// Any drag in progress is cancelled and the caret goes to the top.
    pub fn load(&mut self, document: Document) {
        self.document = document;
        self.caret = Caret::default();
        self.drag.cancel();
        self.selected = self.first_todo();
    }

    /// Switches between edit and preview mode
    pub fn toggle_mode(&mut self) -> Mode {
        self.drag.cancel();
        self.mode = self.mode.toggled();
        self.caret = self.caret.clamp(self.document.lines());
        if self.selected.is_none() {
            self.selected = self.first_todo();
        }
        debug!(mode = ?self.mode, "switched mode");
        self.mode
    }

    /// Toggles completion of the line at `index`
    pub fn toggle(&mut self, index: usize) -> EditOutcome {
        let before = self.document.lines();
        let next = toggle_completion(before, index, &self.clock);
        if next.as_slice() == before {
            return EditOutcome::ignored();
        }
        self.commit(next);
        self.selected = self.nearest_todo(index);
        EditOutcome {
            changed: true,
            caret: Some(self.caret),
            suppress_default: true,
        }
    }

    /// Moves the line at `line` one step, carrying the caret with it
    pub fn move_line(&mut self, line: usize, direction: Direction) -> EditOutcome {
        let caret = if line == self.caret.line {
            self.caret
        } else {
            Caret::new(line, 0)
        };
        let result = move_line(self.document.lines(), caret, direction);
        if !result.moved(&caret) {
            return EditOutcome::consumed();
        }

        // The moved line and its swap partner trade places.
        let partner = result.caret.line;
        self.commit(result.lines);
        if self.selected == Some(line) {
            self.selected = Some(partner);
        }
        if line == self.caret.line {
            self.caret = result.caret;
        } else if self.caret.line == partner {
            self.caret.line = line;
        }
        EditOutcome {
            changed: true,
            caret: Some(self.caret),
            suppress_default: true,
        }
    }

    /// Feeds one input event through the session
    pub fn handle(&mut self, event: InputEvent) -> EditOutcome {
        match event {
            InputEvent::Key(press) if press.alt && press.shift => match press.key {
                Key::Up | Key::Down => {
                    self.toggle_mode();
                    EditOutcome::consumed()
                }
                _ => EditOutcome::ignored(),
            },
            InputEvent::Key(press) => match self.mode {
                Mode::Edit => self.handle_edit_key(press),
                Mode::Preview => self.handle_preview_key(press),
            },
            InputEvent::PointerDown { line, point } => self.pointer_down(line, point),
            InputEvent::PointerMove { line, point } => {
                if self.drag.is_active() {
                    self.drag.hover(self.document.lines(), line, point);
                    EditOutcome::consumed()
                } else {
                    EditOutcome::ignored()
                }
            }
            InputEvent::PointerUp { line, .. } => self.pointer_up(line),
            InputEvent::Cancel => {
                let was_active = self.drag.is_active();
                self.drag.cancel();
                EditOutcome {
                    suppress_default: was_active,
                    ..EditOutcome::default()
                }
            }
        }
    }

    fn handle_edit_key(&mut self, press: KeyPress) -> EditOutcome {
        self.caret = self.caret.clamp(self.document.lines());

        if press.alt {
            return match press.key {
                Key::Up => self.move_line(self.caret.line, Direction::Up),
                Key::Down => self.move_line(self.caret.line, Direction::Down),
                _ => EditOutcome::ignored(),
            };
        }

        if let Some(trigger) = press.trigger() {
            let line = self.document.line(self.caret.line).unwrap_or_default();
            if let Some(expansion) = expand_command(line, self.caret.column, trigger, &self.clock)
            {
                let mut lines = self.document.lines().to_vec();
                match lines.get_mut(self.caret.line) {
                    Some(slot) => *slot = expansion.text,
                    None => lines.push(expansion.text),
                }
                self.commit(lines);
                self.caret = Caret::new(self.caret.line, expansion.caret);
                return EditOutcome {
                    changed: true,
                    caret: Some(self.caret),
                    suppress_default: true,
                };
            }
        }

        let mut lines = self.document.lines().to_vec();
        let caret = match press.key {
            Key::Char(c) => text::insert_char(&mut lines, self.caret, c),
            Key::Enter => text::split_line(&mut lines, self.caret),
            Key::Backspace => match text::backspace(&mut lines, self.caret) {
                Some(caret) => caret,
                None => return EditOutcome::ignored(),
            },
            Key::Escape => return EditOutcome::ignored(),
            navigation => {
                self.caret = text::navigate(&lines, self.caret, navigation);
                return EditOutcome {
                    caret: Some(self.caret),
                    ..EditOutcome::default()
                };
            }
        };

        self.commit(lines);
        self.caret = caret;
        EditOutcome::edited(caret)
    }

    fn handle_preview_key(&mut self, press: KeyPress) -> EditOutcome {
        match (press.key, press.alt) {
            (Key::Up, true) | (Key::Down, true) => match self.selected {
                Some(line) => {
                    let direction = if press.key == Key::Up {
                        Direction::Up
                    } else {
                        Direction::Down
                    };
                    self.move_line(line, direction)
                }
                None => EditOutcome::ignored(),
            },
            (Key::Up, false) => {
                self.selected = self.step_selection(Direction::Up);
                EditOutcome::consumed()
            }
            (Key::Down, false) => {
                self.selected = self.step_selection(Direction::Down);
                EditOutcome::consumed()
            }
            (Key::Enter, _) | (Key::Char('x'), _) => match self.selected {
                Some(line) => self.toggle(line),
                None => EditOutcome::ignored(),
            },
            (Key::Escape, _) => self.handle(InputEvent::Cancel),
            _ => EditOutcome::ignored(),
        }
    }

    fn pointer_down(&mut self, line: Option<usize>, point: Point) -> EditOutcome {
        if self.mode != Mode::Preview {
            return EditOutcome::ignored();
        }
        let Some(index) = line else {
            self.drag.cancel();
            return EditOutcome::ignored();
        };

        if self.drag.press(self.document.lines(), index, point) {
            self.selected = Some(index);
            EditOutcome::consumed()
        } else {
            EditOutcome::ignored()
        }
    }

    fn pointer_up(&mut self, line: Option<usize>) -> EditOutcome {
        let source = self.drag.source();
        match self.drag.release(self.document.lines(), line) {
            DragEnd::Dropped { target, lines } => {
                self.commit(lines);
                self.selected = match (source, target) {
                    (Some(source), DropTarget::Item(index)) => Some(drop_position(source, index)),
                    _ => None,
                };
                EditOutcome {
                    changed: true,
                    caret: None,
                    suppress_default: true,
                }
            }
            DragEnd::Cancelled => EditOutcome {
                suppress_default: source.is_some(),
                ..EditOutcome::default()
            },
        }
    }

    fn commit(&mut self, lines: Vec<String>) {
        self.document.set_lines(lines);
        self.caret = self.caret.clamp(self.document.lines());
    }

    fn is_todo(&self, index: usize) -> bool {
        self.document.kind(index) == Some(LineKind::Todo)
    }

    fn first_todo(&self) -> Option<usize> {
        (0..self.document.line_count()).find(|&i| self.is_todo(i))
    }

    /// Todo line at or after `index`, falling back to the last one before it
    fn nearest_todo(&self, index: usize) -> Option<usize> {
        let count = self.document.line_count();
        (index..count)
            .find(|&i| self.is_todo(i))
            .or_else(|| (0..index.min(count)).rev().find(|&i| self.is_todo(i)))
    }

    fn step_selection(&self, direction: Direction) -> Option<usize> {
        let lines = self.document.lines();
        let Some(current) = self.selected else {
            return self.first_todo();
        };
        let found = match direction {
            Direction::Up => (0..current).rev().find(|&i| classify(&lines[i]) == LineKind::Todo),
            Direction::Down => {
                (current + 1..lines.len()).find(|&i| classify(&lines[i]) == LineKind::Todo)
            }
        };
        found.or(Some(current))
    }
}
