//! TUI application state and logic

use std::cell::Cell;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use tracing::{debug, warn};

use super::event::{key_press, Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::domain::{render, PageId, Point, SystemClock};
use crate::editor::{EditorSession, InputEvent, Mode};
use crate::storage::{KeyValueStore, PageStore};

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    NewPage(String),
    ConfirmDelete(PageId),
}

/// Application state
pub struct App<S: KeyValueStore> {
    /// Pages and persistence
    store: PageStore<S>,

    /// Editing state for the active page
    session: EditorSession<SystemClock>,

    input_mode: InputMode,

    status_message: Option<String>,

    /// Unsaved edits since the last save
    dirty: bool,

    autosave: Option<Duration>,
    last_save: Instant,

    should_quit: bool,

    /// Document area and first visible row from the last draw, for mouse hit tests
    viewport: Cell<(Rect, usize)>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: PageStore<S>, mode: Mode, autosave_seconds: u64) -> Self {
        let session = EditorSession::new(store.document().clone(), SystemClock).with_mode(mode);
        Self {
            store,
            session,
            input_mode: InputMode::Normal,
            status_message: None,
            dirty: false,
            autosave: (autosave_seconds > 0).then(|| Duration::from_secs(autosave_seconds)),
            last_save: Instant::now(),
            should_quit: false,
            viewport: Cell::new((Rect::default(), 0)),
        }
    }

    /// Run the main loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(_, _) => {}
                Event::Tick => self.tick(),
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        views::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            self.save();
            self.should_quit = true;
            return;
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::NewPage(_) => self.handle_new_page_key(key),
            InputMode::ConfirmDelete(_) => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => {
                    self.save();
                    if self.status_message.is_none() {
                        self.status_message = Some(format!("Saved {}", self.store.active()));
                    }
                }
                KeyCode::Char('n') => self.input_mode = InputMode::NewPage(String::new()),
                KeyCode::Char('d') => {
                    let active = self.store.active().clone();
                    if active.is_main() {
                        self.status_message = Some("The main page cannot be deleted".to_string());
                    } else {
                        self.input_mode = InputMode::ConfirmDelete(active);
                    }
                }
                KeyCode::Left => self.cycle_page(-1),
                KeyCode::Right => self.cycle_page(1),
                _ => {}
            }
            return;
        }

        let Some(press) = key_press(&key) else {
            return;
        };
        self.status_message = None;
        let outcome = self.session.handle(InputEvent::Key(press));
        if outcome.changed {
            self.dirty = true;
        }
    }

    fn handle_new_page_key(&mut self, key: KeyEvent) {
        let InputMode::NewPage(name) = &self.input_mode else {
            return;
        };
        let mut name = name.clone();

        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.create_page(&name);
            }
            KeyCode::Backspace => {
                name.pop();
                self.input_mode = InputMode::NewPage(name);
            }
            KeyCode::Char(c) => {
                name.push(c);
                self.input_mode = InputMode::NewPage(name);
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::ConfirmDelete(id) = std::mem::take(&mut self.input_mode) {
                    self.delete_page(&id);
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }
    }

    /// Handle mouse events; only the left button drives drag-and-drop
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.input_mode != InputMode::Normal {
            return;
        }

        let line = self.line_at(mouse.column, mouse.row);
        let point = Point::new(mouse.column, mouse.row);
        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => InputEvent::PointerDown { line, point },
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                InputEvent::PointerMove { line, point }
            }
            MouseEventKind::Up(MouseButton::Left) => InputEvent::PointerUp { line, point },
            _ => return,
        };

        if self.session.handle(event).changed {
            self.dirty = true;
        }
    }

    /// Periodic work: autosave
    pub fn tick(&mut self) {
        let Some(interval) = self.autosave else {
            return;
        };
        if self.dirty && self.last_save.elapsed() >= interval {
            debug!("autosaving");
            self.save();
        }
    }

    /// Writes the active page; failures are shown and the edits stay in memory
    fn save(&mut self) {
        self.store.set_lines(self.session.lines().to_vec());
        match self.store.save() {
            Ok(()) => {
                self.dirty = false;
                self.last_save = Instant::now();
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.status_message = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn open_page(&mut self, id: &PageId) {
        self.store.set_lines(self.session.lines().to_vec());
        if let Err(e) = self.store.switch_to(id) {
            warn!(error = %e, page = %id, "failed to save outgoing page");
            self.status_message = Some(format!("Save failed: {}", e));
        } else {
            self.dirty = false;
        }
        self.session.load(self.store.document().clone());
    }

    fn cycle_page(&mut self, step: isize) {
        let ids = self.store.page_ids();
        let current = ids
            .iter()
            .position(|id| id == self.store.active())
            .unwrap_or(0);
        let next = (current as isize + step).rem_euclid(ids.len() as isize) as usize;
        if next != current {
            self.open_page(&ids[next]);
        }
    }

    fn create_page(&mut self, name: &str) {
        self.store.set_lines(self.session.lines().to_vec());
        match self.store.create(name) {
            Ok(id) => {
                self.session.load(self.store.document().clone());
                self.dirty = false;
                self.status_message = Some(format!("Created page {}", id));
            }
            Err(e) => {
                // Storage errors arrive after the switch; resync either way
                self.session.load(self.store.document().clone());
                self.status_message = Some(e.to_string());
            }
        }
    }

    fn delete_page(&mut self, id: &PageId) {
        match self.store.delete(id) {
            Ok(_) => self.status_message = Some(format!("Deleted page {}", id)),
            Err(e) => self.status_message = Some(e.to_string()),
        }
        self.session.load(self.store.document().clone());
        self.dirty = false;
    }

    /// Document line under a screen position in preview mode
    pub fn line_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.session.mode() != Mode::Preview {
            return None;
        }
        let (area, scroll) = self.viewport.get();
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }

        let row = (row - area.y) as usize + scroll;
        render(self.session.lines()).get(row)?.index()
    }

    /// Records where the document was drawn
    pub fn set_viewport(&self, area: Rect, scroll: usize) {
        self.viewport.set((area, scroll));
    }

    pub fn session(&self) -> &EditorSession<SystemClock> {
        &self.session
    }

    pub fn page_ids(&self) -> Vec<PageId> {
        self.store.page_ids()
    }

    pub fn active_page(&self) -> &PageId {
        self.store.active()
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, MAIN_KEY};

    fn app(text: &str, mode: Mode) -> App<MemoryStore> {
        let mut storage = MemoryStore::new();
        storage.set(MAIN_KEY, text).unwrap();
        App::new(PageStore::open(storage).unwrap(), mode, 5)
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::CONTROL));
    }

    fn type_str(app: &mut App<MemoryStore>, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn saved_main(app: &App<MemoryStore>) -> Option<String> {
        app.store.storage().get(MAIN_KEY).unwrap()
    }

    fn mouse(app: &mut App<MemoryStore>, kind: MouseEventKind, row: u16) {
        app.handle_mouse(MouseEvent {
            kind,
            column: 2,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn typing_marks_dirty_and_ctrl_s_saves() {
        let mut app = app("# T", Mode::Edit);
        press(&mut app, KeyCode::End);
        type_str(&mut app, "!");
        assert!(app.is_dirty());

        ctrl(&mut app, KeyCode::Char('s'));
        assert!(!app.is_dirty());
        assert_eq!(saved_main(&app).as_deref(), Some("# T!"));
        assert_eq!(app.status_message(), Some("Saved main"));
    }

    #[test]
    fn quit_saves_first() {
        let mut app = app("# T", Mode::Edit);
        type_str(&mut app, "x");
        ctrl(&mut app, KeyCode::Char('q'));

        assert!(app.should_quit());
        assert_eq!(saved_main(&app).as_deref(), Some("x# T"));
    }

    #[test]
    fn new_page_flow() {
        let mut app = app("# T", Mode::Edit);
        ctrl(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "Work Notes");
        assert_eq!(app.input_mode(), &InputMode::NewPage("Work Notes".to_string()));

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(app.active_page().as_str(), "work-notes");
        assert_eq!(
            app.session().document().to_text(),
            "# Work Notes\n\n- Start adding your todos here..."
        );
    }

    #[test]
    fn new_page_rejection_is_reported() {
        let mut app = app("# T", Mode::Edit);
        ctrl(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "main");
        press(&mut app, KeyCode::Enter);

        assert!(app.active_page().is_main());
        assert!(app.status_message().is_some());
    }

    #[test]
    fn cannot_delete_main() {
        let mut app = app("# T", Mode::Edit);
        ctrl(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode(), &InputMode::Normal);
        assert_eq!(app.status_message(), Some("The main page cannot be deleted"));
    }

    #[test]
    fn delete_page_after_confirmation() {
        let mut app = app("# T", Mode::Edit);
        ctrl(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "scratch");
        press(&mut app, KeyCode::Enter);

        ctrl(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.input_mode(), InputMode::ConfirmDelete(_)));
        press(&mut app, KeyCode::Char('y'));

        assert!(app.active_page().is_main());
        assert_eq!(app.page_ids(), vec![PageId::main()]);
        assert_eq!(app.session().document().to_text(), "# T");
    }

    #[test]
    fn ctrl_arrows_cycle_pages_keeping_edits() {
        let mut app = app("# T", Mode::Edit);
        ctrl(&mut app, KeyCode::Char('n'));
        type_str(&mut app, "b");
        press(&mut app, KeyCode::Enter);
        type_str(&mut app, "x");

        ctrl(&mut app, KeyCode::Right);
        assert!(app.active_page().is_main());
        ctrl(&mut app, KeyCode::Left);
        assert_eq!(app.active_page().as_str(), "b");
        assert!(app.session().document().to_text().starts_with("x# b"));
    }

    #[test]
    fn autosave_on_tick() {
        let mut app = app("# T", Mode::Edit);
        app.autosave = Some(Duration::ZERO);
        type_str(&mut app, "y");

        app.tick();
        assert!(!app.is_dirty());
        assert_eq!(saved_main(&app).as_deref(), Some("y# T"));
    }

    #[test]
    fn mouse_drag_reorders_in_preview() {
        let mut app = app("# T\n- a\n- b", Mode::Preview);
        app.set_viewport(Rect::new(0, 1, 40, 10), 0);
        assert_eq!(app.line_at(2, 3), Some(2));
        assert_eq!(app.line_at(2, 1), None);

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 3);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 2);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 2);

        assert!(app.is_dirty());
        assert_eq!(app.session().document().to_text(), "# T\n- b\n- a");
    }

    #[test]
    fn mouse_is_ignored_in_edit_mode() {
        let mut app = app("# T\n- a\n- b", Mode::Edit);
        app.set_viewport(Rect::new(0, 1, 40, 10), 0);
        assert_eq!(app.line_at(2, 3), None);
    }
}
