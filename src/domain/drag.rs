//! Pointer drag sessions
//!
//! A drag session lives between pointer-down and pointer-up (or cancel). It is
//! a single value that is replaced wholesale on every transition, so there is
//! no way to observe a half-cancelled session.
//!
//! ```text
//! Idle --press on todo--> Dragging --hover--> Dragging
//!   ^                        |
//!   +------release/cancel----+
//! ```

use serde::Serialize;
use tracing::debug;

use super::line::{classify, LineKind};
use super::reorder::{complete_drop, complete_logbook_drop};

/// Pointer position in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Where a dragged line would land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum DropTarget {
    /// Before another todo item
    Item(usize),
    /// At the end of the logbook block starting at this timestamp line
    Logbook(usize),
}

/// Drag session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragSession {
    #[default]
    Idle,
    Dragging {
        source: usize,
        pointer: Point,
        target: Option<DropTarget>,
    },
}

/// How a drag session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEnd {
    /// A drop target was resolved; the new lines are attached
    Dropped {
        target: DropTarget,
        lines: Vec<String>,
    },
    /// Released without a target, cancelled, or nothing was being dragged
    Cancelled,
}

/// Resolves the drop target for a hovered line
///
/// Todo items other than the source become item targets, logbook timestamps
/// become logbook targets, anything else (or nothing) yields no target.
pub fn hit_test(lines: &[String], source: usize, hovered: Option<usize>) -> Option<DropTarget> {
    let index = hovered?;
    match classify(lines.get(index)?) {
        LineKind::Todo if index != source => Some(DropTarget::Item(index)),
        LineKind::Logbook => Some(DropTarget::Logbook(index)),
        _ => None,
    }
}

/// Applies a drop of `source` onto `target`
///
/// Logbook indices address the current lines; they are shifted here to account
/// for the source being removed first.
pub fn apply_drop(lines: &[String], source: usize, target: DropTarget) -> Vec<String> {
    match target {
        DropTarget::Item(index) => complete_drop(lines, source, Some(index)),
        DropTarget::Logbook(index) => {
            let adjusted = if index > source { index - 1 } else { index };
            complete_logbook_drop(lines, source, adjusted)
        }
    }
}

impl DragSession {
    /// Returns true while a drag is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, DragSession::Dragging { .. })
    }

    /// Source line of the active drag
    pub fn source(&self) -> Option<usize> {
        match self {
            DragSession::Dragging { source, .. } => Some(*source),
            DragSession::Idle => None,
        }
    }

    /// Candidate drop target of the active drag
    pub fn target(&self) -> Option<DropTarget> {
        match self {
            DragSession::Dragging { target, .. } => *target,
            DragSession::Idle => None,
        }
    }

    /// Pointer position of the active drag
    pub fn pointer(&self) -> Option<Point> {
        match self {
            DragSession::Dragging { pointer, .. } => Some(*pointer),
            DragSession::Idle => None,
        }
    }

    /// Pointer-down on a line: starts a drag if the line is a todo item
    ///
    /// Returns true if a drag started. Pressing while already dragging restarts
    /// the session from the new line.
    pub fn press(&mut self, lines: &[String], index: usize, pointer: Point) -> bool {
        let draggable = lines
            .get(index)
            .map(|line| classify(line) == LineKind::Todo)
            .unwrap_or(false);

        *self = if draggable {
            debug!(source = index, "drag started");
            DragSession::Dragging {
                source: index,
                pointer,
                target: None,
            }
        } else {
            DragSession::Idle
        };
        draggable
    }

    /// Pointer-move: records the pointer and recomputes the drop target
    pub fn hover(&mut self, lines: &[String], hovered: Option<usize>, pointer: Point) {
        if let DragSession::Dragging { source, .. } = *self {
            *self = DragSession::Dragging {
                source,
                pointer,
                target: hit_test(lines, source, hovered),
            };
        }
    }

    /// Pointer-up: resolves the target under the pointer and ends the session
    ///
    /// The session is idle afterwards regardless of the outcome.
    pub fn release(&mut self, lines: &[String], hovered: Option<usize>) -> DragEnd {
        let session = std::mem::take(self);
        let DragSession::Dragging { source, .. } = session else {
            return DragEnd::Cancelled;
        };

        match hit_test(lines, source, hovered) {
            Some(target) => {
                debug!(source, ?target, "drag released on target");
                DragEnd::Dropped {
                    target,
                    lines: apply_drop(lines, source, target),
                }
            }
            None => {
                debug!(source, "drag released without target");
                DragEnd::Cancelled
            }
        }
    }

    /// Cancels the session without mutating anything
    pub fn cancel(&mut self) -> DragEnd {
        if self.is_active() {
            debug!("drag cancelled");
        }
        *self = DragSession::Idle;
        DragEnd::Cancelled
    }
}
