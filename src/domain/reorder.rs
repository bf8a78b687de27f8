//! Line reordering
//!
//! Two independent mutators:
//! - [`move_line`] swaps a line with its neighbour (keyboard driven) and
//!   reports where the caret should land afterwards.
//! - [`complete_drop`] and [`complete_logbook_drop`] move a line to an
//!   arbitrary position (pointer drag driven).
//!
//! All of them return a fresh sequence and leave invalid requests as no-ops.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::caret::Caret;
use super::line::{classify, LineKind};
use super::sections::logbook_block_end;

/// Direction of an adjacent swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(()),
        }
    }
}

/// Result of an adjacent swap: new lines plus where the caret goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMove {
    pub lines: Vec<String>,
    pub caret: Caret,
}

impl LineMove {
    /// Returns true if the swap changed anything
    pub fn moved(&self, before: &Caret) -> bool {
        self.caret.line != before.line
    }
}

/// Swaps the caret's line with its neighbour in `direction`
///
/// At either boundary the lines and caret come back unchanged. Otherwise the
/// caret follows the moved content and keeps its column, clamped to the line.
pub fn move_line(lines: &[String], caret: Caret, direction: Direction) -> LineMove {
    let unchanged = LineMove {
        lines: lines.to_vec(),
        caret,
    };

    let from = caret.line;
    if from >= lines.len() {
        return unchanged;
    }
    let to = match direction {
        Direction::Up if from > 0 => from - 1,
        Direction::Down if from + 1 < lines.len() => from + 1,
        _ => return unchanged,
    };

    let mut next = lines.to_vec();
    next.swap(from, to);
    debug!(from, to, "swapped adjacent lines");

    let column = caret.column.min(next[to].chars().count());
    LineMove {
        lines: next,
        caret: Caret::new(to, column),
    }
}

/// Index the dragged line ends up at for a drop on `target`
pub fn drop_position(source: usize, target: usize) -> usize {
    if target > source {
        target - 1
    } else {
        target
    }
}

/// Moves the line at `source` so it lands right before the line at `target`
///
/// No-op when `target` is absent, equals `source`, or either index is out of
/// range. `target` may equal the line count to drop after the last line.
pub fn complete_drop(lines: &[String], source: usize, target: Option<usize>) -> Vec<String> {
    let Some(target) = target else {
        return lines.to_vec();
    };
    if source == target || source >= lines.len() || target > lines.len() {
        return lines.to_vec();
    }

    let mut next = lines.to_vec();
    let dragged = next.remove(source);
    let at = drop_position(source, target);
    next.insert(at, dragged);
    debug!(source, target, at, "dropped line");
    next
}

/// Moves the todo item at `source` to the end of the logbook block at `logbook`
///
/// `logbook` addresses the sequence *after* the source has been removed: when
/// the logbook sits below the source, callers pass its index minus one. No-op
/// when the source is not a todo item or an index is out of range.
pub fn complete_logbook_drop(lines: &[String], source: usize, logbook: usize) -> Vec<String> {
    match lines.get(source) {
        Some(line) if classify(line) == LineKind::Todo => {}
        _ => return lines.to_vec(),
    }

    let mut next = lines.to_vec();
    let dragged = next.remove(source);
    if logbook >= next.len() {
        return lines.to_vec();
    }

    let at = logbook_block_end(&next, logbook);
    next.insert(at, dragged);
    debug!(source, logbook, at, "dropped todo item into logbook");
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn moves_line_up_and_tracks_caret() {
        let lines = doc(&["one", "two", "three"]);
        let result = move_line(&lines, Caret::new(1, 2), Direction::Up);
        assert_eq!(result.lines, doc(&["two", "one", "three"]));
        assert_eq!(result.caret, Caret::new(0, 2));
    }

    #[test]
    fn moves_line_down_and_tracks_caret() {
        let lines = doc(&["one", "two", "three"]);
        let result = move_line(&lines, Caret::new(1, 3), Direction::Down);
        assert_eq!(result.lines, doc(&["one", "three", "two"]));
        assert_eq!(result.caret, Caret::new(2, 3));
    }

    #[test]
    fn caret_column_is_clamped() {
        let lines = doc(&["a", "bc"]);
        let result = move_line(&lines, Caret::new(1, 10), Direction::Up);
        assert_eq!(result.caret, Caret::new(0, 2));
    }

    #[test]
    fn boundaries_are_no_ops() {
        let lines = doc(&["one", "two"]);
        let top = move_line(&lines, Caret::new(0, 1), Direction::Up);
        assert_eq!(top.lines, lines);
        assert_eq!(top.caret, Caret::new(0, 1));
        assert!(!top.moved(&Caret::new(0, 1)));

        let bottom = move_line(&lines, Caret::new(1, 1), Direction::Down);
        assert_eq!(bottom.lines, lines);

        let outside = move_line(&lines, Caret::new(7, 0), Direction::Up);
        assert_eq!(outside.lines, lines);
    }

    #[test]
    fn move_then_opposite_restores() {
        let lines = doc(&["a", "b", "c", "d"]);
        for line in 0..lines.len() {
            for direction in [Direction::Up, Direction::Down] {
                let caret = Caret::new(line, 0);
                let first = move_line(&lines, caret, direction);
                if !first.moved(&caret) {
                    continue;
                }
                let back = move_line(&first.lines, first.caret, direction.opposite());
                assert_eq!(back.lines, lines);
                assert_eq!(back.caret, caret);
            }
        }
    }

    #[test]
    fn drop_downwards_lands_before_target() {
        let lines = doc(&["a", "b", "c", "d"]);
        assert_eq!(complete_drop(&lines, 0, Some(2)), doc(&["b", "a", "c", "d"]));
    }

    #[test]
    fn drop_upwards_lands_before_target() {
        let lines = doc(&["a", "b", "c", "d"]);
        assert_eq!(complete_drop(&lines, 3, Some(1)), doc(&["a", "d", "b", "c"]));
    }

    #[test]
    fn drop_at_end() {
        let lines = doc(&["a", "b", "c"]);
        assert_eq!(complete_drop(&lines, 0, Some(3)), doc(&["b", "c", "a"]));
    }

    #[test]
    fn drop_no_ops() {
        let lines = doc(&["a", "b", "c"]);
        assert_eq!(complete_drop(&lines, 1, None), lines);
        assert_eq!(complete_drop(&lines, 1, Some(1)), lines);
        assert_eq!(complete_drop(&lines, 5, Some(1)), lines);
        assert_eq!(complete_drop(&lines, 0, Some(9)), lines);
    }

    #[test]
    fn drop_is_reversible() {
        let lines = doc(&["a", "b", "c", "d", "e"]);
        for source in 0..lines.len() {
            for target in 0..lines.len() {
                if source == target {
                    continue;
                }
                let dropped = complete_drop(&lines, source, Some(target));
                let landed = drop_position(source, target);
                // Dropping before the line that now follows the original slot.
                let back_target = if landed < source { source + 1 } else { source };
                let restored = complete_drop(&dropped, landed, Some(back_target));
                assert_eq!(restored, lines, "source={source} target={target}");
            }
        }
    }

    #[test]
    fn logbook_drop_appends_to_block() {
        let lines = doc(&["- a", "1 May 9:00 AM", "- ✓ x", "## Next", "- b"]);
        // Logbook at 1 sits below the source, so it shifts to 0.
        let result = complete_logbook_drop(&lines, 0, 0);
        assert_eq!(result, doc(&["1 May 9:00 AM", "- ✓ x", "- a", "## Next", "- b"]));
    }

    #[test]
    fn logbook_drop_from_below() {
        let lines = doc(&["1 May 9:00 AM", "- ✓ x", "## Next", "- b"]);
        let result = complete_logbook_drop(&lines, 3, 0);
        assert_eq!(result, doc(&["1 May 9:00 AM", "- ✓ x", "- b", "## Next"]));
    }

    #[test]
    fn logbook_drop_rejects_non_todo() {
        let lines = doc(&["plain", "1 May 9:00 AM"]);
        assert_eq!(complete_logbook_drop(&lines, 0, 0), lines);
        assert_eq!(complete_logbook_drop(&lines, 9, 0), lines);
    }

    #[test]
    fn logbook_drop_out_of_range_target() {
        let lines = doc(&["- a", "1 May 9:00 AM"]);
        assert_eq!(complete_logbook_drop(&lines, 0, 4), lines);
    }

    #[test]
    fn direction_parses() {
        assert_eq!("UP".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("d".parse::<Direction>(), Ok(Direction::Down));
        assert!("left".parse::<Direction>().is_err());
    }
}
