//! Todo completion and refiling
//!
//! Completing a todo item moves it into the latest logbook section. When the
//! document has no logbook yet, a new section is opened right under the first
//! line. Un-completing only strips the glyph; the item stays where it is.

use tracing::debug;

use super::line::{classify, is_completed, mark_completed, unmark_completed, LineKind};
use super::sections::{latest_logbook, logbook_block_end};
use super::timestamp::Clock;

/// Toggles the completion mark of the todo item at `index`
///
/// Returns the input unchanged if `index` is out of range or the line is not a
/// todo item.
pub fn toggle_completion(lines: &[String], index: usize, clock: &dyn Clock) -> Vec<String> {
    let Some(line) = lines.get(index) else {
        return lines.to_vec();
    };
    if classify(line) != LineKind::Todo {
        return lines.to_vec();
    }

    if is_completed(line) {
        debug!(index, "reopening todo item in place");
        let mut next = lines.to_vec();
        next[index] = unmark_completed(line);
        return next;
    }

    let completed = mark_completed(line);
    match latest_logbook(lines) {
        None => open_logbook(lines, index, completed, clock),
        Some(logbook) => refile(lines, index, completed, logbook),
    }
}

/// Starts a logbook section under line 0 holding the completed item
fn open_logbook(lines: &[String], index: usize, completed: String, clock: &dyn Clock) -> Vec<String> {
    const INSERT_AT: usize = 1;

    let timestamp = clock.timestamp();
    debug!(index, %timestamp, "no logbook found, opening a new one");

    let mut next = lines.to_vec();
    let at = INSERT_AT.min(next.len());
    next.splice(at..at, [String::new(), timestamp, completed]);

    let original = if index >= at { index + 3 } else { index };
    next.remove(original);
    next
}

/// Appends the completed item to the logbook block starting at `logbook`
fn refile(lines: &[String], index: usize, completed: String, logbook: usize) -> Vec<String> {
    let insert_at = logbook_block_end(lines, logbook);
    debug!(index, logbook, insert_at, "refiling completed todo item");

    let mut next = lines.to_vec();
    next.insert(insert_at, completed);

    // Insert happens first, so an insertion at or before the original shifts it.
    let original = if insert_at <= index { index + 1 } else { index };
    next.remove(original);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::timestamp::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 15, 0)
                .unwrap(),
        )
    }

    fn doc(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn opens_logbook_when_none_exists() {
        let lines = doc(&["# T", "", "- a", "- b"]);
        let result = toggle_completion(&lines, 2, &clock());
        assert_eq!(
            result,
            doc(&["# T", "", "5 March 9:15 AM", "- ✓ a", "", "- b"])
        );
        assert_eq!(result.len(), lines.len() + 2);
    }

    #[test]
    fn opening_logbook_from_the_first_line() {
        let lines = doc(&["- a", "- b"]);
        let result = toggle_completion(&lines, 0, &clock());
        assert_eq!(result, doc(&["", "5 March 9:15 AM", "- ✓ a", "- b"]));
    }

    #[test]
    fn opening_logbook_in_a_single_line_document() {
        let lines = doc(&["- only"]);
        let result = toggle_completion(&lines, 0, &clock());
        assert_eq!(result, doc(&["", "5 March 9:15 AM", "- ✓ only"]));
    }

    #[test]
    fn refiles_into_existing_logbook_below() {
        let lines = doc(&[
            "# T",
            "- a",
            "",
            "1 May 9:00 AM",
            "- ✓ old",
            "## Next",
        ]);
        let result = toggle_completion(&lines, 1, &clock());
        assert_eq!(
            result,
            doc(&["# T", "", "1 May 9:00 AM", "- ✓ old", "- ✓ a", "## Next"])
        );
        assert_eq!(result.len(), lines.len());
    }

    #[test]
    fn refiles_into_existing_logbook_above() {
        let lines = doc(&[
            "# T",
            "1 May 9:00 AM",
            "- ✓ old",
            "## Work",
            "- a",
            "- b",
        ]);
        let result = toggle_completion(&lines, 4, &clock());
        assert_eq!(
            result,
            doc(&["# T", "1 May 9:00 AM", "- ✓ old", "- ✓ a", "## Work", "- b"])
        );
    }

    #[test]
    fn refiles_under_the_highest_index_logbook() {
        let lines = doc(&[
            "# T",
            "1 May 9:00 AM",
            "- ✓ first",
            "2 May 9:00 AM",
            "- ✓ second",
            "---",
            "- a",
        ]);
        let result = toggle_completion(&lines, 6, &clock());
        assert_eq!(
            result,
            doc(&[
                "# T",
                "1 May 9:00 AM",
                "- ✓ first",
                "2 May 9:00 AM",
                "- ✓ second",
                "- ✓ a",
                "---",
            ])
        );
    }

    #[test]
    fn item_inside_the_logbook_moves_to_its_end() {
        let lines = doc(&["1 May 9:00 AM", "- a", "- ✓ b"]);
        let result = toggle_completion(&lines, 1, &clock());
        assert_eq!(result, doc(&["1 May 9:00 AM", "- ✓ b", "- ✓ a"]));
    }

    #[test]
    fn uncompleting_stays_in_place() {
        let lines = doc(&["1 May 9:00 AM", "- ✓ a", "- b"]);
        let result = toggle_completion(&lines, 1, &clock());
        assert_eq!(result, doc(&["1 May 9:00 AM", "- a", "- b"]));
    }

    #[test]
    fn double_toggle_restores_text_but_not_position() {
        let lines = doc(&["# T", "- a", "1 May 9:00 AM", "- ✓ old"]);

        let completed = toggle_completion(&lines, 1, &clock());
        assert_eq!(completed, doc(&["# T", "1 May 9:00 AM", "- ✓ old", "- ✓ a"]));

        let reopened = toggle_completion(&completed, 3, &clock());
        assert_eq!(reopened, doc(&["# T", "1 May 9:00 AM", "- ✓ old", "- a"]));

        // Same line text as before, different position.
        assert_eq!(reopened[3], lines[1]);
        assert_ne!(reopened, lines);
    }

    #[test]
    fn non_todo_lines_are_a_no_op() {
        let lines = doc(&["# T", "plain", "---"]);
        for index in 0..lines.len() {
            assert_eq!(toggle_completion(&lines, index, &clock()), lines);
        }
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let lines = doc(&["- a"]);
        assert_eq!(toggle_completion(&lines, 3, &clock()), lines);
        assert!(toggle_completion(&[], 0, &clock()).is_empty());
    }
}
