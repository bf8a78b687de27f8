//! Logbook section scanning
//!
//! Section boundaries are recomputed from the line sequence on every call.
//! A logbook section starts at a timestamp line and runs up to the next
//! heading, separator or timestamp line (exclusive).

use std::ops::Range;

use super::line::{classify, LineKind};

/// Index of the latest logbook timestamp (the bottom-most one), if any
pub fn latest_logbook(lines: &[String]) -> Option<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| classify(line) == LineKind::Logbook)
        .map(|(i, _)| i)
        .last()
}

/// Index where the logbook block starting at `start` ends
///
/// Scans forward from `start + 1` and returns the first boundary line, or the
/// document length when the block runs to the end.
pub fn logbook_block_end(lines: &[String], start: usize) -> usize {
    let from = (start + 1).min(lines.len());
    lines[from..]
        .iter()
        .position(|line| classify(line).is_section_boundary())
        .map(|offset| from + offset)
        .unwrap_or(lines.len())
}

/// All logbook sections as index ranges (timestamp line included)
pub fn logbook_sections(lines: &[String]) -> Vec<Range<usize>> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| classify(line) == LineKind::Logbook)
        .map(|(start, _)| start..logbook_block_end(lines, start))
        .collect()
}
