//! Document CLI commands

use anyhow::{bail, Result};
use clap::ValueEnum;

use super::output::Output;
use crate::domain::{
    apply_drop, classify, complete_drop, drop_position, is_completed, render, todo_text, Caret,
    Clock, Direction, DropTarget, Fragment, LineKind, PageId, SystemClock,
};
use crate::storage::{FileStore, PageStore, Workspace};

/// Direction argument for `logbook move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

/// Opens the page store with the requested page active
pub(super) fn open_page(workspace: &Workspace, page: Option<&str>) -> Result<PageStore<FileStore>> {
    let mut store = workspace.page_store()?;
    if let Some(name) = page {
        let id = PageId::normalize(name)?;
        if !store.contains(&id) {
            bail!("Page not found: {}", id);
        }
        store.switch_to(&id)?;
    }
    Ok(store)
}

/// Converts a 1-based line number into an index within the document
fn line_index(store: &PageStore<FileStore>, line: usize) -> Result<usize> {
    let count = store.document().line_count();
    if line == 0 || line > count {
        bail!(
            "Line {} is out of range (the document has {} lines)",
            line,
            count
        );
    }
    Ok(line - 1)
}

pub fn show(workspace: &Workspace, output: &Output, page: Option<&str>, raw: bool) -> Result<()> {
    let store = open_page(workspace, page)?;
    let document = store.document();

    if output.is_json() {
        if raw {
            let kinds: Vec<&str> = document
                .lines()
                .iter()
                .map(|line| classify(line).label())
                .collect();
            output.data(&serde_json::json!({
                "page": store.active(),
                "content": document.to_text(),
                "kinds": kinds,
            }));
        } else {
            output.data(&serde_json::json!({
                "page": store.active(),
                "lines": document.line_count(),
                "fragments": render(document.lines()),
            }));
        }
        return Ok(());
    }

    if raw {
        for (i, line) in document.lines().iter().enumerate() {
            println!("{:>4}  {}", i + 1, line);
        }
        return Ok(());
    }

    for fragment in render(document.lines()) {
        match fragment {
            Fragment::Heading1 { text } => println!("\n{}\n{}", text, "=".repeat(text.chars().count())),
            Fragment::Heading2 { text } => println!("\n{}", text),
            Fragment::Separator => println!("{}", "-".repeat(40)),
            Fragment::Logbook { index, text } => println!("{:>4}  {}", index + 1, text),
            Fragment::Todo {
                index,
                text,
                completed,
                in_logbook,
            } => {
                let mark = if completed { "[x]" } else { "[ ]" };
                let indent = if in_logbook { "  " } else { "" };
                println!("{:>4}  {}{} {}", index + 1, indent, mark, text);
            }
            Fragment::Text { text } => println!("      {}", text),
        }
    }
    Ok(())
}

pub fn toggle(workspace: &Workspace, output: &Output, page: Option<&str>, line: usize) -> Result<()> {
    let mut store = open_page(workspace, page)?;
    let index = line_index(&store, line)?;

    let before = store.document().lines().to_vec();
    if classify(&before[index]) != LineKind::Todo {
        bail!("Line {} is not a todo item", line);
    }

    let was_completed = is_completed(&before[index]);
    let after = crate::domain::toggle_completion(&before, index, &SystemClock);
    let text = todo_text(&before[index]).to_string();
    let line_delta = after.len() as i64 - before.len() as i64;

    store.set_lines(after);
    store.save()?;
    output.verbose_ctx("toggle", &format!("Saved page {}", store.active()));

    if output.is_json() {
        output.data(&serde_json::json!({
            "page": store.active(),
            "line": line,
            "text": text,
            "completed": !was_completed,
            "line_delta": line_delta,
        }));
    } else if was_completed {
        output.success(&format!("Reopened: {}", text));
    } else {
        output.success(&format!("Completed: {}", text));
    }
    Ok(())
}

pub fn move_line(
    workspace: &Workspace,
    output: &Output,
    page: Option<&str>,
    line: usize,
    direction: Direction,
    column: usize,
) -> Result<()> {
    let mut store = open_page(workspace, page)?;
    let index = line_index(&store, line)?;

    let caret = Caret::new(index, column).clamp(store.document().lines());
    let result = crate::domain::move_line(store.document().lines(), caret, direction);
    let moved = result.moved(&caret);

    if moved {
        store.set_lines(result.lines);
        store.save()?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "page": store.active(),
            "moved": moved,
            "from": line,
            "to": result.caret.line + 1,
            "caret": result.caret,
        }));
    } else if moved {
        output.success(&format!("Moved line {} to {}", line, result.caret.line + 1));
    } else {
        output.success(&format!("Line {} is already at the edge", line));
    }
    Ok(())
}

pub fn drop_line(
    workspace: &Workspace,
    output: &Output,
    page: Option<&str>,
    from: usize,
    to: usize,
    logbook: bool,
) -> Result<()> {
    let mut store = open_page(workspace, page)?;
    let source = line_index(&store, from)?;
    let before = store.document().lines().to_vec();

    let (after, landed) = if logbook {
        let target = line_index(&store, to)?;
        if classify(&before[target]) != LineKind::Logbook {
            bail!("Line {} is not a logbook timestamp", to);
        }
        if classify(&before[source]) != LineKind::Todo {
            bail!("Line {} is not a todo item", from);
        }
        (apply_drop(&before, source, DropTarget::Logbook(target)), None)
    } else {
        // One past the last line drops at the end
        if to == 0 || to > before.len() + 1 {
            bail!(
                "Line {} is out of range (the document has {} lines)",
                to,
                before.len()
            );
        }
        let target = to - 1;
        (
            complete_drop(&before, source, Some(target)),
            Some(drop_position(source, target)),
        )
    };

    let moved = after != before;
    if moved {
        store.set_lines(after);
        store.save()?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "page": store.active(),
            "moved": moved,
            "from": from,
            "to": landed.map(|i| i + 1),
            "logbook": logbook,
        }));
    } else if !moved {
        output.success("Nothing to move");
    } else if logbook {
        output.success(&format!("Filed line {} under the logbook at line {}", from, to));
    } else if let Some(landed) = landed {
        output.success(&format!("Moved line {} to {}", from, landed + 1));
    }
    Ok(())
}

pub fn date(output: &Output) {
    let timestamp = SystemClock.timestamp();
    if output.is_json() {
        output.data(&serde_json::json!({ "timestamp": timestamp }));
    } else {
        println!("{}", timestamp);
    }
}
