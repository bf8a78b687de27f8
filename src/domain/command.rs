//! Inline command expansion
//!
//! Typing a trigger token such as `/date` and then Enter or Space replaces the
//! token with generated text. The keystroke itself is swallowed, and the caret
//! lands right after the inserted text.

use std::str::FromStr;

use tracing::debug;

use super::timestamp::Clock;

/// Keys that can fire an inline command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKey {
    Enter,
    Space,
}

/// Known inline commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineCommand {
    /// `/date`: the current logbook timestamp
    Date,
}

impl InlineCommand {
    /// The literal token typed by the user
    pub fn token(&self) -> &'static str {
        match self {
            InlineCommand::Date => "/date",
        }
    }

    /// Text that replaces the token
    pub fn expand(&self, clock: &dyn Clock) -> String {
        match self {
            InlineCommand::Date => clock.timestamp(),
        }
    }
}

impl FromStr for InlineCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "/date" => Ok(InlineCommand::Date),
            _ => Err(()),
        }
    }
}

/// Text after an expansion, with the caret as a character offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    pub caret: usize,
}

/// Expands the command word ending at `caret` (a character offset into `text`)
///
/// The word is whatever follows the last whitespace before the caret. Returns
/// `None` when it is not a known command; the keystroke then proceeds normally.
pub fn expand_command(
    text: &str,
    caret: usize,
    _key: TriggerKey,
    clock: &dyn Clock,
) -> Option<Expansion> {
    let split = text
        .char_indices()
        .nth(caret)
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (before, after) = text.split_at(split);

    let word_start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let command: InlineCommand = before[word_start..].parse().ok()?;

    let replacement = command.expand(clock);
    let head = &before[..word_start];
    let caret = head.chars().count() + replacement.chars().count();
    debug!(token = command.token(), caret, "expanded inline command");

    Some(Expansion {
        text: format!("{head}{replacement}{after}"),
        caret,
    })
}
