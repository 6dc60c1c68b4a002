//! Output formatting for CLI display.

use std::fmt::Write;

use jiff::Timestamp;
use uuid::Uuid;

use crate::history::FieldValues;
use crate::model::{Action, ActionKind};

/// Icon shown next to each timeline entry.
pub(super) fn kind_icon(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::TextGenerated => "✨",
        ActionKind::TextEdited => "✏️",
        ActionKind::SuggestionAccepted => "✓",
        ActionKind::AutoCompleted => "🤖",
        ActionKind::DataEnhanced => "🎯",
    }
}

/// First eight hex digits of an id: what a person types to refer to it.
pub(super) fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// How long ago `then` was, coarsely.
pub(super) fn format_age(then: Timestamp, now: Timestamp) -> String {
    let seconds = now.duration_since(then).as_secs();
    if seconds < 60 {
        return "Just now".to_string();
    }
    if seconds < 3600 {
        return format!("{} min ago", seconds / 60);
    }
    match seconds / 3600 {
        1 => "1 hour ago".to_string(),
        hours => format!("{hours} hours ago"),
    }
}

fn display_value(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}

/// One timeline entry, several lines.
pub(super) fn format_action(action: &Action, now: Timestamp) -> String {
    format!(
        "{icon} {id}  {title}  ({age})\n   {description}\n   before: {before}\n   after:  {after}",
        icon = kind_icon(action.kind),
        id = short_id(action.id),
        title = action.title,
        age = format_age(action.performed_at, now),
        description = action.description,
        before = display_value(&action.previous_value),
        after = display_value(&action.new_value),
    )
}

/// The applied actions, oldest first.
pub(super) fn format_timeline(actions: &[Action], now: Timestamp) -> String {
    if actions.is_empty() {
        return "No actions yet".to_string();
    }
    let mut out = format!("Action history ({})", actions.len());
    for action in actions {
        let _ = write!(out, "\n{}", format_action(action, now));
    }
    out
}

/// Current field values, one per line.
pub(super) fn format_state(values: &FieldValues) -> String {
    let width = values.keys().map(String::len).max().unwrap_or(0);
    values
        .iter()
        .map(|(field, value)| format!("{field:<width$}  {}", display_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The redo stack, next-to-redo first.
pub(super) fn format_redo_stack<'a>(undone: impl IntoIterator<Item = &'a Action>) -> String {
    let lines: Vec<String> = undone
        .into_iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}  {} [{}]", i + 1, short_id(a.id), a.title, a.field))
        .collect();
    if lines.is_empty() {
        return "Nothing to redo".to_string();
    }
    lines.join("\n")
}
