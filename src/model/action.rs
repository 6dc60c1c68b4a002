//! Action types: immutable records of edits applied to a field.
//!
//! One action = one edit. Each captures the field's value before and
//! after, so it can be reverted without consulting any other record.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single, immutable record of an edit applied to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: Uuid,

    /// What sort of edit this was.
    pub kind: ActionKind,

    /// Short label shown in the timeline (e.g. "Generated Title").
    pub title: String,

    /// One-line explanation of what the edit did.
    pub description: String,

    /// The logical field the edit applies to (e.g. "title", "tags").
    pub field: String,

    /// The field's value before the edit.
    pub previous_value: String,

    /// The field's value after the edit.
    pub new_value: String,

    /// When the edit was applied.
    pub performed_at: Timestamp,
}

/// What sort of edit was made. Descriptive only: undo and redo
/// treat every kind the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Content produced from scratch.
    TextGenerated,

    /// Existing content rewritten or extended.
    TextEdited,

    /// A proposed value the writer accepted as-is.
    SuggestionAccepted,

    /// Content filled in without an explicit request.
    AutoCompleted,

    /// Existing content enriched with extra data.
    DataEnhanced,
}
