//! In-memory ledger of applied edits with selective undo and linear redo.
//!
//! ```text
//! actions:  [t1 title, g1 tags, t2 title]     applied, oldest first
//! undone:   [..]                              redo stack, newest first
//! values:   { title: t2.new, tags: g1.new }
//! ```
//!
//! Undoing an action also undoes every later action on the same field,
//! since those were built on top of the value being reverted. Actions on
//! other fields are never touched. Redo reapplies one action per call,
//! most recently undone first. Any new action invalidates the redo stack.
//!
//! Unknown ids and empty redo stacks are silent no-ops: callers only
//! ever hold ids the store handed out.

use std::collections::{BTreeMap, VecDeque};

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::{Action, ActionKind};

/// Current value of every field, keyed by field name.
pub type FieldValues = BTreeMap<String, String>;

/// The action history for one editing session.
#[derive(Debug, Clone)]
pub struct ActionHistory {
    /// Fields present (as empty strings) before any edit, and after `clear`.
    known_fields: Vec<String>,
    actions: Vec<Action>,
    undone: VecDeque<Action>,
    field_values: FieldValues,
}

impl ActionHistory {
    /// Creates an empty history. Each known field starts out as `""`.
    pub fn new<I, S>(known_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let known_fields: Vec<String> = known_fields.into_iter().map(Into::into).collect();
        let field_values = blank_values(&known_fields);
        Self {
            known_fields,
            actions: Vec::new(),
            undone: VecDeque::new(),
            field_values,
        }
    }

    // ── Mutations ──

    /// Records a new edit and applies it.
    ///
    /// No-op edits (`previous_value == new_value`) are recorded like any other.
    /// Clears the redo stack.
    pub fn add_action(
        &mut self,
        kind: ActionKind,
        title: impl Into<String>,
        description: impl Into<String>,
        field: impl Into<String>,
        previous_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Action {
        let action = Action {
            id: Uuid::new_v4(),
            kind,
            title: title.into(),
            description: description.into(),
            field: field.into(),
            previous_value: previous_value.into(),
            new_value: new_value.into(),
            performed_at: Timestamp::now(),
        };

        self.field_values
            .insert(action.field.clone(), action.new_value.clone());
        self.actions.push(action.clone());

        if self.can_redo() {
            tracing::debug!(discarded = self.undone.len(), "redo stack invalidated");
            self.undone.clear();
        }

        tracing::debug!(action = %action.id, field = %action.field, kind = ?action.kind, "recorded action");
        action
    }

    /// Undoes an applied action, cascading to every later action on the same field.
    ///
    /// The field is restored to the target's `previous_value`. Removed actions
    /// go to the front of the redo stack, most recently applied first.
    ///
    /// Returns how many actions were moved to the redo stack;
    /// zero when `action_id` is not currently applied.
    pub fn undo_action(&mut self, action_id: Uuid) -> usize {
        let Some(index) = self.actions.iter().position(|a| a.id == action_id) else {
            tracing::debug!(action = %action_id, "undo ignored: action is not applied");
            return 0;
        };

        let field = self.actions[index].field.clone();
        let restored = self.actions[index].previous_value.clone();
        self.field_values.insert(field.clone(), restored);

        let mut kept = Vec::with_capacity(self.actions.len());
        let mut removed = Vec::new();
        for (i, action) in std::mem::take(&mut self.actions).into_iter().enumerate() {
            if i >= index && action.field == field {
                removed.push(action);
            } else {
                kept.push(action);
            }
        }
        self.actions = kept;

        let count = removed.len();
        // Pushing oldest-first leaves the newest removed action at the front.
        for action in removed {
            self.undone.push_front(action);
        }

        tracing::debug!(action = %action_id, %field, cascaded = count - 1, "undid action");
        count
    }

    /// Reapplies the most recently undone action.
    ///
    /// Returns the reapplied action, or `None` when there is nothing to redo.
    ///
    /// Redoing a cascade one action at a time appends its actions newest
    /// first, so their `previous_value` chain no longer follows `actions`
    /// order. Undoing the first one reapplied then cascades the rest away
    /// and restores its own `previous_value`, which may be non-empty with
    /// no action left on the field.
    pub fn redo_action(&mut self) -> Option<Action> {
        let Some(action) = self.undone.pop_front() else {
            tracing::debug!("redo ignored: nothing to redo");
            return None;
        };

        self.field_values
            .insert(action.field.clone(), action.new_value.clone());
        self.actions.push(action.clone());

        tracing::debug!(action = %action.id, field = %action.field, "redid action");
        Some(action)
    }

    /// Discards all actions, applied and undone, and blanks every known field.
    pub fn clear(&mut self) {
        let discarded = self.actions.len() + self.undone.len();
        self.actions.clear();
        self.undone.clear();
        self.field_values = blank_values(&self.known_fields);
        tracing::debug!(discarded, "cleared history");
    }

    // ── Projections ──

    /// Applied actions, oldest first.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Undone actions eligible for redo, most recently undone first.
    pub fn undone_actions(&self) -> &VecDeque<Action> {
        &self.undone
    }

    /// Current value of every field that is known or has been edited.
    pub fn field_values(&self) -> &FieldValues {
        &self.field_values
    }

    /// Current value of one field; `""` for a field never seen.
    pub fn field_value(&self, field: &str) -> &str {
        self.field_values.get(field).map_or("", String::as_str)
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }
}

fn blank_values(fields: &[String]) -> FieldValues {
    fields
        .iter()
        .map(|f| (f.clone(), String::new()))
        .collect()
}
