//! An editing session: one history, owned by whoever drives it.
//!
//! The session plays the part of the editor screen. It turns assistant
//! suggestions and manual edits into recorded actions, resolves the
//! short ids a person types back to actions, and tracks whether the
//! draft has been published.

use uuid::Uuid;

use crate::{
    assistant::Suggestion,
    history::ActionHistory,
    model::{Action, ActionKind},
};

/// Errors surfaced to whoever is driving the session.
///
/// The history itself never fails; these come from interpreting input.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no applied action matching '{0}'")]
    NoActionMatching(String),

    #[error("'{reference}' is ambiguous: matches {} actions: {}", .matches.len(), .matches.join(", "))]
    AmbiguousAction {
        reference: String,
        matches: Vec<String>,
    },

    #[error("field name must not be empty")]
    EmptyField,

    #[error("nothing to publish: no actions yet")]
    NothingToPublish,

    #[error("post is already published")]
    AlreadyPublished,
}

pub type Result<T> = core::result::Result<T, SessionError>;

/// One editing session over a blog post draft.
#[derive(Debug, Clone)]
pub struct Session {
    history: ActionHistory,
    published: bool,
}

impl Session {
    /// Starts a session whose draft has the given fields, all empty.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            history: ActionHistory::new(fields),
            published: false,
        }
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn is_published(&self) -> bool {
        self.published
    }

    /// Applies an assistant suggestion to the field it targets.
    pub fn assist(&mut self, suggestion: Suggestion) -> Action {
        let current = self.history.field_value(suggestion.field()).to_string();
        let edit = suggestion.propose(&current);
        self.history.add_action(
            edit.kind,
            edit.title,
            edit.description,
            edit.field,
            current,
            edit.new_value,
        )
    }

    /// Records a manual edit: the writer typed `value` into `field`.
    pub fn edit(&mut self, field: &str, value: &str) -> Result<Action> {
        if field.is_empty() {
            return Err(SessionError::EmptyField);
        }
        let current = self.history.field_value(field).to_string();
        Ok(self.history.add_action(
            ActionKind::TextEdited,
            format!("Edited {}", capitalize(field)),
            "Manual edit",
            field,
            current,
            value,
        ))
    }

    /// Undoes the applied action identified by `reference`.
    ///
    /// Returns how many actions were undone, including cascaded ones.
    pub fn undo(&mut self, reference: &str) -> Result<usize> {
        let id = self.resolve_action(reference)?;
        Ok(self.history.undo_action(id))
    }

    pub fn redo(&mut self) -> Option<Action> {
        self.history.redo_action()
    }

    /// Marks the draft as published.
    pub fn publish(&mut self) -> Result<()> {
        if self.published {
            return Err(SessionError::AlreadyPublished);
        }
        if !self.history.has_actions() {
            return Err(SessionError::NothingToPublish);
        }
        self.published = true;
        tracing::info!(actions = self.history.actions().len(), "published post");
        Ok(())
    }

    /// Discards all history and starts the draft over.
    pub fn clear(&mut self) {
        self.history.clear();
        self.published = false;
        tracing::info!("cleared session");
    }

    /// Resolve an action reference (full UUID or unambiguous prefix, any case) to an applied action.
    fn resolve_action(&self, reference: &str) -> Result<Uuid> {
        let applied = self.history.actions();

        // Try full UUID first.
        if let Ok(id) = reference.parse::<Uuid>() {
            return applied
                .iter()
                .any(|a| a.id == id)
                .then_some(id)
                .ok_or_else(|| SessionError::NoActionMatching(reference.to_string()));
        }

        if reference.is_empty() {
            return Err(SessionError::NoActionMatching(reference.to_string()));
        }

        // Ids render lowercase; accept prefixes copied in either case.
        let prefix = reference.to_ascii_lowercase();
        let matches: Vec<&Action> = applied
            .iter()
            .filter(|a| a.id.to_string().starts_with(&prefix))
            .collect();

        match matches.as_slice() {
            [] => Err(SessionError::NoActionMatching(reference.to_string())),
            [action] => Ok(action.id),
            many => Err(SessionError::AmbiguousAction {
                reference: reference.to_string(),
                matches: many.iter().map(|a| a.id.to_string()[..8].to_string()).collect(),
            }),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
