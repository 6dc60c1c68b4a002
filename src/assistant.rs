//! Mocked assistant: canned suggestions for a blog post draft.
//!
//! Nothing here infers anything. Each suggestion is a pure function of
//! the field's current value, so the same draft always yields the same edit.

use crate::model::ActionKind;

const GENERATED_TITLE: &str = "AI-Powered Design Patterns: Building Intelligent User Interfaces";
const TITLE_ENHANCEMENT: &str = " - A Comprehensive Guide";
const GENERATED_DESCRIPTION: &str = "A practical tour of interaction patterns for AI features: \
    suggestions the user can accept or reject, progress that explains itself, \
    and a history that can always be taken back.";
const DESCRIPTION_EXPANSION: &str = " Discover real-world examples, expert insights, \
    and actionable strategies to implement AI-powered features in your products.";
const SUGGESTED_TAGS: &str =
    "AI, UX Design, Design Patterns, User Interface, Machine Learning, Best Practices";
const COMPLETED_TAG: &str = "Human-AI Interaction";
const DESCRIPTION_DATA: &str =
    " Includes findings from 12 usability studies across 40 product teams.";

/// Something the assistant can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    GenerateTitle,
    EnhanceTitle,
    GenerateDescription,
    ExpandDescription,
    EnrichDescription,
    SuggestTags,
    CompleteTags,
}

/// An edit the assistant proposes. Becomes an action once applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedEdit {
    pub kind: ActionKind,
    pub title: &'static str,
    pub description: &'static str,
    pub field: &'static str,
    pub new_value: String,
}

impl Suggestion {
    /// The field this suggestion writes to.
    pub fn field(self) -> &'static str {
        match self {
            Self::GenerateTitle | Self::EnhanceTitle => "title",
            Self::GenerateDescription | Self::ExpandDescription | Self::EnrichDescription => {
                "description"
            }
            Self::SuggestTags | Self::CompleteTags => "tags",
        }
    }

    /// Produce the edit for a field currently holding `current`.
    pub fn propose(self, current: &str) -> ProposedEdit {
        let (kind, title, description, new_value) = match self {
            Self::GenerateTitle => (
                ActionKind::TextGenerated,
                "Generated Title",
                "AI created a new title based on context",
                GENERATED_TITLE.to_string(),
            ),
            Self::EnhanceTitle => (
                ActionKind::TextEdited,
                "Enhanced Title",
                "AI added descriptive enhancement",
                format!("{current}{TITLE_ENHANCEMENT}"),
            ),
            Self::GenerateDescription => (
                ActionKind::TextGenerated,
                "Generated Description",
                "AI created full description from title",
                GENERATED_DESCRIPTION.to_string(),
            ),
            Self::ExpandDescription => (
                ActionKind::TextEdited,
                "Expanded Description",
                "AI added more context and details",
                format!("{current}{DESCRIPTION_EXPANSION}"),
            ),
            Self::EnrichDescription => (
                ActionKind::DataEnhanced,
                "Enriched Description",
                "AI backed the description with supporting data",
                format!("{current}{DESCRIPTION_DATA}"),
            ),
            Self::SuggestTags => (
                ActionKind::SuggestionAccepted,
                "Suggested Tags",
                "AI analyzed content and suggested relevant tags",
                SUGGESTED_TAGS.to_string(),
            ),
            Self::CompleteTags => (
                ActionKind::AutoCompleted,
                "Completed Tags",
                "AI filled in a missing tag",
                if current.trim().is_empty() {
                    COMPLETED_TAG.to_string()
                } else {
                    format!("{current}, {COMPLETED_TAG}")
                },
            ),
        };

        ProposedEdit {
            kind,
            title,
            description,
            field: self.field(),
            new_value,
        }
    }
}
