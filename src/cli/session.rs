//! Interactive session commands: one line in, one response out.
//!
//! Each input line is split on whitespace and parsed with clap, so the
//! session grammar gets the same help and error messages as the top-level CLI.
//! The text of `edit` is the one exception: it is taken from the raw line so
//! the value typed is the value recorded.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand, ValueEnum};
use jiff::Timestamp;
use serde::Serialize;

use crate::{
    assistant::Suggestion,
    history::FieldValues,
    model::Action,
    session::Session,
};

use super::format::{format_action, format_redo_stack, format_state, format_timeline, short_id};

/// A single line typed into the session.
#[derive(Debug, Parser)]
#[command(name = "timeline>", no_binary_name = true, disable_version_flag = true)]
pub(super) struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub(super) enum SessionCommand {
    /// Ask the assistant for a suggestion and apply it.
    Assist {
        #[arg(value_enum)]
        suggestion: SuggestionArg,
    },

    /// Type a new value into a field.
    Edit {
        /// Field to edit (e.g. `title`).
        field: String,

        /// New value. Omit to empty the field.
        #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Undo an action and every later action on the same field.
    Undo {
        /// Action ID: full UUID or unambiguous prefix (e.g. `a3b`).
        action: String,
    },

    /// Reapply the most recently undone action.
    Redo,

    /// Discard all history and empty every field.
    Clear,

    /// Publish the post.
    Publish,

    /// Show the action timeline.
    History,

    /// Show current field values.
    State,

    /// Show timeline, field values, and redo stack together.
    Show {
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// End the session.
    #[command(alias = "exit")]
    Quit,
}

/// CLI-facing suggestion, mapped to the domain `Suggestion`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub(super) enum SuggestionArg {
    /// Write a title from scratch.
    GenerateTitle,
    /// Add a subtitle to the current title.
    EnhanceTitle,
    /// Write a description from scratch.
    GenerateDescription,
    /// Extend the current description.
    ExpandDescription,
    /// Back the current description with supporting data.
    EnrichDescription,
    /// Propose a tag list.
    SuggestTags,
    /// Fill in a missing tag.
    CompleteTags,
}

impl SuggestionArg {
    fn to_domain(self) -> Suggestion {
        match self {
            Self::GenerateTitle => Suggestion::GenerateTitle,
            Self::EnhanceTitle => Suggestion::EnhanceTitle,
            Self::GenerateDescription => Suggestion::GenerateDescription,
            Self::ExpandDescription => Suggestion::ExpandDescription,
            Self::EnrichDescription => Suggestion::EnrichDescription,
            Self::SuggestTags => Suggestion::SuggestTags,
            Self::CompleteTags => Suggestion::CompleteTags,
        }
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Flow {
    Continue,
    Quit,
}

/// Everything a consumer can observe about a session, for `show --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    actions: &'a [Action],
    undone_actions: Vec<&'a Action>,
    field_values: &'a FieldValues,
    published: bool,
}

/// Read commands from `input` until it ends or `quit` is entered.
///
/// Command errors are reported to stderr and the loop continues;
/// only I/O failures end it early.
pub(super) fn run_loop(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
    prompt: bool,
) -> io::Result<()> {
    if prompt {
        write!(out, "timeline> ")?;
        out.flush()?;
    }
    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if !words.is_empty() {
            match SessionLine::try_parse_from(words) {
                Ok(parsed) => {
                    let command = with_raw_text(parsed.command, &line);
                    match execute(session, command, out) {
                        Ok(Flow::Quit) => return Ok(()),
                        Ok(Flow::Continue) => {}
                        Err(message) => eprintln!("Error: {message}"),
                    }
                }
                Err(e) => eprintln!("{e}"),
            }
        }
        if prompt {
            write!(out, "timeline> ")?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Replace the whitespace-split text of an `edit` with the rest of `line`
/// after the field name, so inner spacing and tabs survive.
fn with_raw_text(command: SessionCommand, line: &str) -> SessionCommand {
    match command {
        // Lines like `edit -- title x` keep the parsed text.
        SessionCommand::Edit { field, text }
            if line.split_whitespace().nth(1) != Some(field.as_str()) =>
        {
            SessionCommand::Edit { field, text }
        }
        SessionCommand::Edit { field, .. } => SessionCommand::Edit {
            field,
            text: vec![after_words(line, 2).to_string()],
        },
        other => other,
    }
}

/// What follows the first `count` words of `line`, minus the separating whitespace.
fn after_words(line: &str, count: usize) -> &str {
    let mut rest = line;
    for _ in 0..count {
        rest = rest.trim_start();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = &rest[end..];
    }
    rest.trim_start()
}

/// Execute one command against the session, writing its response to `out`.
pub(super) fn execute(
    session: &mut Session,
    command: SessionCommand,
    out: &mut impl Write,
) -> Result<Flow, String> {
    let write_err = |e: io::Error| format!("failed to write output: {e}");
    let now = Timestamp::now();

    match command {
        SessionCommand::Assist { suggestion } => {
            let action = session.assist(suggestion.to_domain());
            writeln!(out, "{}", format_action(&action, now)).map_err(write_err)?;
        }
        SessionCommand::Edit { field, text } => {
            let action = session
                .edit(&field, &text.join(" "))
                .map_err(|e| e.to_string())?;
            writeln!(out, "{}", format_action(&action, now)).map_err(write_err)?;
        }
        SessionCommand::Undo { action } => {
            let undone = session.undo(&action).map_err(|e| e.to_string())?;
            let cascaded = undone.saturating_sub(1);
            if cascaded == 0 {
                writeln!(out, "Undid 1 action").map_err(write_err)?;
            } else {
                writeln!(
                    out,
                    "Undid 1 action and {cascaded} later edit(s) to the same field"
                )
                .map_err(write_err)?;
            }
        }
        SessionCommand::Redo => match session.redo() {
            Some(action) => {
                writeln!(out, "Redid {} {}", short_id(action.id), action.title)
                    .map_err(write_err)?;
            }
            None => writeln!(out, "Nothing to redo").map_err(write_err)?,
        },
        SessionCommand::Clear => {
            session.clear();
            writeln!(out, "Cleared").map_err(write_err)?;
        }
        SessionCommand::Publish => {
            session.publish().map_err(|e| e.to_string())?;
            writeln!(out, "Post published").map_err(write_err)?;
        }
        SessionCommand::History => {
            let timeline = format_timeline(session.history().actions(), now);
            writeln!(out, "{timeline}").map_err(write_err)?;
        }
        SessionCommand::State => {
            let state = format_state(session.history().field_values());
            writeln!(out, "{state}").map_err(write_err)?;
        }
        SessionCommand::Show { json } => {
            let text = if json {
                snapshot_json(session)?
            } else {
                format_snapshot(session, now)
            };
            writeln!(out, "{text}").map_err(write_err)?;
        }
        SessionCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Timeline, field values, and redo stack as one block of text.
pub(super) fn format_snapshot(session: &Session, now: Timestamp) -> String {
    let history = session.history();
    let mut text = format!(
        "{}\n\nCurrent state\n{}\n\nRedo stack\n{}",
        format_timeline(history.actions(), now),
        format_state(history.field_values()),
        format_redo_stack(history.undone_actions()),
    );
    if session.is_published() {
        text.push_str("\n\nPublished");
    }
    text
}

fn snapshot_json(session: &Session) -> Result<String, String> {
    let history = session.history();
    let snapshot = Snapshot {
        actions: history.actions(),
        undone_actions: history.undone_actions().iter().collect(),
        field_values: history.field_values(),
        published: session.is_published(),
    };
    serde_json::to_string_pretty(&snapshot).map_err(|e| format!("failed to serialize: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn session() -> Session {
        Session::new(["title", "description", "tags"])
    }

    fn run(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run_loop(session, Cursor::new(script), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn parse(line: &str) -> SessionCommand {
        let words: Vec<&str> = line.split_whitespace().collect();
        SessionLine::try_parse_from(words).unwrap().command
    }

    #[test]
    fn parses_assist_suggestion() {
        assert!(matches!(
            parse("assist enhance-title"),
            SessionCommand::Assist {
                suggestion: SuggestionArg::EnhanceTitle
            }
        ));
    }

    #[test]
    fn parses_edit_with_multiword_text() {
        let SessionCommand::Edit { field, text } = parse("edit title Hello big world") else {
            panic!("expected edit");
        };
        assert_eq!(field, "title");
        assert_eq!(text.join(" "), "Hello big world");
    }

    #[test]
    fn parses_exit_alias() {
        assert!(matches!(parse("exit"), SessionCommand::Quit));
    }

    #[test]
    fn rejects_unknown_suggestion() {
        assert!(SessionLine::try_parse_from(["assist", "write-novel"]).is_err());
    }

    #[test]
    fn edit_then_state() {
        let mut session = session();
        let out = run(&mut session, "edit title Hello world\nstate\n");

        assert!(out.contains("title        Hello world"));
        assert_eq!(session.history().field_value("title"), "Hello world");
    }

    #[test]
    fn edit_keeps_text_as_typed() {
        let mut session = session();
        run(&mut session, "  edit\ttitle  Hello   big\tworld \n");

        assert_eq!(session.history().field_value("title"), "Hello   big\tworld ");
        assert_eq!(session.history().actions()[0].new_value, "Hello   big\tworld ");
    }

    #[test]
    fn edit_after_separator_uses_parsed_text() {
        let mut session = session();
        run(&mut session, "edit -- title -x\n");

        assert_eq!(session.history().field_value("title"), "-x");
    }

    #[test]
    fn after_words_skips_leading_words() {
        assert_eq!(after_words("edit title a  b", 2), "a  b");
        assert_eq!(after_words(" edit\ttitle\t-x\ty", 2), "-x\ty");
        assert_eq!(after_words("edit title", 2), "");
        assert_eq!(after_words("edit title   ", 2), "");
    }

    #[test]
    fn edit_without_text_empties_field() {
        let mut session = session();
        run(&mut session, "edit tags a b\nedit tags\n");

        assert_eq!(session.history().field_value("tags"), "");
        assert_eq!(session.history().actions().len(), 2);
    }

    #[test]
    fn undo_reports_cascade() {
        let mut session = session();
        let first = session.assist(Suggestion::GenerateTitle);
        session.assist(Suggestion::EnhanceTitle);

        let out = run(&mut session, &format!("undo {}\n", short_id(first.id)));

        assert_eq!(out, "Undid 1 action and 1 later edit(s) to the same field\n");
        assert_eq!(session.history().undone_actions().len(), 2);
    }

    #[test]
    fn bad_command_does_not_stop_loop() {
        let mut session = session();
        let out = run(&mut session, "undo nope\nfrobnicate\nredo\n");

        assert_eq!(out, "Nothing to redo\n");
    }

    #[test]
    fn quit_stops_reading() {
        let mut session = session();
        run(&mut session, "assist suggest-tags\nquit\nclear\n");

        assert!(session.history().has_actions());
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut session = session();
        let out = run(&mut session, "\n   \nredo\n");

        assert_eq!(out, "Nothing to redo\n");
    }

    #[test]
    fn publish_then_clear() {
        let mut session = session();
        let out = run(&mut session, "publish\nassist generate-title\npublish\nclear\n");

        assert!(out.contains("Post published\n"));
        assert!(out.ends_with("Cleared\n"));
        assert!(!session.is_published());
    }

    #[test]
    fn show_json_exposes_projections() {
        let mut session = session();
        let first = session.assist(Suggestion::GenerateTitle);
        session.assist(Suggestion::SuggestTags);
        session.undo(&first.id.to_string()).unwrap();

        let mut out = Vec::new();
        execute(&mut session, SessionCommand::Show { json: true }, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["actions"].as_array().unwrap().len(), 1);
        assert_eq!(value["undoneActions"][0]["id"], first.id.to_string());
        assert_eq!(value["fieldValues"]["title"], "");
        assert_eq!(value["published"], false);
    }

    #[test]
    fn show_text_has_all_sections() {
        let mut session = session();
        session.assist(Suggestion::GenerateTitle);
        session.publish().unwrap();

        let text = format_snapshot(&session, Timestamp::now());

        assert!(text.starts_with("Action history (1)"));
        assert!(text.contains("\n\nCurrent state\n"));
        assert!(text.contains("\n\nRedo stack\nNothing to redo"));
        assert!(text.ends_with("Published"));
    }
}
