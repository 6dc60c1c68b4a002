//! CLI interface for Timeline.
//!
//! History lives only as long as the process, so everything happens
//! inside one invocation:
//!
//! - `timeline session`: read edit/undo/redo commands from stdin (the default).
//! - `timeline walkthrough`: replay the cascade-undo scenario and print each step.

mod format;
mod session;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;

use crate::config::Config;
use crate::session::Session;

use self::session::{format_snapshot, run_loop};

/// Timeline: an edit history you can take back, one field at a time.
#[derive(Debug, Parser)]
#[command(name = "timeline", after_long_help = SESSION_HELP)]
pub struct Cli {
    /// Config file to use instead of `TIMELINE_CONFIG` or `~/.timeline/config.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

const SESSION_HELP: &str = r"Session commands (one per line):
  assist generate-title | enhance-title
         generate-description | expand-description | enrich-description
         suggest-tags | complete-tags
  edit <field> <text...>
  undo <id>          full UUID or unambiguous prefix
  redo
  publish
  clear
  history | state | show [--json]
  quit

Undoing an action also undoes every later edit to the same field.
Redo reapplies one action at a time, most recently undone first.";

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an editing session reading commands from stdin.
    Session,

    /// Replay a short scripted session showing cascade undo and redo.
    Walkthrough,
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let mut session = Session::new(config.fields);

    match cli.command.unwrap_or(Command::Session) {
        Command::Session => cmd_session(&mut session),
        Command::Walkthrough => cmd_walkthrough(&mut session, &mut io::stdout().lock()),
    }
}

fn cmd_session(session: &mut Session) -> Result<(), String> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = io::stdout().lock();

    run_loop(session, stdin.lock(), &mut stdout, prompt)
        .map_err(|e| format!("session ended unexpectedly: {e}"))?;

    if prompt {
        writeln!(stdout).map_err(|e| format!("failed to write output: {e}"))?;
    }
    Ok(())
}

/// Two title edits and a tag edit, then undo the first title edit:
/// both title edits go, the tags stay. Redo brings them back one at a time.
fn cmd_walkthrough(session: &mut Session, out: &mut impl Write) -> Result<(), String> {
    let first = session.edit("title", "A").map_err(|e| e.to_string())?;
    session.edit("title", "AB").map_err(|e| e.to_string())?;
    session.edit("tags", "x").map_err(|e| e.to_string())?;
    step(out, "Three edits applied", session)?;

    session
        .undo(&first.id.to_string())
        .map_err(|e| e.to_string())?;
    step(out, "Undid the first title edit", session)?;

    session.redo();
    step(out, "Redo", session)?;

    session.redo();
    step(out, "Redo again", session)
}

fn step(out: &mut impl Write, heading: &str, session: &Session) -> Result<(), String> {
    let snapshot = format_snapshot(session, Timestamp::now());
    writeln!(out, "── {heading} ──\n{snapshot}\n").map_err(|e| format!("failed to write output: {e}"))
}
