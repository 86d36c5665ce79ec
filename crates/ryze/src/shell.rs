// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ryze shell` command implementation.
//!
//! An interactive builder: each plain line is a turn (the first creates the
//! page, later ones refine it), and slash commands manage the session.

use std::path::PathBuf;

use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use ryze_config::RyzeConfig;
use ryze_core::{PluginAdapter, ProjectStore};
use ryze_generation::ExtractionQuality;
use ryze_sandbox::Device;
use ryze_session::{GenerationSession, SessionError};
use ryze_storage::SqliteProjectStore;
use secrecy::SecretString;
use tracing::debug;

use crate::app::{build_orchestrator, build_session};
use crate::error::CliError;
use crate::generate::write_file;
use crate::preview::preview_page;
use crate::projects::{fetch, summary_line};

const HELP: &str = "\
  <text>            describe the page, or the change to make
  /retry            resubmit the last description
  /save             save the current page as a project
  /preview <file>   write a sandboxed preview page
  /export <file>    write the raw HTML
  /history          list the turns of this page
  /projects         list saved projects
  /load <id>        open a saved project
  /delete <id>      delete a saved project
  /key [<key>]      set the personal API key, or clear it
  /clear            forget the page but keep the cooldown
  /reset            start over
  /quit             exit";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Describe(String),
    Retry,
    Save,
    Preview(PathBuf),
    Export(PathBuf),
    History,
    Projects,
    Load(String),
    Delete(String),
    /// `None` clears the personal key.
    Key(Option<String>),
    Clear,
    Reset,
    Help,
    Quit,
}

/// Parses a shell line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<ShellCommand, String>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Some(Ok(ShellCommand::Describe(trimmed.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    let command = match (name, arg) {
        ("retry", None) => ShellCommand::Retry,
        ("save", None) => ShellCommand::Save,
        ("history", None) => ShellCommand::History,
        ("projects", None) => ShellCommand::Projects,
        ("clear", None) => ShellCommand::Clear,
        ("reset", None) => ShellCommand::Reset,
        ("help", None) => ShellCommand::Help,
        ("quit" | "exit", None) => ShellCommand::Quit,
        ("preview", Some(path)) => ShellCommand::Preview(PathBuf::from(path)),
        ("export", Some(path)) => ShellCommand::Export(PathBuf::from(path)),
        ("load", Some(id)) => ShellCommand::Load(id.to_string()),
        ("delete", Some(id)) => ShellCommand::Delete(id.to_string()),
        ("key", key) => ShellCommand::Key(key.map(str::to_string)),
        ("preview" | "export", None) => return Some(Err(format!("usage: /{name} <file>"))),
        ("load" | "delete", None) => return Some(Err(format!("usage: /{name} <id>"))),
        (_, Some(_)) if is_known(name) => {
            return Some(Err(format!("/{name} takes no argument")));
        }
        _ => return Some(Err(format!("unknown command /{name}, try /help"))),
    };
    Some(Ok(command))
}

fn is_known(name: &str) -> bool {
    matches!(
        name,
        "retry" | "save" | "history" | "projects" | "clear" | "reset" | "help" | "quit" | "exit"
    )
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs the `ryze shell` interactive REPL.
pub async fn run_shell(config: &RyzeConfig) -> Result<(), CliError> {
    let orchestrator = build_orchestrator(config)?;
    let mut session = build_session(config, orchestrator, None);
    let store = SqliteProjectStore::from_config(&config.storage).await?;

    let mut rl = DefaultEditor::new().map_err(|e| {
        ryze_core::RyzeError::Internal(format!("failed to initialize readline: {e}"))
    })?;

    println!("{}", "ryze shell".bold().green());
    println!("Describe a page to start. Type {} for commands.\n", "/help".yellow());

    let prompt = format!("{}> ", "ryze".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let Some(parsed) = parse_line(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(&line);
                match parsed {
                    Ok(command) => match execute(&mut session, &store, command).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => report(&e),
                    },
                    Err(usage) => eprintln!("{}", usage.yellow()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    store.shutdown().await?;
    Ok(())
}

fn report(err: &CliError) {
    match err {
        CliError::Session(SessionError::CoolingDown { .. }) => {
            eprintln!("{}", err.user_message().yellow());
        }
        _ => {
            eprintln!("{}: {}", "error".red(), err.user_message());
            if let Some(detail) = err.detail() {
                debug!(%detail, "turn failed");
            }
        }
    }
}

/// Applies one command to the session.
pub async fn execute(
    session: &mut GenerationSession,
    store: &dyn ProjectStore,
    command: ShellCommand,
) -> Result<Flow, CliError> {
    match command {
        ShellCommand::Describe(text) => {
            if let Some(label) = progress_label(session, false) {
                println!("{}", label.dimmed());
            }
            let artifact = session.submit(&text).await?;
            announce(&artifact.html, artifact.attempts, artifact.quality);
        }
        ShellCommand::Retry => {
            if let Some(label) = progress_label(session, true) {
                println!("{}", label.dimmed());
            }
            let artifact = session.retry().await?;
            announce(&artifact.html, artifact.attempts, artifact.quality);
        }
        ShellCommand::Save => {
            let project = session.save(store).await?;
            println!("{} {} ({})", "saved".green(), project.name, project.id.dimmed());
        }
        ShellCommand::Preview(path) => {
            let html = current_html(session)?;
            let title = session
                .last_description()
                .map(ryze_session::project_name)
                .unwrap_or_else(|| "ryze".to_string());
            write_file(&path, &preview_page(html, &title, Device::Desktop))?;
            println!("{} {}", "preview".green(), path.display());
        }
        ShellCommand::Export(path) => {
            write_file(&path, current_html(session)?)?;
            println!("{} {}", "wrote".green(), path.display());
        }
        ShellCommand::History => {
            if session.history().is_empty() {
                println!("{}", "no turns yet".dimmed());
            }
            for (i, turn) in session.history().iter().enumerate() {
                println!("{:>3}. {turn}", i + 1);
            }
        }
        ShellCommand::Projects => {
            let projects = store.list().await?;
            if projects.is_empty() {
                println!("{}", "no saved projects".dimmed());
            }
            for project in &projects {
                println!("{}", summary_line(project));
            }
        }
        ShellCommand::Load(id) => {
            let project = fetch(store, &id).await?;
            session.load_project(&project);
            println!("{} {}", "loaded".green(), project.name);
        }
        ShellCommand::Delete(id) => {
            if !store.delete(&id).await? {
                return Err(CliError::ProjectNotFound(id));
            }
            println!("{} {id}", "deleted".green());
        }
        ShellCommand::Key(key) => {
            let set = key.is_some();
            session.set_personal_credential(key.map(SecretString::from));
            if set {
                println!("{}", "personal key set; cooldown no longer applies".green());
            } else {
                println!("{}", "personal key cleared; using the shared key".green());
            }
        }
        ShellCommand::Clear => {
            session.clear_context();
            println!("{}", "page cleared".dimmed());
        }
        ShellCommand::Reset => {
            session.reset();
            println!("{}", "session reset".dimmed());
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Line shown while a turn is in flight. `None` when the cooldown will
/// reject the turn before dispatch.
fn progress_label(session: &GenerationSession, retry: bool) -> Option<&'static str> {
    if !session.cooldown_remaining().is_zero() {
        return None;
    }
    Some(if retry {
        "retrying..."
    } else if session.artifact().is_some() {
        "refining..."
    } else {
        "generating..."
    })
}

fn current_html(session: &GenerationSession) -> Result<&str, CliError> {
    session
        .artifact()
        .ok_or(CliError::Session(SessionError::NothingToSave))
}

fn announce(html: &str, attempts: u32, quality: ExtractionQuality) {
    let mut line = format!("{} page updated ({} bytes", "ok".green(), html.len());
    if attempts > 1 {
        line.push_str(&format!(", {attempts} attempts"));
    }
    line.push(')');
    println!("{line}");
    if quality == ExtractionQuality::Degraded {
        println!(
            "{}",
            "warning: the answer was not clean HTML; leading text was dropped".yellow()
        );
    }
}
