// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tfpilot shell` command implementation.
//!
//! Interactive REPL with readline history. Every line that is not a slash
//! command is dispatched, and the last `agent.history_window` requests are
//! passed along so the router can see conversation momentum.

use std::path::PathBuf;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tfpilot_config::TfPilotConfig;
use tfpilot_core::TfPilotError;
use tfpilot_router::{DispatchOutcome, Dispatcher, Route};
use tracing::{debug, warn};

use crate::approval;
use crate::app;
use crate::session::{Session, Turn};

const HELP: &str = "\
/help             show this help
/status           show provider, Terraform and routing settings
/history          list the requests in this session
/clear            forget the session history
/export <file>    save the conversation as JSON
/import <file>    load a conversation saved with /export
/tokens           show tokens used in this session
/quit             leave the shell";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Status,
    History,
    Clear,
    Export(PathBuf),
    Import(PathBuf),
    Tokens,
    Quit,
    /// A slash command that needs an argument was given none.
    MissingArgument(&'static str),
    Unknown(String),
    /// Anything else is a request for the assistant.
    Request(String),
}

/// Parse a line of input. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<ShellCommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.starts_with('/') {
        return Some(ShellCommand::Request(trimmed.to_string()));
    }

    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (trimmed, ""),
    };
    let command = match name {
        "/help" | "/?" => ShellCommand::Help,
        "/status" => ShellCommand::Status,
        "/history" => ShellCommand::History,
        "/clear" => ShellCommand::Clear,
        "/tokens" => ShellCommand::Tokens,
        "/quit" | "/exit" => ShellCommand::Quit,
        "/export" if arg.is_empty() => ShellCommand::MissingArgument("/export"),
        "/export" => ShellCommand::Export(PathBuf::from(arg)),
        "/import" if arg.is_empty() => ShellCommand::MissingArgument("/import"),
        "/import" => ShellCommand::Import(PathBuf::from(arg)),
        other => ShellCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Runs the `tfpilot shell` interactive REPL.
pub async fn run_shell(config: TfPilotConfig) -> Result<(), TfPilotError> {
    let gate = approval::select_gate(config.terraform.human_in_the_loop);
    let dispatcher = app::build_dispatcher(&config, gate)?;
    let mut session = Session::new(config.agent.history_window);

    let mut rl = DefaultEditor::new()
        .map_err(|e| TfPilotError::Internal(format!("failed to initialize readline: {e}")))?;
    let history_path = readline_history_path();
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    println!("{}", "tfpilot shell".bold().green());
    println!(
        "Working in {} with {}. Type {} for commands.\n",
        config.terraform.working_dir.cyan(),
        config.provider.model.cyan(),
        "/help".yellow()
    );

    let prompt = format!("{}> ", "tfpilot".green());
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };
        let Some(command) = parse_line(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.trim());

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Status => print_status(&config, &dispatcher, &session),
            ShellCommand::History => print_history(&session),
            ShellCommand::Clear => {
                session.clear();
                println!("{}", "session history cleared".dimmed());
            }
            ShellCommand::Tokens => {
                let usage = session.usage();
                println!(
                    "{} prompt + {} completion = {} tokens",
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total()
                );
            }
            ShellCommand::Export(path) => match session.export(&path) {
                Ok(n) => println!("exported {n} turn(s) to {}", path.display()),
                Err(e) => eprintln!("{}: {e}", "error".red()),
            },
            ShellCommand::Import(path) => match session.import(&path) {
                Ok(n) => println!("imported {n} turn(s) from {}", path.display()),
                Err(e) => eprintln!("{}: {e}", "error".red()),
            },
            ShellCommand::MissingArgument(name) => {
                eprintln!("{}: {name} needs a file path", "error".red());
            }
            ShellCommand::Unknown(name) => {
                eprintln!("unknown command {name}; type {} for the list", "/help".yellow());
            }
            ShellCommand::Request(request) => {
                let history = session.recent_requests();
                match dispatcher.dispatch(&request, &history).await {
                    Ok(outcome) => {
                        print_outcome(&outcome);
                        session.record(Turn::from_outcome(&request, &outcome));
                    }
                    Err(e) if e.is_invalid_input() => {
                        eprintln!("{}", e.to_string().yellow());
                    }
                    Err(e) => {
                        warn!(error = %e, "request failed");
                        eprintln!("{}: {e}", "error".red());
                    }
                }
            }
        }
    }

    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(path) {
            debug!(error = %e, "could not save readline history");
        }
    }

    let usage = session.usage();
    if usage.total() > 0 {
        println!("{}", format!("session tokens: {}", usage.total()).dimmed());
    }
    Ok(())
}

/// Print a dispatched answer with a one-line route header.
pub fn print_outcome(outcome: &DispatchOutcome) {
    let route = match outcome.route {
        Route::Orchestrated => "orchestrated".magenta(),
        Route::Fast => "fast".cyan(),
    };
    println!(
        "{}",
        format!(
            "[{route} | score {:.2} | {} tokens]",
            outcome.decision.confidence_score,
            outcome.response.usage.total()
        )
        .dimmed()
    );
    println!("{}", outcome.response.text);
    for note in &outcome.response.notes {
        println!("{} {note}", "note:".yellow());
    }
    println!();
}

fn print_status(config: &TfPilotConfig, dispatcher: &Dispatcher, session: &Session) {
    let orchestration = if dispatcher.orchestration_available() {
        "available".green()
    } else {
        "unavailable".yellow()
    };
    println!("provider:       {} ({})", config.provider.model, config.provider.base_url);
    println!(
        "terraform:      {} in {} (workspace {})",
        config.terraform.binary, config.terraform.working_dir, config.terraform.workspace
    );
    println!("orchestration:  {orchestration}");
    println!(
        "threshold:      {:.2}",
        dispatcher.router().config().complexity_threshold
    );
    println!(
        "approval:       {}",
        if config.terraform.human_in_the_loop {
            "required for apply/destroy"
        } else {
            "disabled"
        }
    );
    println!(
        "session:        {} turn(s), history window {}",
        session.turns().len(),
        config.agent.history_window
    );
}

fn print_history(session: &Session) {
    if session.turns().is_empty() {
        println!("{}", "no requests yet".dimmed());
        return;
    }
    for (i, turn) in session.turns().iter().enumerate() {
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            turn.timestamp.format("%H:%M:%S").to_string().dimmed(),
            format!("[{}]", turn.route).dimmed(),
            turn.request
        );
    }
}

fn readline_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("tfpilot").join("shell_history.txt"))
}
