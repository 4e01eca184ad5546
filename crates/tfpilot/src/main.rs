// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! tfpilot - Natural-language assistant for operating Terraform.
//!
//! This is the binary entry point.

mod app;
mod approval;
mod classify;
mod doctor;
mod session;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tfpilot_config::TfPilotConfig;
use tfpilot_core::TfPilotError;

/// tfpilot - Natural-language assistant for operating Terraform.
#[derive(Parser, Debug)]
#[command(name = "tfpilot", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the usual locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show how a request would be routed, without calling the model.
    Classify {
        /// The request text.
        #[arg(required = true)]
        text: Vec<String>,
        /// A prior request, oldest first. Repeat for more.
        #[arg(long = "history", value_name = "TEXT")]
        history: Vec<String>,
        /// Print the decision as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Answer one request and exit.
    Ask {
        /// The request text.
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Launch an interactive session.
    Shell,
    /// Check configuration, Terraform and provider connectivity.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => tfpilot_config::load_and_validate_path(path),
        None => tfpilot_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            tfpilot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level, config.agent.log_file.as_deref());

    let result = match cli.command {
        Some(Commands::Classify {
            text,
            history,
            json,
        }) => classify::run_classify(&config, &text.join(" "), &history, json),
        Some(Commands::Ask { text }) => run_ask(&config, &text.join(" ")).await,
        Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("tfpilot: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

async fn run_ask(config: &TfPilotConfig, request: &str) -> Result<(), TfPilotError> {
    let gate = approval::select_gate(config.terraform.human_in_the_loop);
    let dispatcher = app::build_dispatcher(config, gate)?;
    let outcome = dispatcher.dispatch(request, &[]).await?;
    shell::print_outcome(&outcome);
    Ok(())
}

fn print_config(config: &TfPilotConfig) -> Result<(), TfPilotError> {
    print!("{}", render_config(config)?);
    Ok(())
}

/// Effective configuration as TOML, with the API key masked.
fn render_config(config: &TfPilotConfig) -> Result<String, TfPilotError> {
    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| TfPilotError::Internal(format!("failed to render config: {e}")))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so stdout
/// stays clean for answers, or to `log_file` without ANSI colors.
fn init_tracing(log_level: &str, log_file: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tfpilot={log_level},warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false);

    let file = log_file.map(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| (path.to_string(), e))
    });
    match file {
        Some(Ok(file)) => builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        Some(Err((path, e))) => {
            builder.with_writer(std::io::stderr).init();
            tracing::warn!(path = %path, error = %e, "cannot open log file, logging to stderr");
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
}
