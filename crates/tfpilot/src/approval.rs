// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive approval prompt for destructive Terraform commands.

use std::io::{BufRead, IsTerminal, Write};
use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use tfpilot_core::{ApprovalGate, AutoApprove, DenyAll};
use tracing::info;

/// Asks on the terminal and waits for `y`/`yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinApproval;

#[async_trait]
impl ApprovalGate for StdinApproval {
    async fn approve(&self, action: &str) -> bool {
        let action = action.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            let _ = write!(
                stderr,
                "{} run `{}`? [y/N] ",
                "approve".yellow().bold(),
                action
            );
            let _ = stderr.flush();
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line).map(|_| line)
        })
        .await;

        let approved = matches!(answer, Ok(Ok(line)) if is_yes(&line));
        info!(approved, "operator answered approval prompt");
        approved
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Pick the gate for this run.
///
/// Without human-in-the-loop everything is approved. With it, an operator
/// must be present on a terminal; otherwise destructive commands are denied.
pub fn select_gate(human_in_the_loop: bool) -> Arc<dyn ApprovalGate> {
    if !human_in_the_loop {
        Arc::new(AutoApprove)
    } else if std::io::stdin().is_terminal() {
        Arc::new(StdinApproval)
    } else {
        Arc::new(DenyAll)
    }
}
