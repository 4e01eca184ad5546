// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tfpilot doctor` command implementation.
//!
//! Checks that the configuration, the Terraform binary, the working
//! directory and the model endpoint are usable before a session starts.

use std::io::IsTerminal;
use std::path::Path;
use std::time::{Duration, Instant};

use tfpilot_config::TfPilotConfig;
use tfpilot_core::{TerraformGateway, TfPilotError};
use tfpilot_openai::OpenAiProvider;
use tfpilot_terraform::{check_supported, TerraformCli, MINIMUM_VERSION};

/// How long the provider check waits before giving up.
const PROVIDER_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `tfpilot doctor` command. `--plain` disables colored output.
pub async fn run_doctor(config: &TfPilotConfig, plain: bool) -> Result<(), TfPilotError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let results = vec![
        check_config(config),
        check_working_dir(Path::new(&config.terraform.working_dir)),
        check_terraform(&TerraformCli::from_config(&config.terraform)).await,
        check_provider(config).await,
    ];

    println!();
    println!("  tfpilot doctor");
    println!("  {}", "-".repeat(50));

    let mut issues = 0;
    for result in &results {
        if result.status != CheckStatus::Pass {
            issues += 1;
        }
        println!("{}", format_line(result, use_color));
    }

    println!();
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(())
}

fn format_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    if use_color {
        use colored::Colorize;
        let (symbol, message) = match result.status {
            CheckStatus::Pass => ("✓".green(), result.message.normal()),
            CheckStatus::Warn => ("!".yellow(), result.message.yellow()),
            CheckStatus::Fail => ("✗".red(), result.message.red()),
        };
        format!("    {symbol} {:<20} {message} ({duration_ms}ms)", result.name)
    } else {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        format!(
            "    {tag} {:<20} {} ({duration_ms}ms)",
            result.name, result.message
        )
    }
}

/// The config was already loaded and validated; report what it resolved to.
fn check_config(config: &TfPilotConfig) -> CheckResult {
    let start = Instant::now();
    let orchestration = if config.orchestration.enabled {
        "orchestration on"
    } else {
        "orchestration off"
    };
    CheckResult::new(
        "Configuration",
        CheckStatus::Pass,
        format!(
            "valid ({orchestration}, threshold {:.2})",
            config.routing.complexity_threshold
        ),
        start,
    )
}

fn check_working_dir(dir: &Path) -> CheckResult {
    let start = Instant::now();
    let name = "Working directory";
    if !dir.is_dir() {
        return CheckResult::new(
            name,
            CheckStatus::Fail,
            format!("{} does not exist", dir.display()),
            start,
        );
    }

    let tf_files = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "tf"))
                .count()
        })
        .unwrap_or(0);

    match tf_files {
        0 => CheckResult::new(
            name,
            CheckStatus::Warn,
            format!("no .tf files in {}", dir.display()),
            start,
        ),
        n => CheckResult::new(
            name,
            CheckStatus::Pass,
            format!("{n} .tf file(s) in {}", dir.display()),
            start,
        ),
    }
}

async fn check_terraform(cli: &TerraformCli) -> CheckResult {
    let start = Instant::now();
    let name = "Terraform";
    let version = match cli.version().await {
        Ok(v) => v,
        Err(e) => return CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
    };
    match check_supported(&version) {
        Ok(_) => CheckResult::new(
            name,
            CheckStatus::Pass,
            format!("{} v{version}", cli.binary()),
            start,
        ),
        Err(_) => CheckResult::new(
            name,
            CheckStatus::Warn,
            format!("v{version} is older than {MINIMUM_VERSION}"),
            start,
        ),
    }
}

async fn check_provider(config: &TfPilotConfig) -> CheckResult {
    let start = Instant::now();
    let name = "Model provider";
    let provider = match OpenAiProvider::new(&config.provider) {
        Ok(p) => p,
        Err(e) => return CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
    };

    let listing = tokio::time::timeout(PROVIDER_CHECK_TIMEOUT, provider.client().list_models()).await;
    match listing {
        Err(_) => CheckResult::new(
            name,
            CheckStatus::Fail,
            format!("timeout ({}s)", PROVIDER_CHECK_TIMEOUT.as_secs()),
            start,
        ),
        Ok(Err(e)) => CheckResult::new(name, CheckStatus::Fail, e.to_string(), start),
        Ok(Ok(models)) if models.iter().any(|m| m == &config.provider.model) => CheckResult::new(
            name,
            CheckStatus::Pass,
            format!("{} serves {}", provider.client().base_url(), config.provider.model),
            start,
        ),
        Ok(Ok(_)) => CheckResult::new(
            name,
            CheckStatus::Warn,
            format!(
                "{} is reachable but does not list {}",
                provider.client().base_url(),
                config.provider.model
            ),
            start,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_use_bracket_tags() {
        let result = CheckResult {
            name: "Terraform".into(),
            status: CheckStatus::Warn,
            message: "old".into(),
            duration: Duration::from_millis(3),
        };
        assert_eq!(
            format_line(&result, false),
            "    [WARN] Terraform            old (3ms)"
        );
    }

    #[test]
    fn default_config_passes() {
        let result = check_config(&TfPilotConfig::default());
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.contains("orchestration off"));
    }

    #[test]
    fn missing_working_dir_fails() {
        let result = check_working_dir(Path::new("/nonexistent/tfpilot/workdir"));
        assert_eq!(result.status, CheckStatus::Fail);
    }

    #[test]
    fn working_dir_without_tf_files_warns() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(check_working_dir(dir.path()).status, CheckStatus::Warn);

        std::fs::write(dir.path().join("main.tf"), "").unwrap();
        let result = check_working_dir(dir.path());
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.starts_with("1 .tf file(s)"));
    }

    #[tokio::test]
    async fn missing_binary_fails() {
        let cli = TerraformCli::new("/nonexistent/bin/terraform", ".");
        let result = check_terraform(&cli).await;
        assert_eq!(result.status, CheckStatus::Fail);
    }
}
