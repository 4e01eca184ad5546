// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subprocess gateway around the `terraform` binary.
//!
//! Every invocation is non-interactive (stdin closed, `TF_IN_AUTOMATION`
//! set), bounded by a timeout, and killed if the caller gives up on it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tfpilot_config::model::TerraformConfig;
use tfpilot_core::{TerraformCommand, TerraformGateway, TerraformResult, TfPilotError};
use tracing::{debug, warn};

use crate::output::parse_version;

const DEFAULT_WORKSPACE: &str = "default";

/// Runs Terraform subcommands in a fixed working directory.
#[derive(Debug)]
pub struct TerraformCli {
    binary: String,
    working_dir: PathBuf,
    workspace: Option<String>,
    timeout: Duration,
    version: OnceLock<String>,
}

impl TerraformCli {
    pub fn new(binary: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
            workspace: None,
            timeout: Duration::from_secs(300),
            version: OnceLock::new(),
        }
    }

    pub fn from_config(config: &TerraformConfig) -> Self {
        Self::new(&config.binary, &config.working_dir)
            .with_workspace(&config.workspace)
            .with_timeout(Duration::from_secs(config.command_timeout_secs))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run commands against `workspace` through `TF_WORKSPACE`.
    ///
    /// The `default` workspace needs no override and is ignored.
    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        let workspace = workspace.into();
        self.workspace = (workspace != DEFAULT_WORKSPACE && !workspace.is_empty()).then_some(workspace);
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    async fn execute(
        &self,
        args: &[String],
        pin_workspace: bool,
        is_success: impl Fn(i32) -> bool,
    ) -> Result<TerraformResult, TfPilotError> {
        let line = format!("{} {}", self.binary, args.join(" "));
        debug!(command = %line, dir = %self.working_dir.display(), "running terraform");

        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.args(args)
            .current_dir(&self.working_dir)
            .env("TF_IN_AUTOMATION", "1")
            .stdin(Stdio::null())
            .kill_on_drop(true);
        if pin_workspace {
            if let Some(workspace) = &self.workspace {
                cmd.env("TF_WORKSPACE", workspace);
            }
        }

        let start = Instant::now();
        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(TfPilotError::Terraform {
                    message: format!("failed to run `{line}`: {e}"),
                    source: Some(Box::new(e)),
                });
            }
            Err(_) => {
                warn!(command = %line, timeout = ?self.timeout, "terraform command timed out");
                return Ok(TerraformResult {
                    success: false,
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: format!("command timed out after {}s", self.timeout.as_secs_f64()),
                    command: line,
                    duration: start.elapsed(),
                });
            }
        };

        let exit_code = output.status.code().unwrap_or(-1);
        let result = TerraformResult {
            success: is_success(exit_code),
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            command: line,
            duration: start.elapsed(),
        };

        if result.success {
            debug!(command = %result.command, exit_code, elapsed = ?result.duration, "terraform finished");
        } else {
            warn!(
                command = %result.command,
                exit_code,
                stderr = %result.stderr.trim(),
                "terraform command failed"
            );
        }
        Ok(result)
    }
}

#[async_trait]
impl TerraformGateway for TerraformCli {
    async fn run(&self, command: &TerraformCommand) -> Result<TerraformResult, TfPilotError> {
        // TF_WORKSPACE conflicts with explicit workspace commands.
        let pin_workspace = !matches!(
            command,
            TerraformCommand::WorkspaceList | TerraformCommand::WorkspaceSelect { .. }
        );
        self.execute(&command.args(), pin_workspace, |code| {
            command.is_success_exit(code)
        })
        .await
    }

    async fn version(&self) -> Result<String, TfPilotError> {
        if let Some(version) = self.version.get() {
            return Ok(version.clone());
        }

        let result = self
            .execute(&["version".to_string()], false, |code| code == 0)
            .await?;
        if !result.success {
            return Err(TfPilotError::terraform(format!(
                "`{}` failed: {}",
                result.command,
                result.stderr.trim()
            )));
        }
        let version = parse_version(&result.stdout).ok_or_else(|| {
            TfPilotError::terraform("could not find a version in `terraform version` output")
        })?;
        Ok(self.version.get_or_init(|| version).clone())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    use serial_test::serial;
    use tempfile::TempDir;

    /// Write an executable fake `terraform` into a fresh directory.
    fn fake_terraform(body: &str) -> (TempDir, TerraformCli) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terraform");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let cli = TerraformCli::new(path.display().to_string(), dir.path());
        (dir, cli)
    }

    const SCRIPT: &str = r#"
case "$1" in
  version) echo "Terraform v1.9.5"; echo "on linux_amd64" ;;
  plan) echo "Plan: 2 to add, 1 to change, 0 to destroy."; exit 2 ;;
  validate) echo "Error: Unsupported argument" >&2; exit 1 ;;
  *) echo "args: $*"; echo "workspace: ${TF_WORKSPACE:-none}"; echo "auto: $TF_IN_AUTOMATION" ;;
esac
"#;

    #[tokio::test]
    #[serial]
    async fn plan_with_changes_is_success() {
        let (_dir, cli) = fake_terraform(SCRIPT);
        let result = cli
            .run(&TerraformCommand::Plan {
                destroy: false,
                var_file: None,
            })
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, 2);
        assert!(result.stdout.contains("2 to add"));
        assert!(result.command.ends_with("plan -input=false -no-color -detailed-exitcode"));
    }

    #[tokio::test]
    #[serial]
    async fn nonzero_exit_is_a_failed_result_not_an_error() {
        let (_dir, cli) = fake_terraform(SCRIPT);
        let result = cli.run(&TerraformCommand::Validate).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("Unsupported argument"));
    }

    #[tokio::test]
    #[serial]
    async fn workspace_is_pinned_through_env() {
        let (_dir, cli) = fake_terraform(SCRIPT);
        let cli = cli.with_workspace("staging");

        let show = cli.run(&TerraformCommand::Show).await.unwrap();
        assert!(show.stdout.contains("workspace: staging"));
        assert!(show.stdout.contains("auto: 1"));

        let list = cli.run(&TerraformCommand::WorkspaceList).await.unwrap();
        assert!(list.stdout.contains("workspace: none"));
    }

    #[tokio::test]
    #[serial]
    async fn default_workspace_sets_no_env() {
        let (_dir, cli) = fake_terraform(SCRIPT);
        let cli = cli.with_workspace("default");
        let show = cli.run(&TerraformCommand::Show).await.unwrap();
        assert!(show.stdout.contains("workspace: none"));
    }

    #[tokio::test]
    #[serial]
    async fn version_is_parsed_and_cached() {
        let (dir, cli) = fake_terraform(SCRIPT);
        assert_eq!(cli.version().await.unwrap(), "1.9.5");

        // The cached value survives the binary disappearing.
        std::fs::remove_file(dir.path().join("terraform")).unwrap();
        assert_eq!(cli.version().await.unwrap(), "1.9.5");
    }

    #[tokio::test]
    #[serial]
    async fn slow_command_times_out() {
        let (_dir, cli) = fake_terraform("sleep 5");
        let cli = cli.with_timeout(Duration::from_millis(200));
        let result = cli.run(&TerraformCommand::Show).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, -1);
        assert!(result.stderr.contains("timed out"));
    }

    #[tokio::test]
    #[serial]
    async fn missing_binary_is_a_terraform_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = TerraformCli::new(dir.path().join("nope").display().to_string(), dir.path());
        let err = cli.run(&TerraformCommand::Validate).await.unwrap_err();
        assert!(matches!(err, TfPilotError::Terraform { .. }));
    }

    #[test]
    fn from_config_applies_settings() {
        let mut config = TerraformConfig::default();
        config.binary = "/opt/tf/terraform".into();
        config.working_dir = "infra".into();
        config.workspace = "prod".into();
        config.command_timeout_secs = 42;

        let cli = TerraformCli::from_config(&config);
        assert_eq!(cli.binary(), "/opt/tf/terraform");
        assert_eq!(cli.working_dir(), Path::new("infra"));
        assert_eq!(cli.workspace.as_deref(), Some("prod"));
        assert_eq!(cli.timeout, Duration::from_secs(42));
    }
}
