// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway trait for running Terraform subcommands.

use async_trait::async_trait;

use crate::error::TfPilotError;
use crate::types::{TerraformCommand, TerraformResult};

/// Executes Terraform subcommands and returns structured results.
///
/// Implementations return `Ok` for commands that ran, whatever their exit
/// code, and reserve `Err` for failures to run the command at all.
#[async_trait]
pub trait TerraformGateway: Send + Sync {
    async fn run(&self, command: &TerraformCommand) -> Result<TerraformResult, TfPilotError>;

    /// Version string of the underlying binary, e.g. `1.9.5`.
    async fn version(&self) -> Result<String, TfPilotError>;
}
