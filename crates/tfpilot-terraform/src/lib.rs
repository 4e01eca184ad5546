// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terraform CLI gateway for tfpilot.
//!
//! [`TerraformCli`] runs the real `terraform` binary as a subprocess.
//! The [`output`] module turns its text output into typed values.

pub mod cli;
pub mod output;

pub use cli::TerraformCli;
pub use output::{
    check_supported, parse_plan_summary, parse_version, parse_workspaces, PlanSummary, Workspace,
    MINIMUM_VERSION,
};
