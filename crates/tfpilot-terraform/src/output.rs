// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsers for Terraform's human-readable output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tfpilot_core::TfPilotError;

/// Oldest Terraform release tfpilot is tested against.
pub const MINIMUM_VERSION: &str = "1.0.0";

static PLAN_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) to (add|change|destroy)").unwrap());

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Terraform v(\d+\.\d+\.\d+(?:-[0-9A-Za-z.]+)?)").unwrap());

/// Resource counts from a plan's summary line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub add: u32,
    pub change: u32,
    pub destroy: u32,
}

impl PlanSummary {
    pub fn has_changes(&self) -> bool {
        self.add + self.change + self.destroy > 0
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to add, {} to change, {} to destroy",
            self.add, self.change, self.destroy
        )
    }
}

/// Extract the summary from `terraform plan` output.
///
/// Returns `None` when the output holds neither a `Plan:` line nor
/// `No changes.`, e.g. when the plan failed.
pub fn parse_plan_summary(output: &str) -> Option<PlanSummary> {
    for line in output.lines().map(str::trim) {
        if line.starts_with("No changes.") {
            return Some(PlanSummary::default());
        }
        let Some(rest) = line.strip_prefix("Plan:") else {
            continue;
        };

        let mut summary = PlanSummary::default();
        for caps in PLAN_COUNT.captures_iter(rest) {
            let count = caps[1].parse().unwrap_or(u32::MAX);
            match &caps[2] {
                "add" => summary.add = count,
                "change" => summary.change = count,
                _ => summary.destroy = count,
            }
        }
        return Some(summary);
    }
    None
}

/// One entry of `terraform workspace list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workspace {
    pub name: String,
    pub current: bool,
}

/// Parse `terraform workspace list`; the current workspace is starred.
pub fn parse_workspaces(output: &str) -> Vec<Workspace> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix('*') {
            Some(name) => Workspace {
                name: name.trim().to_string(),
                current: true,
            },
            None => Workspace {
                name: line.to_string(),
                current: false,
            },
        })
        .collect()
}

/// Version number from `terraform version` output, without the `v`.
pub fn parse_version(output: &str) -> Option<String> {
    VERSION_LINE
        .captures(output)
        .map(|caps| caps[1].to_string())
}

/// Parse `version` and reject releases older than [`MINIMUM_VERSION`].
pub fn check_supported(version: &str) -> Result<semver::Version, TfPilotError> {
    let parsed = semver::Version::parse(version).map_err(|e| TfPilotError::Terraform {
        message: format!("unrecognized terraform version `{version}`"),
        source: Some(Box::new(e)),
    })?;
    let minimum =
        semver::Version::parse(MINIMUM_VERSION).map_err(|e| TfPilotError::Internal(e.to_string()))?;
    if parsed < minimum {
        return Err(TfPilotError::terraform(format!(
            "terraform {parsed} is older than the minimum supported {MINIMUM_VERSION}"
        )));
    }
    Ok(parsed)
}
