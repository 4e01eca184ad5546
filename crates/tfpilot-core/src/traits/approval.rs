// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-in-the-loop approval for destructive actions.

use async_trait::async_trait;

/// Asks an operator whether a destructive action may proceed.
#[async_trait]
pub trait ApprovalGate: Send + Sync {
    /// Returns true when `action` (e.g. `terraform apply`) is approved.
    async fn approve(&self, action: &str) -> bool;
}

/// Approves everything. Used when human-in-the-loop is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoApprove;

#[async_trait]
impl ApprovalGate for AutoApprove {
    async fn approve(&self, _action: &str) -> bool {
        true
    }
}

/// Denies everything. Used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

#[async_trait]
impl ApprovalGate for DenyAll {
    async fn approve(&self, action: &str) -> bool {
        tracing::info!(action, "destructive action denied (no interactive operator)");
        false
    }
}
