// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits at the seams between tfpilot crates.
//!
//! All traits use `#[async_trait]` so implementations can be held as
//! `Arc<dyn Trait>` and swapped for mocks in tests.

pub mod approval;
pub mod processor;
pub mod provider;
pub mod terraform;

pub use approval::{ApprovalGate, AutoApprove, DenyAll};
pub use processor::Processor;
pub use provider::ChatProvider;
pub use terraform::TerraformGateway;
