// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request processors for tfpilot.
//!
//! - [`FastProcessor`]: one model conversation with the Terraform tool set
//! - [`OrchestratedProcessor`]: concurrent domain specialists plus a synthesis call
//!
//! Both implement [`tfpilot_core::Processor`] and are wired together by
//! `tfpilot_router::Dispatcher`.

pub mod conversation;
pub mod fast;
pub mod orchestrator;
pub mod specialist;
pub mod tools;

#[cfg(test)]
mod testing;

pub use fast::FastProcessor;
pub use orchestrator::OrchestratedProcessor;
pub use tools::{terraform_tools, Tool, ToolOutput, ToolRegistry};
