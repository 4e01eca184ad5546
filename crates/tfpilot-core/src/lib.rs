// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for tfpilot.
//!
//! Provides the error type, the chat and Terraform value types, and the
//! capability traits (`Processor`, `ChatProvider`, `TerraformGateway`,
//! `ApprovalGate`) that the other crates implement and consume.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TfPilotError;
pub use traits::{
    ApprovalGate, AutoApprove, ChatProvider, DenyAll, Processor, TerraformGateway,
};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ProcessorResponse, Role, TerraformCommand,
    TerraformResult, TokenUsage, ToolCall, ToolDefinition,
};
