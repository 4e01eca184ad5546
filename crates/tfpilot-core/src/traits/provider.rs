// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat provider trait for hosted LLM APIs.

use async_trait::async_trait;

use crate::error::TfPilotError;
use crate::types::{ChatRequest, ChatResponse};

/// A chat-completion backend with tool calling.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name (e.g. `openai`, `openai_compatible`).
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Sends one completion request and returns the full response.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TfPilotError>;
}
