// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible chat provider for tfpilot.
//!
//! Implements [`ChatProvider`] for any server speaking the chat-completions
//! protocol: api.openai.com, Ollama, vLLM, LM Studio.

pub mod client;
pub mod types;

use async_trait::async_trait;
use tfpilot_config::model::ProviderConfig;
use tfpilot_core::{
    ChatMessage, ChatProvider, ChatRequest, ChatResponse, Role, TfPilotError, TokenUsage,
    ToolCall, ToolDefinition,
};
use tracing::{debug, info, warn};

use crate::client::OpenAiClient;
use crate::types::{
    CompletionRequest, CompletionResponse, WireFunction, WireFunctionCall, WireMessage, WireTool,
    WireToolCall,
};

/// Chat provider backed by [`OpenAiClient`].
pub struct OpenAiProvider {
    client: OpenAiClient,
    name: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, TfPilotError> {
        let client = OpenAiClient::new(config)?;
        info!(
            kind = %config.kind,
            model = %config.model,
            base_url = %client.base_url(),
            "chat provider initialized"
        );
        Ok(Self {
            client,
            name: config.kind.to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn client(&self) -> &OpenAiClient {
        &self.client
    }

    fn to_completion_request(&self, request: &ChatRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(to_wire_message).collect(),
            tools: request.tools.iter().map(to_wire_tool).collect(),
            max_tokens: request.max_tokens.unwrap_or(self.max_tokens),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TfPilotError> {
        let wire = self.to_completion_request(&request);
        debug!(
            messages = wire.messages.len(),
            tools = wire.tools.len(),
            "sending completion request"
        );
        let response = self.client.complete(&wire).await?;
        from_completion_response(response)
    }
}

fn to_wire_message(message: &ChatMessage) -> WireMessage {
    WireMessage {
        role: message.role.to_string(),
        content: message.content.clone(),
        tool_calls: message
            .tool_calls
            .iter()
            .map(|call| WireToolCall {
                id: call.id.clone(),
                call_type: "function".into(),
                function: WireFunctionCall {
                    name: call.name.clone(),
                    arguments: call.arguments.to_string(),
                },
            })
            .collect(),
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn to_wire_tool(tool: &ToolDefinition) -> WireTool {
    WireTool {
        tool_type: "function".into(),
        function: WireFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

fn from_completion_response(response: CompletionResponse) -> Result<ChatResponse, TfPilotError> {
    let usage = response
        .usage
        .map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TfPilotError::provider("response contained no choices"))?;

    let role = match choice.message.role.as_str() {
        "assistant" | "" => Role::Assistant,
        other => other.parse().unwrap_or(Role::Assistant),
    };

    let tool_calls = choice
        .message
        .tool_calls
        .into_iter()
        .map(|call| ToolCall {
            arguments: parse_arguments(&call.function.name, &call.function.arguments),
            id: call.id,
            name: call.function.name,
        })
        .collect();

    Ok(ChatResponse {
        message: ChatMessage {
            role,
            content: choice.message.content.filter(|c| !c.is_empty()),
            tool_calls,
            tool_call_id: None,
        },
        usage,
        finish_reason: choice.finish_reason,
    })
}

/// Decode tool arguments; local models sometimes emit invalid JSON.
fn parse_arguments(tool: &str, raw: &str) -> serde_json::Value {
    if raw.trim().is_empty() {
        return serde_json::json!({});
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(tool, error = %e, "tool arguments are not valid JSON, passing raw string");
        serde_json::Value::String(raw.to_string())
    })
}
