// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory doubles for the provider and Terraform gateway.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tfpilot_core::{
    ChatMessage, ChatProvider, ChatRequest, ChatResponse, TerraformCommand, TerraformGateway,
    TerraformResult, TfPilotError, TokenUsage, ToolCall,
};

/// Records every command and answers with a configurable result.
pub struct MockGateway {
    commands: Mutex<Vec<TerraformCommand>>,
    response: Mutex<(i32, String, String)>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            commands: Mutex::new(Vec::new()),
            response: Mutex::new((0, String::new(), String::new())),
        })
    }

    pub fn respond_with(&self, exit_code: i32, stdout: &str, stderr: &str) {
        *self.response.lock().unwrap() = (exit_code, stdout.to_string(), stderr.to_string());
    }

    pub fn commands(&self) -> Vec<TerraformCommand> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl TerraformGateway for MockGateway {
    async fn run(&self, command: &TerraformCommand) -> Result<TerraformResult, TfPilotError> {
        self.commands.lock().unwrap().push(command.clone());
        let (exit_code, stdout, stderr) = self.response.lock().unwrap().clone();
        Ok(TerraformResult {
            success: command.is_success_exit(exit_code),
            exit_code,
            stdout,
            stderr,
            command: format!("terraform {}", command.args().join(" ")),
            duration: Duration::from_millis(5),
        })
    }

    async fn version(&self) -> Result<String, TfPilotError> {
        Ok("1.9.5".into())
    }
}

/// How the scripted provider answers one request.
pub enum Reply {
    Text(String),
    Tools(Vec<(String, serde_json::Value)>),
    Fail(String),
    /// Sleep, then answer with text.
    Slow(Duration, String),
}

/// Provider that answers from a queue and records every request.
///
/// Replies can also be routed by a marker in the system prompt, which lets
/// concurrent callers get distinct answers.
pub struct ScriptedProvider {
    queue: Mutex<VecDeque<Reply>>,
    by_marker: Mutex<Vec<(String, Reply)>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            queue: Mutex::new(replies.into()),
            by_marker: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer requests whose system prompt contains `marker` with `reply`.
    pub fn on_system(self: &Arc<Self>, marker: &str, reply: Reply) -> Arc<Self> {
        self.by_marker
            .lock()
            .unwrap()
            .push((marker.to_string(), reply));
        self.clone()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, request: &ChatRequest) -> Option<Reply> {
        let system = request
            .messages
            .first()
            .map(|m| m.text_or_empty().to_string())
            .unwrap_or_default();
        let mut by_marker = self.by_marker.lock().unwrap();
        if let Some(pos) = by_marker.iter().position(|(m, _)| system.contains(m.as_str())) {
            return Some(by_marker.remove(pos).1);
        }
        drop(by_marker);
        self.queue.lock().unwrap().pop_front()
    }
}

fn usage() -> TokenUsage {
    TokenUsage {
        prompt_tokens: 10,
        completion_tokens: 5,
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "test-model"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, TfPilotError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .next_reply(&request)
            .ok_or_else(|| TfPilotError::provider("script exhausted"))?;

        let message = match reply {
            Reply::Text(text) => ChatMessage::assistant(text),
            Reply::Slow(delay, text) => {
                tokio::time::sleep(delay).await;
                ChatMessage::assistant(text)
            }
            Reply::Fail(message) => return Err(TfPilotError::provider(message)),
            Reply::Tools(calls) => ChatMessage {
                tool_calls: calls
                    .into_iter()
                    .enumerate()
                    .map(|(i, (name, arguments))| ToolCall {
                        id: format!("call_{i}"),
                        name,
                        arguments,
                    })
                    .collect(),
                ..ChatMessage::assistant("")
            },
        };
        Ok(ChatResponse {
            message,
            usage: usage(),
            finish_reason: None,
        })
    }
}
