// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by processors, providers, and the Terraform gateway.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

// --- Chat types ---

/// Author of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back in the tool result.
    pub id: String,
    /// Name of the tool to run.
    pub name: String,
    /// Parsed JSON arguments.
    pub arguments: serde_json::Value,
}

/// One message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Set on `Role::Tool` messages to link the result to its call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self::text(Role::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(Role::Assistant, text)
    }

    /// A tool result answering the call with `call_id`.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }

    fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// Text content, or an empty string for pure tool-call messages.
    pub fn text_or_empty(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// A tool the model may call, described with a JSON Schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A single chat-completion request.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDefinition>,
    /// Overrides the provider's configured `max_tokens` when set.
    pub max_tokens: Option<u32>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }

    /// Accumulates `other` into `self`, saturating on overflow.
    pub fn add(&mut self, other: TokenUsage) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.completion_tokens = self
            .completion_tokens
            .saturating_add(other.completion_tokens);
    }
}

/// A completed chat response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub message: ChatMessage,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

// --- Processor types ---

/// The answer produced by a processor for one user request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessorResponse {
    /// Natural-language answer.
    pub text: String,
    /// Name of the processor that produced the answer.
    pub processor: String,
    /// Tokens spent producing the answer.
    pub usage: TokenUsage,
    /// Annotations shown after the answer (fallbacks, partial failures).
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ProcessorResponse {
    pub fn new(processor: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            processor: processor.into(),
            usage: TokenUsage::default(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Answer text followed by one `Note:` line per annotation.
    pub fn render(&self) -> String {
        if self.notes.is_empty() {
            return self.text.clone();
        }
        let mut out = self.text.clone();
        out.push('\n');
        for note in &self.notes {
            out.push_str("\nNote: ");
            out.push_str(note);
        }
        out
    }
}

// --- Terraform types ---

/// A Terraform CLI subcommand the gateway knows how to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum TerraformCommand {
    Init {
        #[serde(default)]
        upgrade: bool,
    },
    Validate,
    Plan {
        #[serde(default)]
        destroy: bool,
        #[serde(default)]
        var_file: Option<String>,
    },
    Apply {
        #[serde(default)]
        auto_approve: bool,
        #[serde(default)]
        var_file: Option<String>,
    },
    Destroy {
        #[serde(default)]
        auto_approve: bool,
        #[serde(default)]
        var_file: Option<String>,
    },
    Show,
    Output {
        #[serde(default)]
        name: Option<String>,
    },
    StateList,
    StateShow {
        address: String,
    },
    WorkspaceList,
    WorkspaceSelect {
        name: String,
    },
    Fmt {
        #[serde(default)]
        check: bool,
    },
}

impl TerraformCommand {
    /// Command-line arguments passed to the `terraform` binary.
    ///
    /// Every command runs non-interactively; apply and destroy only proceed
    /// unattended when `auto_approve` is set.
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();
        let push_var_file = |args: &mut Vec<String>, var_file: &Option<String>| {
            if let Some(file) = var_file {
                args.push(format!("-var-file={file}"));
            }
        };

        match self {
            Self::Init { upgrade } => {
                args.extend(["init", "-input=false", "-no-color"].map(String::from));
                if *upgrade {
                    args.push("-upgrade".into());
                }
            }
            Self::Validate => {
                args.extend(["validate", "-no-color"].map(String::from));
            }
            Self::Plan { destroy, var_file } => {
                args.extend(
                    ["plan", "-input=false", "-no-color", "-detailed-exitcode"].map(String::from),
                );
                if *destroy {
                    args.push("-destroy".into());
                }
                push_var_file(&mut args, var_file);
            }
            Self::Apply {
                auto_approve,
                var_file,
            } => {
                args.extend(["apply", "-input=false", "-no-color"].map(String::from));
                if *auto_approve {
                    args.push("-auto-approve".into());
                }
                push_var_file(&mut args, var_file);
            }
            Self::Destroy {
                auto_approve,
                var_file,
            } => {
                args.extend(["destroy", "-input=false", "-no-color"].map(String::from));
                if *auto_approve {
                    args.push("-auto-approve".into());
                }
                push_var_file(&mut args, var_file);
            }
            Self::Show => {
                args.extend(["show", "-no-color"].map(String::from));
            }
            Self::Output { name } => {
                args.extend(["output", "-json", "-no-color"].map(String::from));
                if let Some(name) = name {
                    args.push(name.clone());
                }
            }
            Self::StateList => {
                args.extend(["state", "list"].map(String::from));
            }
            Self::StateShow { address } => {
                args.extend(["state", "show", "-no-color"].map(String::from));
                args.push(address.clone());
            }
            Self::WorkspaceList => {
                args.extend(["workspace", "list"].map(String::from));
            }
            Self::WorkspaceSelect { name } => {
                args.extend(["workspace", "select"].map(String::from));
                args.push(name.clone());
            }
            Self::Fmt { check } => {
                args.extend(["fmt", "-no-color", "-recursive"].map(String::from));
                if *check {
                    args.push("-check".into());
                }
            }
        }
        args
    }

    /// Short human-readable label, e.g. `terraform plan`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Init { .. } => "terraform init",
            Self::Validate => "terraform validate",
            Self::Plan { .. } => "terraform plan",
            Self::Apply { .. } => "terraform apply",
            Self::Destroy { .. } => "terraform destroy",
            Self::Show => "terraform show",
            Self::Output { .. } => "terraform output",
            Self::StateList => "terraform state list",
            Self::StateShow { .. } => "terraform state show",
            Self::WorkspaceList => "terraform workspace list",
            Self::WorkspaceSelect { .. } => "terraform workspace select",
            Self::Fmt { .. } => "terraform fmt",
        }
    }

    /// True for commands that change real infrastructure.
    pub fn is_destructive(&self) -> bool {
        matches!(self, Self::Apply { .. } | Self::Destroy { .. })
    }

    /// Whether `exit_code` counts as success for this command.
    ///
    /// `plan -detailed-exitcode` exits 2 when changes are present.
    pub fn is_success_exit(&self, exit_code: i32) -> bool {
        match self {
            Self::Plan { .. } => exit_code == 0 || exit_code == 2,
            _ => exit_code == 0,
        }
    }
}

/// Outcome of one Terraform invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TerraformResult {
    pub success: bool,
    /// Process exit code, `-1` when the process was killed or timed out.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// Full command line that was executed.
    pub command: String,
    pub duration: Duration,
}

impl TerraformResult {
    /// Compact text form handed back to the model as a tool result.
    pub fn to_tool_output(&self) -> String {
        let status = if self.success { "succeeded" } else { "failed" };
        let mut out = format!(
            "$ {}\n{status} (exit code {}, {:.1}s)\n",
            self.command,
            self.exit_code,
            self.duration.as_secs_f64()
        );
        if !self.stdout.trim().is_empty() {
            out.push_str("stdout:\n");
            out.push_str(self.stdout.trim_end());
            out.push('\n');
        }
        if !self.stderr.trim().is_empty() {
            out.push_str("stderr:\n");
            out.push_str(self.stderr.trim_end());
            out.push('\n');
        }
        out
    }
}
