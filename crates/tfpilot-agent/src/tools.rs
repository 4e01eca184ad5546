// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait, registry, and the Terraform tool set.
//!
//! Each Terraform tool maps model-supplied JSON arguments onto one
//! [`TerraformCommand`]. Tools that change infrastructure ask the
//! [`ApprovalGate`] first; a refusal is reported to the model as a tool
//! result, not as an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use strum::{EnumIter, IntoEnumIterator};
use tfpilot_core::{ApprovalGate, TerraformCommand, TerraformGateway, TfPilotError, ToolDefinition};
use tfpilot_terraform::{parse_plan_summary, parse_workspaces};
use tracing::{info, warn};

/// Tool result text returned when the operator refuses an action.
pub const DENIED: &str = "denied by operator";

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A capability the model can call by name.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    /// True when the tool never changes infrastructure or state.
    fn is_read_only(&self) -> bool;

    async fn invoke(&self, input: Value) -> Result<ToolOutput, TfPilotError>;
}

/// Tools available to one conversation, indexed by name.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its `name()`, replacing any previous one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Definitions sent to the provider, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect()
    }

    /// A registry holding only the read-only tools of this one.
    pub fn read_only(&self) -> Self {
        Self {
            tools: self
                .tools
                .iter()
                .filter(|(_, t)| t.is_read_only())
                .map(|(name, t)| (name.clone(), t.clone()))
                .collect(),
        }
    }

    /// Run the named tool, turning unknown names and tool errors into
    /// error outputs the model can react to.
    pub async fn invoke(&self, name: &str, input: Value) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "model called an unknown tool");
            return ToolOutput::error(format!("unknown tool `{name}`"));
        };
        match tool.invoke(input).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool = name, error = %e, "tool invocation failed");
                ToolOutput::error(e.to_string())
            }
        }
    }
}

/// The Terraform operations exposed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum TerraformTool {
    Validate,
    Plan,
    Init,
    Show,
    Output,
    StateList,
    StateShow,
    WorkspaceList,
    Fmt,
    Apply,
    Destroy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ToolArgs {
    upgrade: bool,
    destroy: bool,
    var_file: Option<String>,
    name: Option<String>,
    address: Option<String>,
    check: bool,
}

impl TerraformTool {
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Validate => "terraform_validate",
            Self::Plan => "terraform_plan",
            Self::Init => "terraform_init",
            Self::Show => "terraform_show",
            Self::Output => "terraform_output",
            Self::StateList => "terraform_state_list",
            Self::StateShow => "terraform_state_show",
            Self::WorkspaceList => "terraform_workspace_list",
            Self::Fmt => "terraform_fmt",
            Self::Apply => "terraform_apply",
            Self::Destroy => "terraform_destroy",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Validate => "Check the configuration for syntax and internal consistency",
            Self::Plan => "Preview the changes Terraform would make",
            Self::Init => "Initialize the working directory and download providers and modules",
            Self::Show => "Show the current state in human-readable form",
            Self::Output => "Read output values from the state as JSON",
            Self::StateList => "List every resource address tracked in the state",
            Self::StateShow => "Show the attributes of one resource in the state",
            Self::WorkspaceList => "List workspaces and mark the current one",
            Self::Fmt => "Rewrite configuration files to canonical format",
            Self::Apply => "Apply the planned changes to real infrastructure (requires approval)",
            Self::Destroy => "Destroy all managed infrastructure (requires approval)",
        }
    }

    fn schema(self) -> Value {
        let var_file = json!({"type": "string", "description": "Path to a .tfvars file"});
        let (properties, required): (Value, Vec<&str>) = match self {
            Self::Init => (
                json!({"upgrade": {"type": "boolean", "description": "Upgrade providers and modules"}}),
                vec![],
            ),
            Self::Plan => (
                json!({
                    "destroy": {"type": "boolean", "description": "Plan a destroy instead"},
                    "var_file": var_file,
                }),
                vec![],
            ),
            Self::Apply | Self::Destroy => (json!({"var_file": var_file}), vec![]),
            Self::Output => (
                json!({"name": {"type": "string", "description": "Single output to read"}}),
                vec![],
            ),
            Self::StateShow => (
                json!({"address": {"type": "string", "description": "Resource address, e.g. aws_s3_bucket.logs"}}),
                vec!["address"],
            ),
            Self::Fmt => (
                json!({"check": {"type": "boolean", "description": "Only report unformatted files"}}),
                vec![],
            ),
            Self::Validate | Self::Show | Self::StateList | Self::WorkspaceList => (json!({}), vec![]),
        };
        json!({"type": "object", "properties": properties, "required": required})
    }

    fn is_read_only(self) -> bool {
        !matches!(self, Self::Init | Self::Fmt | Self::Apply | Self::Destroy)
    }

    fn command(self, input: Value) -> Result<TerraformCommand, TfPilotError> {
        let input = if input.is_null() { json!({}) } else { input };
        let args: ToolArgs = serde_json::from_value(input).map_err(|e| {
            TfPilotError::InvalidInput(format!("invalid arguments for {}: {e}", self.tool_name()))
        })?;

        Ok(match self {
            Self::Validate => TerraformCommand::Validate,
            Self::Plan => TerraformCommand::Plan {
                destroy: args.destroy,
                var_file: args.var_file,
            },
            Self::Init => TerraformCommand::Init {
                upgrade: args.upgrade,
            },
            Self::Show => TerraformCommand::Show,
            Self::Output => TerraformCommand::Output { name: args.name },
            Self::StateList => TerraformCommand::StateList,
            Self::StateShow => TerraformCommand::StateShow {
                address: args.address.filter(|a| !a.trim().is_empty()).ok_or_else(|| {
                    TfPilotError::InvalidInput("missing required 'address' parameter".into())
                })?,
            },
            Self::WorkspaceList => TerraformCommand::WorkspaceList,
            Self::Fmt => TerraformCommand::Fmt { check: args.check },
            // Approval happens before the command runs, so Terraform itself
            // must not prompt.
            Self::Apply => TerraformCommand::Apply {
                auto_approve: true,
                var_file: args.var_file,
            },
            Self::Destroy => TerraformCommand::Destroy {
                auto_approve: true,
                var_file: args.var_file,
            },
        })
    }
}

/// One Terraform operation bound to a gateway and an approval gate.
pub struct TerraformToolHandle {
    kind: TerraformTool,
    gateway: Arc<dyn TerraformGateway>,
    approval: Arc<dyn ApprovalGate>,
}

#[async_trait]
impl Tool for TerraformToolHandle {
    fn name(&self) -> &str {
        self.kind.tool_name()
    }

    fn description(&self) -> &str {
        self.kind.description()
    }

    fn parameters_schema(&self) -> Value {
        self.kind.schema()
    }

    fn is_read_only(&self) -> bool {
        self.kind.is_read_only()
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, TfPilotError> {
        let command = self.kind.command(input)?;

        if command.is_destructive() && !self.approval.approve(&describe(&command)).await {
            info!(command = command.label(), "operator denied destructive command");
            return Ok(ToolOutput::error(DENIED));
        }

        let result = self.gateway.run(&command).await?;
        let mut content = result.to_tool_output();
        match self.kind {
            TerraformTool::Plan => {
                if let Some(summary) = parse_plan_summary(&result.stdout) {
                    content.push_str(&format!("summary: {summary}\n"));
                }
            }
            TerraformTool::WorkspaceList if result.success => {
                let current = parse_workspaces(&result.stdout)
                    .into_iter()
                    .find(|w| w.current)
                    .map(|w| w.name);
                if let Some(current) = current {
                    content.push_str(&format!("current workspace: {current}\n"));
                }
            }
            _ => {}
        }

        Ok(ToolOutput {
            content,
            is_error: !result.success,
        })
    }
}

fn describe(command: &TerraformCommand) -> String {
    match command {
        TerraformCommand::Apply {
            var_file: Some(file),
            ..
        }
        | TerraformCommand::Destroy {
            var_file: Some(file),
            ..
        } => format!("{} (var file {file})", command.label()),
        _ => command.label().to_string(),
    }
}

/// Registry with every Terraform tool bound to `gateway`.
pub fn terraform_tools(
    gateway: Arc<dyn TerraformGateway>,
    approval: Arc<dyn ApprovalGate>,
) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for kind in TerraformTool::iter() {
        registry.register(Arc::new(TerraformToolHandle {
            kind,
            gateway: gateway.clone(),
            approval: approval.clone(),
        }));
    }
    registry
}
