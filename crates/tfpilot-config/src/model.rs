// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for tfpilot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored. Every field has a
//! default, so an empty file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level tfpilot configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TfPilotConfig {
    /// Logging and session settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// LLM provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Multi-agent orchestration settings.
    #[serde(default)]
    pub orchestration: OrchestrationConfig,

    /// Query routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Terraform CLI settings.
    #[serde(default)]
    pub terraform: TerraformConfig,
}

/// Logging and session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Append logs to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,

    /// Number of prior requests kept as routing and prompt context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_file: None,
            history_window: default_history_window(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_window() -> usize {
    5
}

/// Which flavour of OpenAI-style endpoint to talk to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
pub enum ProviderKind {
    /// api.openai.com; requires an API key.
    #[serde(rename = "openai")]
    #[strum(serialize = "openai")]
    OpenAi,
    /// Any server speaking the chat-completions protocol (Ollama, vLLM, LM Studio).
    #[default]
    #[serde(rename = "openai_compatible")]
    #[strum(serialize = "openai_compatible")]
    OpenAiCompatible,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL up to and including the API version segment (e.g. `.../v1`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// HTTP request timeout.
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_provider_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// The configured API key, or `OPENAI_API_KEY` from the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_base_url() -> String {
    "http://localhost:11434/v1".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_provider_timeout_secs() -> u64 {
    120
}

/// Multi-agent orchestration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OrchestrationConfig {
    /// Build the orchestrated processor. When false every request takes the fast path.
    #[serde(default)]
    pub enabled: bool,

    /// Per-specialist time limit.
    #[serde(default = "default_specialist_timeout_secs")]
    pub specialist_timeout_secs: u64,

    /// Upper bound on specialists consulted for one request.
    #[serde(default = "default_max_specialists")]
    pub max_specialists: usize,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            specialist_timeout_secs: default_specialist_timeout_secs(),
            max_specialists: default_max_specialists(),
        }
    }
}

fn default_specialist_timeout_secs() -> u64 {
    120
}

fn default_max_specialists() -> usize {
    5
}

/// Query routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Minimum confidence score that sends a request down the orchestrated path.
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: f64,

    /// Requests longer than this many words get the long-query bonus.
    #[serde(default = "default_long_query_word_count")]
    pub long_query_word_count: usize,

    /// Always answer on the fast path. Decisions are still computed and logged.
    #[serde(default)]
    pub force_fast: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
            long_query_word_count: default_long_query_word_count(),
            force_fast: false,
        }
    }
}

fn default_complexity_threshold() -> f64 {
    0.6
}

fn default_long_query_word_count() -> usize {
    30
}

/// Terraform CLI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TerraformConfig {
    /// Terraform executable name or path.
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Directory holding the Terraform configuration.
    #[serde(default = "default_working_dir")]
    pub working_dir: String,

    /// Workspace selected before the session starts.
    #[serde(default = "default_workspace")]
    pub workspace: String,

    /// Time limit for a single Terraform command.
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,

    /// Ask before running apply or destroy.
    #[serde(default = "default_human_in_the_loop")]
    pub human_in_the_loop: bool,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            working_dir: default_working_dir(),
            workspace: default_workspace(),
            command_timeout_secs: default_command_timeout_secs(),
            human_in_the_loop: default_human_in_the_loop(),
        }
    }
}

fn default_binary() -> String {
    "terraform".to_string()
}

fn default_working_dir() -> String {
    ".".to_string()
}

fn default_workspace() -> String {
    "default".to_string()
}

fn default_command_timeout_secs() -> u64 {
    300
}

fn default_human_in_the_loop() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = TfPilotConfig::default();
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.agent.history_window, 5);
        assert_eq!(config.provider.kind, ProviderKind::OpenAiCompatible);
        assert_eq!(config.provider.base_url, "http://localhost:11434/v1");
        assert!(!config.orchestration.enabled);
        assert_eq!(config.routing.complexity_threshold, 0.6);
        assert_eq!(config.routing.long_query_word_count, 30);
        assert!(!config.routing.force_fast);
        assert_eq!(config.terraform.binary, "terraform");
        assert!(config.terraform.human_in_the_loop);
    }

    #[test]
    fn provider_kind_uses_wire_names() {
        let config: TfPilotConfig = toml::from_str("[provider]\nkind = \"openai\"\n").unwrap();
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(ProviderKind::OpenAiCompatible.to_string(), "openai_compatible");
    }

    #[test]
    fn unknown_provider_kind_is_rejected() {
        let result = toml::from_str::<TfPilotConfig>("[provider]\nkind = \"anthropic\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn configured_api_key_wins_over_environment() {
        let provider = ProviderConfig {
            api_key: Some("sk-config".into()),
            ..ProviderConfig::default()
        };
        assert_eq!(provider.resolved_api_key().as_deref(), Some("sk-config"));
    }
}
