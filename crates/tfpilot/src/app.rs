// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring: turn a validated configuration into a ready [`Dispatcher`].

use std::sync::Arc;

use tfpilot_agent::{terraform_tools, FastProcessor, OrchestratedProcessor};
use tfpilot_config::TfPilotConfig;
use tfpilot_core::{ApprovalGate, ChatProvider, TerraformGateway, TfPilotError};
use tfpilot_openai::OpenAiProvider;
use tfpilot_router::{ClassifierConfig, Dispatcher, QueryRouter};
use tfpilot_terraform::TerraformCli;
use tracing::info;

/// Router configured from `[routing]` and `[agent]`.
pub fn build_router(config: &TfPilotConfig) -> QueryRouter {
    QueryRouter::with_config(ClassifierConfig::from(config))
}

/// Whether this configuration can ever route to orchestration.
pub fn orchestration_available(config: &TfPilotConfig) -> bool {
    config.orchestration.enabled && !config.routing.force_fast
}

/// Build the dispatcher with the configured provider and Terraform binary.
pub fn build_dispatcher(
    config: &TfPilotConfig,
    approval: Arc<dyn ApprovalGate>,
) -> Result<Dispatcher, TfPilotError> {
    let provider: Arc<dyn ChatProvider> = Arc::new(OpenAiProvider::new(&config.provider)?);
    let gateway: Arc<dyn TerraformGateway> = Arc::new(TerraformCli::from_config(&config.terraform));
    Ok(assemble(config, provider, gateway, approval))
}

/// Dispatcher over explicit collaborators.
pub fn assemble(
    config: &TfPilotConfig,
    provider: Arc<dyn ChatProvider>,
    gateway: Arc<dyn TerraformGateway>,
    approval: Arc<dyn ApprovalGate>,
) -> Dispatcher {
    let tools = terraform_tools(gateway, approval);
    let router = build_router(config);
    let fast = Arc::new(FastProcessor::new(provider.clone(), tools.clone()));

    let mut dispatcher = Dispatcher::new(router.clone(), fast).with_force_fast(config.routing.force_fast);
    if config.orchestration.enabled {
        let orchestrated =
            OrchestratedProcessor::new(provider, &tools, router, &config.orchestration);
        dispatcher = dispatcher.with_orchestrator(Arc::new(orchestrated));
    }

    info!(
        orchestration = dispatcher.orchestration_available(),
        threshold = config.routing.complexity_threshold,
        "dispatcher ready"
    );
    dispatcher
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use tfpilot_core::{
        ChatMessage, ChatRequest, ChatResponse, DenyAll, TerraformCommand, TerraformResult,
        TokenUsage,
    };
    use tfpilot_router::Route;

    struct EchoProvider;

    #[async_trait]
    impl ChatProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, TfPilotError> {
            Ok(ChatResponse {
                message: ChatMessage::assistant("looks fine"),
                usage: TokenUsage {
                    prompt_tokens: 1,
                    completion_tokens: 1,
                },
                finish_reason: Some("stop".into()),
            })
        }
    }

    struct IdleGateway;

    #[async_trait]
    impl TerraformGateway for IdleGateway {
        async fn run(&self, command: &TerraformCommand) -> Result<TerraformResult, TfPilotError> {
            Ok(TerraformResult {
                success: true,
                exit_code: 0,
                stdout: String::new(),
                stderr: String::new(),
                command: format!("terraform {}", command.args().join(" ")),
                duration: Duration::ZERO,
            })
        }

        async fn version(&self) -> Result<String, TfPilotError> {
            Ok("1.9.5".into())
        }
    }

    fn dispatcher(config: &TfPilotConfig) -> Dispatcher {
        assemble(config, Arc::new(EchoProvider), Arc::new(IdleGateway), Arc::new(DenyAll))
    }

    const AUDIT: &str = "Perform a comprehensive security and cost audit with a remediation roadmap";

    #[tokio::test]
    async fn complex_requests_reach_orchestration_when_enabled() {
        let mut config = TfPilotConfig::default();
        config.orchestration.enabled = true;

        let outcome = dispatcher(&config).dispatch(AUDIT, &[]).await.unwrap();
        assert_eq!(outcome.route, Route::Orchestrated);
        assert!(!outcome.fell_back);
        assert_eq!(outcome.response.text, "looks fine");
    }

    #[tokio::test]
    async fn disabled_orchestration_answers_on_the_fast_path() {
        let outcome = dispatcher(&TfPilotConfig::default())
            .dispatch(AUDIT, &[])
            .await
            .unwrap();
        assert_eq!(outcome.route, Route::Fast);
        assert!(outcome.fell_back);
    }

    #[tokio::test]
    async fn direct_commands_stay_fast() {
        let mut config = TfPilotConfig::default();
        config.orchestration.enabled = true;

        let outcome = dispatcher(&config)
            .dispatch("terraform validate", &[])
            .await
            .unwrap();
        assert_eq!(outcome.route, Route::Fast);
        assert!(!outcome.fell_back);
    }

    #[test]
    fn orchestration_needs_enabled_and_not_forced_fast() {
        let mut config = TfPilotConfig::default();
        assert!(!orchestration_available(&config));

        config.orchestration.enabled = true;
        assert!(orchestration_available(&config));

        config.routing.force_fast = true;
        assert!(!orchestration_available(&config));
    }

    #[test]
    fn router_uses_configured_threshold() {
        let mut config = TfPilotConfig::default();
        config.routing.complexity_threshold = 0.3;
        let router = build_router(&config);
        assert!(router.meets_threshold(0.3));
        assert!(!router.meets_threshold(0.2));
    }
}
