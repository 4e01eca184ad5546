// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multi-agent processing for complex requests.
//!
//! One specialist runs per domain the request touches, all concurrently and
//! each under its own timeout, with read-only tools. A final synthesis call
//! merges whatever the specialists found. The processor fails only when no
//! specialist produced findings, which lets the dispatcher fall back.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use strum::IntoEnumIterator;
use tfpilot_config::model::OrchestrationConfig;
use tfpilot_core::{
    ChatMessage, ChatProvider, ChatRequest, Processor, ProcessorResponse, TfPilotError,
    TokenUsage,
};
use tfpilot_router::{DomainTag, QueryRouter};
use tracing::{info, warn};

use crate::conversation::{self, ConversationOutcome, MAX_TOOL_ITERATIONS};
use crate::specialist;
use crate::tools::ToolRegistry;

pub const ORCHESTRATED_PROCESSOR_NAME: &str = "orchestrated";

const SYNTHESIS_PROMPT: &str = "\
You are the lead infrastructure engineer. Specialists have each examined the \
same Terraform configuration from one angle. Combine their findings into a \
single answer to the user's request: remove duplicates, resolve conflicts, \
and order the recommendations into a practical sequence of steps.";

/// Findings from one specialist.
#[derive(Debug, Clone)]
struct Finding {
    domain: DomainTag,
    text: String,
}

/// Specialists plus synthesis.
pub struct OrchestratedProcessor {
    provider: Arc<dyn ChatProvider>,
    tools: ToolRegistry,
    router: QueryRouter,
    specialist_timeout: Duration,
    max_specialists: usize,
}

impl OrchestratedProcessor {
    /// `tools` is narrowed to its read-only subset.
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        tools: &ToolRegistry,
        router: QueryRouter,
        config: &OrchestrationConfig,
    ) -> Self {
        Self {
            provider,
            tools: tools.read_only(),
            router,
            specialist_timeout: Duration::from_secs(config.specialist_timeout_secs),
            max_specialists: config.max_specialists,
        }
    }

    pub fn with_specialist_timeout(mut self, timeout: Duration) -> Self {
        self.specialist_timeout = timeout;
        self
    }

    /// Domains to staff for `request`: the detected ones, or all of them.
    pub fn select_domains(&self, request: &str) -> Vec<DomainTag> {
        let detected = self.router.detect_domains(request);
        let domains: Vec<DomainTag> = if detected.is_empty() {
            DomainTag::iter().collect()
        } else {
            detected.into_iter().collect()
        };
        domains.into_iter().take(self.max_specialists.max(1)).collect()
    }

    async fn run_specialist(
        &self,
        domain: DomainTag,
        request: &str,
        history: &[String],
    ) -> Result<ConversationOutcome, TfPilotError> {
        let messages =
            conversation::opening_messages(&specialist::system_prompt(domain), history, request);
        let run = conversation::run(
            self.provider.as_ref(),
            &self.tools,
            messages,
            MAX_TOOL_ITERATIONS,
        );
        match tokio::time::timeout(self.specialist_timeout, run).await {
            Ok(result) => result,
            Err(_) => Err(TfPilotError::Timeout {
                duration: self.specialist_timeout,
            }),
        }
    }

    async fn synthesize(
        &self,
        request: &str,
        findings: &[Finding],
    ) -> Result<(String, TokenUsage), TfPilotError> {
        let mut body = format!("Request:\n{request}\n");
        for finding in findings {
            body.push_str(&format!("\n## {} findings\n{}\n", finding.domain, finding.text));
        }
        let response = self
            .provider
            .complete(ChatRequest {
                messages: vec![ChatMessage::system(SYNTHESIS_PROMPT), ChatMessage::user(body)],
                tools: Vec::new(),
                max_tokens: None,
            })
            .await?;
        Ok((response.message.text_or_empty().trim().to_string(), response.usage))
    }
}

#[async_trait]
impl Processor for OrchestratedProcessor {
    fn name(&self) -> &str {
        ORCHESTRATED_PROCESSOR_NAME
    }

    async fn process(
        &self,
        request: &str,
        history: &[String],
    ) -> Result<ProcessorResponse, TfPilotError> {
        let domains = self.select_domains(request);
        info!(specialists = ?domains, "starting specialists");

        let runs = domains.iter().map(|&domain| async move {
            (domain, self.run_specialist(domain, request, history).await)
        });
        let results = join_all(runs).await;

        let mut usage = TokenUsage::default();
        let mut findings = Vec::new();
        let mut notes = Vec::new();
        for (domain, result) in results {
            match result {
                Ok(outcome) if !outcome.text.is_empty() => {
                    usage.add(outcome.usage);
                    findings.push(Finding {
                        domain,
                        text: outcome.text,
                    });
                }
                Ok(outcome) => {
                    usage.add(outcome.usage);
                    notes.push(format!("{domain} specialist returned no findings"));
                }
                Err(e) => {
                    warn!(%domain, error = %e, "specialist failed");
                    notes.push(format!("{domain} specialist failed: {e}"));
                }
            }
        }

        if findings.is_empty() {
            return Err(TfPilotError::Orchestration(format!(
                "no specialist produced findings ({})",
                notes.join("; ")
            )));
        }

        let (text, synthesis_usage) = self.synthesize(request, &findings).await?;
        usage.add(synthesis_usage);
        info!(
            findings = findings.len(),
            failed = notes.len(),
            tokens = usage.total(),
            "orchestration finished"
        );

        let mut response = ProcessorResponse::new(ORCHESTRATED_PROCESSOR_NAME, text);
        response.usage = usage;
        response.notes = notes;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tfpilot_core::AutoApprove;

    use crate::testing::{MockGateway, Reply, ScriptedProvider};
    use crate::tools::terraform_tools;

    fn processor(provider: Arc<ScriptedProvider>, max_specialists: usize) -> OrchestratedProcessor {
        let tools = terraform_tools(MockGateway::new(), Arc::new(AutoApprove));
        let config = OrchestrationConfig {
            enabled: true,
            specialist_timeout_secs: 30,
            max_specialists,
        };
        OrchestratedProcessor::new(provider, &tools, QueryRouter::new(), &config)
    }

    const AUDIT: &str = "Perform a comprehensive security and cost audit with a remediation roadmap";

    #[test]
    fn specialists_follow_detected_domains() {
        let p = processor(ScriptedProvider::new(vec![]), 5);
        assert_eq!(
            p.select_domains(AUDIT),
            vec![DomainTag::Security, DomainTag::Cost, DomainTag::Compliance]
        );
        assert_eq!(p.select_domains("tidy up the modules").len(), 5);
    }

    #[test]
    fn specialist_count_is_capped() {
        let p = processor(ScriptedProvider::new(vec![]), 2);
        assert_eq!(p.select_domains("tidy up the modules").len(), 2);
    }

    #[test]
    fn specialists_only_get_read_only_tools() {
        let p = processor(ScriptedProvider::new(vec![]), 5);
        assert!(p.tools.get("terraform_apply").is_none());
        assert!(p.tools.get("terraform_plan").is_some());
    }

    #[tokio::test]
    async fn findings_are_synthesized() {
        let provider = ScriptedProvider::new(vec![Reply::Text("Combined plan.".into())]);
        provider.on_system("[specialist:security]", Reply::Text("Bucket is public.".into()));
        provider.on_system("[specialist:cost]", Reply::Text("NAT gateway idle.".into()));
        provider.on_system("[specialist:compliance]", Reply::Text("No access logs.".into()));

        let response = processor(provider.clone(), 5).process(AUDIT, &[]).await.unwrap();

        assert_eq!(response.text, "Combined plan.");
        assert_eq!(response.processor, "orchestrated");
        assert!(response.notes.is_empty());
        assert_eq!(response.usage.total(), 60);

        let synthesis = provider.requests().last().cloned().unwrap();
        let body = synthesis.messages[1].text_or_empty().to_string();
        assert!(body.contains("## security findings\nBucket is public."));
        assert!(body.contains("## cost findings\nNAT gateway idle."));
        assert!(synthesis.tools.is_empty());
    }

    #[tokio::test]
    async fn partial_failure_becomes_a_note() {
        let provider = ScriptedProvider::new(vec![Reply::Text("Summary.".into())]);
        provider.on_system("[specialist:security]", Reply::Text("Open SSH.".into()));
        provider.on_system("[specialist:cost]", Reply::Fail("rate limited".into()));
        provider.on_system("[specialist:compliance]", Reply::Text("Fine.".into()));

        let response = processor(provider, 5).process(AUDIT, &[]).await.unwrap();
        assert_eq!(response.notes.len(), 1);
        assert!(response.notes[0].starts_with("cost specialist failed"));
        assert!(response.notes[0].contains("rate limited"));
    }

    #[tokio::test]
    async fn all_failures_are_an_orchestration_error() {
        let provider = ScriptedProvider::new(vec![]);
        provider.on_system("[specialist:security]", Reply::Fail("down".into()));
        provider.on_system("[specialist:cost]", Reply::Fail("down".into()));
        provider.on_system("[specialist:compliance]", Reply::Fail("down".into()));

        let err = processor(provider, 5).process(AUDIT, &[]).await.unwrap_err();
        assert!(matches!(err, TfPilotError::Orchestration(_)));
    }

    #[tokio::test]
    async fn slow_specialist_times_out() {
        let provider = ScriptedProvider::new(vec![Reply::Text("Summary.".into())]);
        provider.on_system(
            "[specialist:security]",
            Reply::Slow(Duration::from_secs(5), "too late".into()),
        );
        provider.on_system("[specialist:cost]", Reply::Text("Rightsize.".into()));
        provider.on_system("[specialist:compliance]", Reply::Text("Ok.".into()));

        let p = processor(provider, 5).with_specialist_timeout(Duration::from_millis(100));
        let response = p.process(AUDIT, &[]).await.unwrap();
        assert_eq!(response.notes.len(), 1);
        assert!(response.notes[0].contains("security specialist failed"));
        assert!(response.notes[0].contains("timed out"));
    }
}
