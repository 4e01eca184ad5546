// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The low-latency path: one conversation with the full Terraform tool set.

use std::sync::Arc;

use async_trait::async_trait;
use tfpilot_core::{ChatProvider, Processor, ProcessorResponse, TfPilotError};
use tracing::info;

use crate::conversation::{self, MAX_TOOL_ITERATIONS};
use crate::tools::ToolRegistry;

pub const FAST_PROCESSOR_NAME: &str = "fast";

const SYSTEM_PROMPT: &str = "\
You are tfpilot, an assistant for operating Terraform. Answer questions about \
the configuration and state in the working directory, using the terraform_* \
tools to inspect it instead of guessing. Prefer read-only tools. Only call \
terraform_apply or terraform_destroy when the user explicitly asks for it; \
those calls may be refused by the operator. Keep answers short and concrete.";

/// Single-conversation processor with tool calling.
pub struct FastProcessor {
    provider: Arc<dyn ChatProvider>,
    tools: ToolRegistry,
    max_iterations: usize,
}

impl FastProcessor {
    pub fn new(provider: Arc<dyn ChatProvider>, tools: ToolRegistry) -> Self {
        Self {
            provider,
            tools,
            max_iterations: MAX_TOOL_ITERATIONS,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

#[async_trait]
impl Processor for FastProcessor {
    fn name(&self) -> &str {
        FAST_PROCESSOR_NAME
    }

    async fn process(
        &self,
        request: &str,
        history: &[String],
    ) -> Result<ProcessorResponse, TfPilotError> {
        let messages = conversation::opening_messages(SYSTEM_PROMPT, history, request);
        let outcome =
            conversation::run(self.provider.as_ref(), &self.tools, messages, self.max_iterations)
                .await?;

        info!(
            tool_calls = outcome.tool_calls,
            tokens = outcome.usage.total(),
            "fast path answered"
        );

        let text = if outcome.text.is_empty() {
            "The model returned no answer.".to_string()
        } else {
            outcome.text
        };
        let mut response = ProcessorResponse::new(FAST_PROCESSOR_NAME, text);
        response.usage = outcome.usage;
        if outcome.truncated {
            response = response.with_note(format!(
                "stopped after {} tool iterations",
                self.max_iterations
            ));
        }
        Ok(response)
    }
}
