// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The model/tool loop shared by every processor.

use tfpilot_core::{ChatMessage, ChatProvider, ChatRequest, TfPilotError, TokenUsage};
use tracing::{debug, warn};

use crate::tools::ToolRegistry;

/// Upper bound on model turns that request tools before giving up.
pub const MAX_TOOL_ITERATIONS: usize = 8;

/// Final text of one conversation plus what it cost.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationOutcome {
    pub text: String,
    pub usage: TokenUsage,
    pub tool_calls: usize,
    /// The loop stopped at the iteration limit, not on a final answer.
    pub truncated: bool,
}

/// Build the opening messages: system prompt, prior requests, the request.
pub fn opening_messages(system_prompt: &str, history: &[String], request: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(system_prompt)];
    if !history.is_empty() {
        let mut context = String::from("Earlier requests in this session, oldest first:\n");
        for item in history {
            context.push_str("- ");
            context.push_str(item);
            context.push('\n');
        }
        messages.push(ChatMessage::user(context));
    }
    messages.push(ChatMessage::user(request));
    messages
}

/// Run the model until it answers without requesting tools.
pub async fn run(
    provider: &dyn ChatProvider,
    tools: &ToolRegistry,
    mut messages: Vec<ChatMessage>,
    max_iterations: usize,
) -> Result<ConversationOutcome, TfPilotError> {
    let definitions = tools.definitions();
    let mut usage = TokenUsage::default();
    let mut tool_calls = 0;
    let mut last_text = String::new();

    for iteration in 0..=max_iterations {
        let tools_allowed = iteration < max_iterations;
        let request = ChatRequest {
            messages: messages.clone(),
            tools: if tools_allowed { definitions.clone() } else { Vec::new() },
            max_tokens: None,
        };
        let response = provider.complete(request).await?;
        usage.add(response.usage);

        let message = response.message;
        let text = message.text_or_empty().trim().to_string();
        if !text.is_empty() {
            last_text = text;
        }

        if message.tool_calls.is_empty() || !tools_allowed {
            if !message.tool_calls.is_empty() {
                warn!(max_iterations, "tool loop ended without a final answer");
            }
            return Ok(ConversationOutcome {
                text: last_text,
                usage,
                tool_calls,
                truncated: !message.tool_calls.is_empty(),
            });
        }

        debug!(iteration, calls = message.tool_calls.len(), "model requested tools");
        let calls = message.tool_calls.clone();
        messages.push(message);
        for call in calls {
            tool_calls += 1;
            let output = tools.invoke(&call.name, call.arguments).await;
            messages.push(ChatMessage::tool_result(call.id, output.content));
        }
    }

    // Unreachable: the last iteration offers no tools and returns.
    Ok(ConversationOutcome {
        text: last_text,
        usage,
        tool_calls,
        truncated: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use tfpilot_core::{AutoApprove, Role};

    use crate::testing::{MockGateway, Reply, ScriptedProvider};
    use crate::tools::terraform_tools;

    fn tools() -> ToolRegistry {
        terraform_tools(MockGateway::new(), Arc::new(AutoApprove))
    }

    #[test]
    fn history_becomes_one_context_message() {
        let history = vec!["list buckets".to_string(), "show vpc".to_string()];
        let messages = opening_messages("sys", &history, "now plan");
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[1].text_or_empty().contains("- list buckets\n- show vpc"));
        assert_eq!(messages[2].text_or_empty(), "now plan");

        assert_eq!(opening_messages("sys", &[], "hi").len(), 2);
    }

    #[tokio::test]
    async fn tool_results_are_fed_back() {
        let provider = ScriptedProvider::new(vec![
            Reply::Tools(vec![("terraform_validate".into(), json!({}))]),
            Reply::Text("The configuration is valid.".into()),
        ]);
        let outcome = run(provider.as_ref(), &tools(), opening_messages("s", &[], "validate"), 8)
            .await
            .unwrap();

        assert_eq!(outcome.text, "The configuration is valid.");
        assert_eq!(outcome.tool_calls, 1);
        assert_eq!(outcome.usage.total(), 30);
        assert!(!outcome.truncated);

        let second = &provider.requests()[1];
        let last = second.messages.last().unwrap();
        assert_eq!(last.role, Role::Tool);
        assert_eq!(last.tool_call_id.as_deref(), Some("call_0"));
        assert!(last.text_or_empty().contains("terraform validate"));
    }

    #[tokio::test]
    async fn iteration_limit_forces_a_tool_free_turn() {
        let provider = ScriptedProvider::new(vec![
            Reply::Tools(vec![("terraform_show".into(), json!({}))]),
            Reply::Tools(vec![("terraform_show".into(), json!({}))]),
            Reply::Text("Here is what I found so far.".into()),
        ]);
        let outcome = run(provider.as_ref(), &tools(), opening_messages("s", &[], "q"), 2)
            .await
            .unwrap();

        assert_eq!(outcome.tool_calls, 2);
        assert_eq!(outcome.text, "Here is what I found so far.");
        let requests = provider.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[2].tools.is_empty());
    }

    #[tokio::test]
    async fn provider_errors_propagate() {
        let provider = ScriptedProvider::new(vec![Reply::Fail("boom".into())]);
        let err = run(provider.as_ref(), &tools(), opening_messages("s", &[], "q"), 8)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
