// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tfpilot classify` command implementation.
//!
//! Runs the router only. No provider or Terraform binary is touched, so
//! this works offline and is the quickest way to tune the vocabulary.

use tfpilot_config::TfPilotConfig;
use tfpilot_core::TfPilotError;
use tfpilot_router::RoutingDecision;

use crate::app;

/// Classify `request` and print the decision.
pub fn run_classify(
    config: &TfPilotConfig,
    request: &str,
    history: &[String],
    json: bool,
) -> Result<(), TfPilotError> {
    let router = app::build_router(config);
    let decision = router.classify(request, app::orchestration_available(config), history)?;

    if json {
        let out = serde_json::to_string_pretty(&decision)
            .map_err(|e| TfPilotError::Internal(format!("failed to serialize decision: {e}")))?;
        println!("{out}");
    } else {
        print!("{}", format_decision(&decision, config.routing.complexity_threshold));
    }
    Ok(())
}

/// Human-readable rendering, one field per line.
pub fn format_decision(decision: &RoutingDecision, threshold: f64) -> String {
    let route = if decision.use_orchestration {
        "orchestrated"
    } else {
        "fast"
    };
    let domains = if decision.matched_domains.is_empty() {
        "-".to_string()
    } else {
        decision
            .matched_domains
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let triggers = if decision.matched_triggers.is_empty() {
        "-".to_string()
    } else {
        decision.matched_triggers.join(", ")
    };

    format!(
        "route:     {route}\n\
         score:     {:.2} (threshold {threshold:.2})\n\
         rule:      {}\n\
         domains:   {domains}\n\
         triggers:  {triggers}\n\
         reasoning: {}\n",
        decision.confidence_score, decision.rule, decision.reasoning
    )
}
