// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain specialists used by the orchestrated path.

use tfpilot_router::DomainTag;

const SHARED_RULES: &str = "\
You may only use read-only terraform_* tools. Inspect the configuration and \
state before drawing conclusions. Report findings as a short list, most \
important first, each with the affected resource addresses and a concrete \
recommendation. Say so plainly when the evidence is insufficient.";

/// System prompt for the specialist covering `domain`.
///
/// Each prompt begins with a `[specialist:<domain>]` marker so logs and
/// transcripts show which specialist produced a turn.
pub fn system_prompt(domain: DomainTag) -> String {
    let focus = match domain {
        DomainTag::Security => {
            "You are the security specialist. Look for public exposure, missing \
             encryption at rest and in transit, overly broad IAM policies, open \
             security groups, and secrets in configuration."
        }
        DomainTag::Cost => {
            "You are the cost specialist. Look for oversized instances, idle or \
             unattached resources, missing lifecycle rules on storage, and \
             opportunities for reserved or spot capacity."
        }
        DomainTag::Compliance => {
            "You are the compliance specialist. Map the configuration against \
             common controls (CIS, SOC 2, GDPR, HIPAA, PCI-DSS): logging, \
             retention, encryption, tagging, and data residency."
        }
        DomainTag::Performance => {
            "You are the performance specialist. Look at instance sizing, \
             autoscaling settings, caching, database throughput limits, and \
             network paths that add latency."
        }
        DomainTag::Deployment => {
            "You are the deployment specialist. Assess how changes roll out: \
             module structure, state layout, workspaces, dependency ordering, \
             and what a safe staged rollout or migration would require."
        }
    };
    format!("[specialist:{domain}]\n{focus}\n\n{SHARED_RULES}")
}
