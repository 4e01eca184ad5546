// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The routing vocabulary.
//!
//! Every phrase list used to classify requests lives here, and nowhere
//! else. The orchestrator reads the domain lists through
//! [`domain_keywords`] so specialist selection and routing agree on terms.
//!
//! All entries are lowercase and matched as whole words or phrases against
//! whitespace-normalized request text. Inflections are listed explicitly.

use crate::classifier::DomainTag;

/// Bumped whenever a list below changes meaningfully.
pub const VOCABULARY_VERSION: u32 = 1;

/// Leading words dropped before direct-command matching ("please run ...").
pub const IGNORED_LEADING_WORDS: &[&str] = &["please"];

/// Operational requests answered directly, matched as an anchored prefix.
pub const DIRECT_COMMAND_PHRASES: &[&str] = &[
    "terraform init",
    "terraform plan",
    "terraform apply",
    "terraform destroy",
    "terraform validate",
    "terraform show",
    "terraform output",
    "terraform state",
    "terraform fmt",
    "terraform workspace",
    "terraform import",
    "run terraform",
    "execute terraform",
    "init terraform",
    "initialize terraform",
    "validate the configuration",
    "validate configuration",
    "validate my configuration",
    "format the code",
];

/// Interrogative openers of short lookup questions, matched as an anchored prefix.
pub const SIMPLE_PATTERN_PREFIXES: &[&str] = &[
    "how many",
    "what is",
    "what are",
    "what's",
    "show me",
    "show",
    "list",
    "get",
    "find",
    "display",
    "does",
    "is",
    "are",
    "can i",
];

/// Strategic or multi-step terms that argue for orchestration.
pub const TRIGGER_KEYWORDS: &[&str] = &[
    // migration
    "migrate",
    "migrating",
    "migration",
    "move to",
    "transition to",
    "switch from",
    // audits and analysis
    "comprehensive audit",
    "full audit",
    "complete analysis",
    "compliance audit",
    "risk assessment",
    "impact analysis",
    // planning
    "roadmap",
    "strategy",
    "design a",
    "architect",
    "implementation plan",
    "rollout plan",
    "remediation plan",
    "phased approach",
    "step-by-step",
    "staged rollout",
    // cost work
    "optimize cost",
    "optimize costs",
    "reduce cost",
    "reduce costs",
    "cost optimization",
    "cost savings",
    "roi analysis",
    "cost-benefit",
    // release patterns
    "blue-green",
    "canary deployment",
    // trade-offs
    "trade-off",
    "trade-offs",
    "tradeoff",
    "tradeoffs",
    "pros and cons",
    "comparison between",
];

/// Sequencing words; two or more distinct hits mark a multi-step request.
pub const MULTI_STEP_INDICATORS: &[&str] = &[
    "first",
    "then",
    "after",
    "afterwards",
    "next",
    "finally",
    "step",
    "steps",
    "phase",
    "phases",
    "plan for",
    "create a plan",
];

const SECURITY_KEYWORDS: &[&str] = &[
    "security",
    "secure",
    "insecure",
    "vulnerability",
    "vulnerabilities",
    "encryption",
    "encrypt",
    "encrypted",
    "unencrypted",
    "public access",
    "iam",
    "least privilege",
    "firewall",
    "exposed",
];

const COST_KEYWORDS: &[&str] = &[
    "cost",
    "costs",
    "costly",
    "pricing",
    "price",
    "budget",
    "spend",
    "spending",
    "expensive",
    "cheaper",
    "savings",
    "billing",
];

const COMPLIANCE_KEYWORDS: &[&str] = &[
    "compliance",
    "compliant",
    "soc2",
    "soc 2",
    "gdpr",
    "hipaa",
    "cis",
    "pci",
    "pci-dss",
    "regulation",
    "regulatory",
    "audit",
    "auditing",
];

const PERFORMANCE_KEYWORDS: &[&str] = &[
    "performance",
    "latency",
    "throughput",
    "slow",
    "speed",
    "scaling",
    "autoscaling",
    "bottleneck",
];

const DEPLOYMENT_KEYWORDS: &[&str] = &[
    "deploy",
    "deploys",
    "deployed",
    "deploying",
    "deployment",
    "deployments",
    "rollout",
    "roll out",
    "rollback",
    "roll back",
    "release",
    "blue-green",
    "canary",
    "migrate",
    "migration",
    "provision",
    "provisioning",
];

/// Keyword list for one domain.
pub fn domain_keywords(domain: DomainTag) -> &'static [&'static str] {
    match domain {
        DomainTag::Security => SECURITY_KEYWORDS,
        DomainTag::Cost => COST_KEYWORDS,
        DomainTag::Compliance => COMPLIANCE_KEYWORDS,
        DomainTag::Performance => PERFORMANCE_KEYWORDS,
        DomainTag::Deployment => DEPLOYMENT_KEYWORDS,
    }
}
