// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic request classification.
//!
//! Decides, without any model call, whether a request is answered by the
//! fast path or handed to multi-agent orchestration. Two short-circuit
//! rules run first (direct commands, simple lookups). Everything else is
//! scored from keyword, domain, length and sequencing signals.
//!
//! Scores are accumulated as integer tenths and converted to a float once,
//! so `0.3 + 0.3` compares equal to a `0.6` threshold.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tfpilot_config::TfPilotConfig;
use tfpilot_core::TfPilotError;
use tracing::debug;

use crate::keywords;

const TRIGGER_POINTS: u32 = 3;
const MAX_TRIGGER_POINTS: u32 = 9;
const MULTI_DOMAIN_POINTS: u32 = 3;
const LONG_QUERY_POINTS: u32 = 2;
const MULTI_STEP_POINTS: u32 = 2;
const MOMENTUM_POINTS: u32 = 1;
const SIMPLE_PATTERN_POINTS: u32 = 1;
const MAX_POINTS: u32 = 10;

/// Strategic history items needed in the window to add momentum.
const MOMENTUM_MIN_HITS: usize = 2;

/// Infrastructure concern areas a request can touch.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DomainTag {
    Security,
    Cost,
    Compliance,
    Performance,
    Deployment,
}

/// Which rule produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    DirectCommand,
    SimplePattern,
    Scored,
}

/// The outcome of classifying one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    /// True only when orchestration is available and the score meets the threshold.
    pub use_orchestration: bool,
    /// Complexity in `[0.0, 1.0]`.
    pub confidence_score: f64,
    /// Fired rules, joined with `"; "`.
    pub reasoning: String,
    /// Domains mentioned anywhere in the request, whatever rule fired.
    pub matched_domains: BTreeSet<DomainTag>,
    /// Trigger keywords in order of first occurrence.
    pub matched_triggers: Vec<String>,
    /// The rule that settled the score.
    pub rule: DecisionRule,
}

/// Tunable inputs to the classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Minimum score, inclusive, at which a scored request is orchestrated.
    pub complexity_threshold: f64,
    /// Simple patterns need fewer words than this; the long-query bonus needs more.
    pub long_query_word_count: usize,
    /// How many trailing history entries count toward momentum.
    pub history_window: usize,
    /// Strategic phrases worth a fixed bonus each, up to a cap.
    pub trigger_keywords: Vec<String>,
    /// Lookup openers that short-circuit to the fast path.
    pub simple_pattern_prefixes: Vec<String>,
    /// Operational commands that always take the fast path at score zero.
    pub direct_command_phrases: Vec<String>,
    /// Sequencing words; two non-overlapping hits earn the multi-step bonus.
    pub multi_step_indicators: Vec<String>,
    /// Vocabulary per domain, used for the multi-domain bonus.
    pub domain_keywords: Vec<(DomainTag, Vec<String>)>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        fn owned(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            complexity_threshold: 0.6,
            long_query_word_count: 30,
            history_window: 5,
            trigger_keywords: owned(keywords::TRIGGER_KEYWORDS),
            simple_pattern_prefixes: owned(keywords::SIMPLE_PATTERN_PREFIXES),
            direct_command_phrases: owned(keywords::DIRECT_COMMAND_PHRASES),
            multi_step_indicators: owned(keywords::MULTI_STEP_INDICATORS),
            domain_keywords: DomainTag::iter()
                .map(|tag| (tag, owned(keywords::domain_keywords(tag))))
                .collect(),
        }
    }
}

impl From<&TfPilotConfig> for ClassifierConfig {
    fn from(config: &TfPilotConfig) -> Self {
        Self {
            complexity_threshold: config.routing.complexity_threshold,
            long_query_word_count: config.routing.long_query_word_count,
            history_window: config.agent.history_window,
            ..Self::default()
        }
    }
}

/// Routes requests between the fast path and orchestration.
///
/// Stateless between calls: the same inputs always give the same decision.
#[derive(Debug, Clone, Default)]
pub struct QueryRouter {
    config: ClassifierConfig,
}

impl QueryRouter {
    /// Create a router with the built-in vocabulary and default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with explicit settings.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Whether `score` reaches the orchestration threshold.
    pub fn meets_threshold(&self, score: f64) -> bool {
        score >= self.config.complexity_threshold
    }

    /// Whether `decision` calls for orchestration, ignoring availability.
    ///
    /// Direct commands and simple patterns never do, whatever the threshold.
    pub fn warrants_orchestration(&self, decision: &RoutingDecision) -> bool {
        decision.rule == DecisionRule::Scored && self.meets_threshold(decision.confidence_score)
    }

    /// Classify one request.
    ///
    /// `recent_history` holds earlier requests, oldest first; only the last
    /// `history_window` entries are consulted. Fails only on empty or
    /// whitespace-only input.
    pub fn classify(
        &self,
        request: &str,
        orchestration_available: bool,
        recent_history: &[String],
    ) -> Result<RoutingDecision, TfPilotError> {
        let text = normalize(request);
        if text.is_empty() {
            return Err(TfPilotError::InvalidInput(
                "request must contain non-whitespace text".into(),
            ));
        }

        let domains = self.detect_domains(&text);
        let triggers = find_all(&text, &self.config.trigger_keywords);
        let word_count = text.split(' ').count();

        if self.is_direct_command(&text) {
            return Ok(self.finish(
                DecisionRule::DirectCommand,
                0,
                "direct command".into(),
                domains,
                triggers,
                orchestration_available,
            ));
        }

        if triggers.is_empty()
            && word_count < self.config.long_query_word_count
            && self
                .config
                .simple_pattern_prefixes
                .iter()
                .any(|prefix| starts_with_phrase(&text, prefix))
        {
            return Ok(self.finish(
                DecisionRule::SimplePattern,
                SIMPLE_PATTERN_POINTS,
                "simple pattern".into(),
                domains,
                triggers,
                orchestration_available,
            ));
        }

        let mut points = 0;
        let mut reasons = Vec::new();

        if !triggers.is_empty() {
            points += (TRIGGER_POINTS * triggers.len() as u32).min(MAX_TRIGGER_POINTS);
            reasons.push(format!("trigger keywords: {}", triggers.join(", ")));
        }

        if domains.len() >= 2 {
            points += MULTI_DOMAIN_POINTS;
            let names: Vec<String> = domains.iter().map(ToString::to_string).collect();
            reasons.push(format!("multiple domains: {}", names.join(", ")));
        }

        if word_count > self.config.long_query_word_count {
            points += LONG_QUERY_POINTS;
            reasons.push(format!("long query ({word_count} words)"));
        }

        let steps = find_disjoint(&text, &self.config.multi_step_indicators);
        if steps.len() >= 2 {
            points += MULTI_STEP_POINTS;
            reasons.push(format!("multi-step indicators: {}", steps.join(", ")));
        }

        let momentum_hits = self.momentum_hits(recent_history);
        if momentum_hits >= MOMENTUM_MIN_HITS {
            points += MOMENTUM_POINTS;
            reasons.push(format!(
                "conversation momentum ({momentum_hits} recent strategic requests)"
            ));
        }

        let reasoning = if reasons.is_empty() {
            "no complexity signals".to_string()
        } else {
            reasons.join("; ")
        };

        Ok(self.finish(
            DecisionRule::Scored,
            points,
            reasoning,
            domains,
            triggers,
            orchestration_available,
        ))
    }

    /// Domains whose keywords occur in `text`, as whole words or phrases.
    pub fn detect_domains(&self, text: &str) -> BTreeSet<DomainTag> {
        let text = normalize(text);
        self.config
            .domain_keywords
            .iter()
            .filter(|(_, words)| words.iter().any(|w| find_phrase(&text, w).is_some()))
            .map(|(tag, _)| *tag)
            .collect()
    }

    fn is_direct_command(&self, text: &str) -> bool {
        let text = strip_leading_words(text);
        self.config
            .direct_command_phrases
            .iter()
            .any(|phrase| starts_with_phrase(text, phrase))
    }

    /// Number of recent history items containing a trigger keyword.
    fn momentum_hits(&self, recent_history: &[String]) -> usize {
        let start = recent_history.len().saturating_sub(self.config.history_window);
        recent_history[start..]
            .iter()
            .map(|item| normalize(item))
            .filter(|item| {
                self.config
                    .trigger_keywords
                    .iter()
                    .any(|t| find_phrase(item, t).is_some())
            })
            .count()
    }

    fn finish(
        &self,
        rule: DecisionRule,
        points: u32,
        mut reasoning: String,
        matched_domains: BTreeSet<DomainTag>,
        matched_triggers: Vec<String>,
        orchestration_available: bool,
    ) -> RoutingDecision {
        let mut decision = RoutingDecision {
            use_orchestration: false,
            confidence_score: f64::from(points.min(MAX_POINTS)) / 10.0,
            reasoning: String::new(),
            matched_domains,
            matched_triggers,
            rule,
        };
        if self.warrants_orchestration(&decision) {
            if orchestration_available {
                decision.use_orchestration = true;
            } else {
                reasoning.push_str("; orchestration unavailable");
            }
        }
        decision.reasoning = reasoning;

        debug!(
            rule = %decision.rule,
            score = decision.confidence_score,
            orchestrate = decision.use_orchestration,
            reasoning = %decision.reasoning,
            "request classified"
        );
        decision
    }
}

/// Lowercase, trim, and collapse internal whitespace to single spaces.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_leading_words(mut text: &str) -> &str {
    for word in keywords::IGNORED_LEADING_WORDS {
        if starts_with_phrase(text, word) {
            text = text[word.len()..].trim_start();
        }
    }
    text
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `text` begins with `phrase` and the phrase ends on a word boundary.
fn starts_with_phrase(text: &str, phrase: &str) -> bool {
    !phrase.is_empty()
        && text.starts_with(phrase)
        && !text[phrase.len()..].chars().next().is_some_and(is_word_char)
}

/// Byte offset of the first whole-word occurrence of `phrase` in `text`.
fn find_phrase(text: &str, phrase: &str) -> Option<usize> {
    if phrase.is_empty() {
        return None;
    }
    text.match_indices(phrase)
        .map(|(i, _)| i)
        .find(|&i| is_whole_word(text, i, phrase.len()))
}

fn is_whole_word(text: &str, start: usize, len: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[start + len..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Every phrase from `candidates` present in `text`, ordered by first
/// occurrence. Ties keep list order.
fn find_all(text: &str, candidates: &[String]) -> Vec<String> {
    let mut hits: Vec<(usize, usize, &String)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, phrase)| find_phrase(text, phrase).map(|pos| (pos, idx, phrase)))
        .collect();
    hits.sort_by_key(|(pos, idx, _)| (*pos, *idx));

    let mut seen = BTreeSet::new();
    hits.into_iter()
        .filter(|(_, _, phrase)| seen.insert(phrase.as_str()))
        .map(|(_, _, phrase)| phrase.clone())
        .collect()
}

/// Whole-word hits of `candidates` whose spans do not overlap, scanning left
/// to right and preferring the longest phrase at each position.
fn find_disjoint(text: &str, candidates: &[String]) -> Vec<String> {
    let mut spans: Vec<(usize, usize, &String)> = candidates
        .iter()
        .filter(|phrase| !phrase.is_empty())
        .flat_map(|phrase| {
            text.match_indices(phrase.as_str())
                .filter(move |&(i, _)| is_whole_word(text, i, phrase.len()))
                .map(move |(i, _)| (i, i + phrase.len(), phrase))
        })
        .collect();
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut end = 0;
    let mut seen = BTreeSet::new();
    let mut hits = Vec::new();
    for (start, stop, phrase) in spans {
        if start < end {
            continue;
        }
        end = stop;
        if seen.insert(phrase.as_str()) {
            hits.push(phrase.clone());
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> QueryRouter {
        QueryRouter::new()
    }

    fn classify(text: &str) -> RoutingDecision {
        router().classify(text, true, &[]).unwrap()
    }

    #[test]
    fn simple_count_question_takes_fast_path() {
        let d = classify("How many virtual machines are defined?");
        assert!(!d.use_orchestration);
        assert!(d.confidence_score < 0.3);
        assert_eq!(d.rule, DecisionRule::SimplePattern);
        assert_eq!(d.reasoning, "simple pattern");
    }

    #[test]
    fn direct_command_scores_zero() {
        let d = classify("Run terraform plan");
        assert!(!d.use_orchestration);
        assert_eq!(d.confidence_score, 0.0);
        assert_eq!(d.reasoning, "direct command");
    }

    #[test]
    fn direct_command_wins_over_triggers() {
        let d = classify("terraform plan for the migration roadmap");
        assert_eq!(d.rule, DecisionRule::DirectCommand);
        assert_eq!(d.confidence_score, 0.0);
        assert!(!d.use_orchestration);
        assert_eq!(d.matched_triggers, vec!["migration", "roadmap"]);
    }

    #[test]
    fn polite_direct_command_is_recognized() {
        let d = classify("please   run terraform validate");
        assert_eq!(d.rule, DecisionRule::DirectCommand);
    }

    #[test]
    fn direct_command_needs_word_boundary() {
        let d = classify("terraform planning strategy for next quarter");
        assert_eq!(d.rule, DecisionRule::Scored);
        assert!(d.matched_triggers.contains(&"strategy".to_string()));
    }

    #[test]
    fn multi_domain_audit_orchestrates() {
        let d = classify(
            "Perform a comprehensive security and cost audit with a remediation roadmap",
        );
        assert!(d.use_orchestration);
        assert!(d.confidence_score >= 0.6);
        assert!(d.matched_domains.contains(&DomainTag::Security));
        assert!(d.matched_domains.contains(&DomainTag::Cost));
        assert!(d.matched_triggers.contains(&"roadmap".to_string()));
    }

    #[test]
    fn unavailable_orchestration_never_orchestrates() {
        let text = "Create a migration strategy and roadmap to move to Azure";
        let available = router().classify(text, true, &[]).unwrap();
        let unavailable = router().classify(text, false, &[]).unwrap();

        assert!(available.use_orchestration);
        assert!(!unavailable.use_orchestration);
        assert_eq!(available.confidence_score, unavailable.confidence_score);
        assert!(unavailable.reasoning.ends_with("orchestration unavailable"));
    }

    #[test]
    fn empty_and_blank_requests_are_invalid() {
        for text in ["", "   ", "\t\n"] {
            let err = router().classify(text, true, &[]).unwrap_err();
            assert!(err.is_invalid_input(), "{text:?} gave {err}");
        }
    }

    #[test]
    fn long_query_adds_two_tenths() {
        let short = "Review the network configuration of the shared services account";
        let filler = " and the subnets and the gateways and the route tables".repeat(4);
        let long = format!("{short}{filler}");

        let a = classify(short);
        let b = classify(&long);
        assert!(long.split_whitespace().count() > 30);
        assert_eq!(a.confidence_score, 0.0);
        assert_eq!(b.confidence_score, 0.2);
        assert!(b.reasoning.contains("long query"));
    }

    #[test]
    fn triggers_are_capped_at_three() {
        let d = classify(
            "migration roadmap strategy phased approach risk assessment for the platform",
        );
        assert_eq!(d.matched_triggers.len(), 5);
        assert_eq!(d.confidence_score, 0.9);
    }

    #[test]
    fn triggers_recorded_in_first_occurrence_order() {
        let d = classify("we need a roadmap before the migration");
        assert_eq!(d.matched_triggers, vec!["roadmap", "migration"]);
    }

    #[test]
    fn trigger_matching_is_whole_word() {
        let d = classify("the architecture team reviewed the strategic plan");
        assert!(d.matched_triggers.is_empty(), "{:?}", d.matched_triggers);
    }

    #[test]
    fn domain_matching_is_whole_word() {
        let domains = router().detect_domains("discuss the costume budget");
        assert_eq!(domains, BTreeSet::from([DomainTag::Cost]));
        assert!(router().detect_domains("a costume party").is_empty());
    }

    #[test]
    fn phrase_domain_keyword_matches() {
        let domains = router().detect_domains("Block PUBLIC   ACCESS on buckets");
        assert!(domains.contains(&DomainTag::Security));
    }

    #[test]
    fn multi_step_indicators_add_score() {
        let d = classify("Review the modules first, then tag the buckets, finally report");
        assert!(d.reasoning.contains("multi-step"));
        assert_eq!(d.confidence_score, 0.2);
    }

    #[test]
    fn overlapping_step_words_count_once() {
        let d = classify("Create a plan for the new subnets");
        assert!(!d.reasoning.contains("multi-step"));
        assert_eq!(d.confidence_score, 0.0);

        let d = classify("Create a plan for the subnets, then apply it");
        assert!(d.reasoning.contains("multi-step indicators: create a plan, then"));
        assert_eq!(d.confidence_score, 0.2);
    }

    #[test]
    fn disjoint_matching_prefers_the_longer_phrase() {
        let candidates: Vec<String> = ["plan for", "create a plan", "then"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            find_disjoint("create a plan for it then go", &candidates),
            vec!["create a plan", "then"]
        );
        assert!(find_disjoint("steps", &["step".to_string()]).is_empty());
    }

    #[test]
    fn history_momentum_adds_a_tenth() {
        let history = vec![
            "Draft a migration roadmap".to_string(),
            "What about the cost optimization angle".to_string(),
        ];
        let text = "Review the load balancer modules";
        let without = router().classify(text, true, &[]).unwrap();
        let with = router().classify(text, true, &history).unwrap();
        assert_eq!(without.confidence_score, 0.0);
        assert_eq!(with.confidence_score, 0.1);
        assert!(with.reasoning.contains("momentum"));
    }

    #[test]
    fn history_outside_window_is_ignored() {
        let mut history = vec![
            "Draft a migration roadmap".to_string(),
            "Plan the cost optimization".to_string(),
        ];
        history.extend((0..5).map(|i| format!("list resources in module {i}")));
        let d = router()
            .classify("Review the load balancer modules", true, &history)
            .unwrap();
        assert_eq!(d.confidence_score, 0.0);
    }

    #[test]
    fn history_does_not_affect_short_circuits() {
        let history = vec!["migration roadmap".to_string(), "cost strategy".to_string()];
        let d = router()
            .classify("How many buckets exist?", true, &history)
            .unwrap();
        assert_eq!(d.rule, DecisionRule::SimplePattern);
        assert_eq!(d.confidence_score, 0.1);
    }

    #[test]
    fn simple_prefix_with_trigger_is_scored() {
        let d = classify("What is the best migration strategy for our databases");
        assert_eq!(d.rule, DecisionRule::Scored);
        assert_eq!(d.confidence_score, 0.6);
    }

    #[test]
    fn no_signals_reasoning() {
        let d = classify("Review the load balancer modules");
        assert_eq!(d.reasoning, "no complexity signals");
        assert_eq!(d.confidence_score, 0.0);
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "Design a phased approach for GDPR compliance and encryption at rest";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn threshold_comes_from_config() {
        let router = QueryRouter::with_config(ClassifierConfig {
            complexity_threshold: 0.3,
            ..ClassifierConfig::default()
        });
        let d = router.classify("Draft a roadmap", true, &[]).unwrap();
        assert!(d.use_orchestration);
    }

    #[test]
    fn config_conversion_reads_routing_section() {
        let mut config = TfPilotConfig::default();
        config.routing.complexity_threshold = 0.8;
        config.routing.long_query_word_count = 12;
        config.agent.history_window = 2;
        let cc = ClassifierConfig::from(&config);
        assert_eq!(cc.complexity_threshold, 0.8);
        assert_eq!(cc.long_query_word_count, 12);
        assert_eq!(cc.history_window, 2);
        assert!(!cc.trigger_keywords.is_empty());
    }

    #[test]
    fn domain_tag_parses_and_displays() {
        assert_eq!("cost".parse::<DomainTag>().unwrap(), DomainTag::Cost);
        assert_eq!(DomainTag::Compliance.to_string(), "compliance");
    }

    #[test]
    fn decision_serializes_domains_in_order() {
        let d = classify("Check encryption and compliance and spending");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(
            json["matched_domains"],
            serde_json::json!(["security", "cost", "compliance"])
        );
        assert_eq!(json["rule"], "scored");
    }

    fn router_with_threshold(threshold: f64) -> QueryRouter {
        QueryRouter::with_config(ClassifierConfig {
            complexity_threshold: threshold,
            ..ClassifierConfig::default()
        })
    }

    #[test]
    fn direct_command_never_orchestrates_at_zero_threshold() {
        let router = router_with_threshold(0.0);
        let d = router.classify("terraform plan", true, &[]).unwrap();
        assert_eq!(d.rule, DecisionRule::DirectCommand);
        assert!(!d.use_orchestration);
        assert_eq!(d.confidence_score, 0.0);
        assert_eq!(d.reasoning, "direct command");

        let d = router.classify("terraform plan", false, &[]).unwrap();
        assert_eq!(d.reasoning, "direct command");
    }

    #[test]
    fn simple_pattern_never_orchestrates_at_its_own_score() {
        let router = router_with_threshold(0.1);
        let d = router
            .classify("How many buckets are there?", true, &[])
            .unwrap();
        assert_eq!(d.rule, DecisionRule::SimplePattern);
        assert!(!d.use_orchestration);
        assert_eq!(d.confidence_score, 0.1);
        assert!(!router.warrants_orchestration(&d));
    }

    #[test]
    fn scored_requests_still_honor_a_zero_threshold() {
        let router = router_with_threshold(0.0);
        let d = router.classify("Review the modules", true, &[]).unwrap();
        assert_eq!(d.rule, DecisionRule::Scored);
        assert!(d.use_orchestration);
    }

    fn words(prefix: &str, total: usize) -> String {
        let filler: Vec<String> = (prefix.split(' ').count()..total)
            .map(|i| format!("w{i}"))
            .collect();
        format!("{prefix} {}", filler.join(" "))
    }

    #[test]
    fn word_count_boundary_skips_both_simple_and_long_rules() {
        let at_limit = words("how many", 30);
        assert_eq!(at_limit.split(' ').count(), 30);
        let d = classify(&at_limit);
        assert_eq!(d.rule, DecisionRule::Scored);
        assert!(!d.reasoning.contains("long query"));
        assert_eq!(d.reasoning, "no complexity signals");
        assert_eq!(d.confidence_score, 0.0);

        assert_eq!(classify(&words("how many", 29)).rule, DecisionRule::SimplePattern);

        let over = classify(&words("how many", 31));
        assert!(over.reasoning.contains("long query (31 words)"));
        assert_eq!(over.confidence_score, 0.2);
    }

    #[test]
    fn find_phrase_respects_boundaries() {
        assert_eq!(find_phrase("cost-benefit review", "cost-benefit"), Some(0));
        assert_eq!(find_phrase("costs", "cost"), None);
        assert_eq!(find_phrase("the cost.", "cost"), Some(4));
        assert_eq!(find_phrase("", "cost"), None);
    }
}
