// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Checks semantic constraints serde cannot express. All problems are
//! collected and returned together.

use crate::diagnostic::ConfigError;
use crate::model::TfPilotConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound on `agent.history_window`.
pub const MAX_HISTORY_WINDOW: usize = 50;

/// Validate a deserialized configuration.
pub fn validate_config(config: &TfPilotConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "agent.log_level `{}` must be one of: {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        )));
    }

    if config.agent.history_window > MAX_HISTORY_WINDOW {
        errors.push(ConfigError::validation(format!(
            "agent.history_window must be at most {MAX_HISTORY_WINDOW}, got {}",
            config.agent.history_window
        )));
    }

    if config.provider.model.trim().is_empty() {
        errors.push(ConfigError::validation("provider.model must not be empty"));
    }

    let base_url = config.provider.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::validation(format!(
            "provider.base_url `{base_url}` must start with http:// or https://"
        )));
    }

    if config.provider.max_tokens == 0 {
        errors.push(ConfigError::validation("provider.max_tokens must be positive"));
    }

    if config.provider.timeout_secs == 0 {
        errors.push(ConfigError::validation("provider.timeout_secs must be positive"));
    }

    let threshold = config.routing.complexity_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::validation(format!(
            "routing.complexity_threshold must be within [0.0, 1.0], got {threshold}"
        )));
    }

    if config.routing.long_query_word_count == 0 {
        errors.push(ConfigError::validation(
            "routing.long_query_word_count must be at least 1",
        ));
    }

    if config.orchestration.specialist_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "orchestration.specialist_timeout_secs must be positive",
        ));
    }

    if config.orchestration.max_specialists == 0 {
        errors.push(ConfigError::validation(
            "orchestration.max_specialists must be at least 1",
        ));
    }

    if config.terraform.binary.trim().is_empty() {
        errors.push(ConfigError::validation("terraform.binary must not be empty"));
    }

    if config.terraform.working_dir.trim().is_empty() {
        errors.push(ConfigError::validation("terraform.working_dir must not be empty"));
    }

    if config.terraform.command_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "terraform.command_timeout_secs must be positive",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
