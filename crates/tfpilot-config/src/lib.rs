// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for tfpilot.
//!
//! TOML files in the usual hierarchy, `TFPILOT_*` environment overrides,
//! strict key checking, and miette diagnostics with typo suggestions.
//!
//! ```no_run
//! let config = tfpilot_config::load_and_validate().expect("config errors");
//! println!("threshold: {}", config.routing.complexity_threshold);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TfPilotConfig;

/// Load configuration from the file hierarchy and validate it.
pub fn load_and_validate() -> Result<TfPilotConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from one explicit file (plus env) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<TfPilotConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        read_source(path).into_iter().collect()
    })
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<TfPilotConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<TfPilotConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TfPilotConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read every config file that exists so diagnostics can show source spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::config_search_paths()
        .iter()
        .filter_map(|p| read_source(p))
        .collect()
}

fn read_source(path: &Path) -> Option<(String, String)> {
    let content = std::fs::read_to_string(path).ok()?;
    // Figment reports absolute paths, so match on the canonical form.
    let name = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    Some((name.display().to_string(), content))
}
