// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/tfpilot/tfpilot.toml`
//! 3. `~/.config/tfpilot/tfpilot.toml`
//! 4. `./tfpilot.toml`
//! 5. `TFPILOT_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TfPilotConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/tfpilot/tfpilot.toml";

/// Per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "tfpilot.toml";

/// Config sections, used to turn `TFPILOT_<SECTION>_<KEY>` into `section.key`.
const SECTIONS: &[&str] = &["agent", "provider", "orchestration", "routing", "terraform"];

/// Path of the user-level configuration file, if a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tfpilot").join(LOCAL_CONFIG_FILE))
}

/// Every file location consulted by [`load_config`], lowest priority first.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(user) = user_config_path() {
        paths.push(user);
    }
    paths.push(PathBuf::from(LOCAL_CONFIG_FILE));
    paths
}

/// Build the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(TfPilotConfig::default()));
    for path in config_search_paths() {
        figment = figment.merge(Toml::file(path));
    }
    figment.merge(env_provider())
}

/// Load configuration from the standard file hierarchy with env overrides.
pub fn load_config() -> Result<TfPilotConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<TfPilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TfPilotConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env overrides.
pub fn load_config_from_path(path: &Path) -> Result<TfPilotConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TfPilotConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment provider mapping `TFPILOT_ROUTING_COMPLEXITY_THRESHOLD` to
/// `routing.complexity_threshold`.
///
/// Only the first underscore after a known section name becomes a dot;
/// key names keep their own underscores.
fn env_provider() -> Env {
    Env::prefixed("TFPILOT_").map(|key| map_env_key(key.as_str()).into())
}

fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(*section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}
