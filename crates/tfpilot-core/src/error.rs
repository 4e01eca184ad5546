// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for tfpilot.

use thiserror::Error;

/// The primary error type shared by every tfpilot crate.
#[derive(Debug, Error)]
pub enum TfPilotError {
    /// Configuration errors (invalid values, missing credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller supplied a request that cannot be processed (e.g. empty text).
    /// Recoverable: re-prompt the user.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// LLM provider errors (HTTP failure, API error body, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Terraform gateway errors (binary missing, spawn failure).
    ///
    /// A Terraform command that runs and exits non-zero is not an error;
    /// it is reported through `TerraformResult::success`.
    #[error("terraform error: {message}")]
    Terraform {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The orchestrated path could not produce a response.
    #[error("orchestration error: {0}")]
    Orchestration(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Local I/O failure (history export, log file).
    #[error("i/o error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TfPilotError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a Terraform error without an underlying source.
    pub fn terraform(message: impl Into<String>) -> Self {
        Self::Terraform {
            message: message.into(),
            source: None,
        }
    }

    /// True for errors the user can fix by rephrasing the request.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
