// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request-processing capability shared by the fast and orchestrated paths.

use async_trait::async_trait;

use crate::error::TfPilotError;
use crate::types::ProcessorResponse;

/// Turns a natural-language request into a natural-language answer.
///
/// `history` holds prior user requests, most recent last, and is passed
/// through unchanged by the dispatcher.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Stable name used in logs and response annotations.
    fn name(&self) -> &str;

    async fn process(
        &self,
        request: &str,
        history: &[String],
    ) -> Result<ProcessorResponse, TfPilotError>;
}
