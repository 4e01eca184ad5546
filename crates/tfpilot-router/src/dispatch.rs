// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request dispatch: classify, then run the chosen processor.
//!
//! Orchestration failures never reach the caller. The fast path answers
//! instead and the response carries a note saying so.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::Display;
use tfpilot_core::{Processor, ProcessorResponse, TfPilotError};
use tracing::{info, warn};

use crate::classifier::{QueryRouter, RoutingDecision};

/// Which processor produced the final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Fast,
    Orchestrated,
}

/// Everything a caller needs to display and log one dispatched request.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub decision: RoutingDecision,
    pub route: Route,
    pub response: ProcessorResponse,
    /// The router wanted orchestration but the fast path answered.
    pub fell_back: bool,
}

/// Ties a [`QueryRouter`] to a fast processor and an optional orchestrator.
pub struct Dispatcher {
    router: QueryRouter,
    fast: Arc<dyn Processor>,
    orchestrated: Option<Arc<dyn Processor>>,
    force_fast: bool,
}

impl Dispatcher {
    pub fn new(router: QueryRouter, fast: Arc<dyn Processor>) -> Self {
        Self {
            router,
            fast,
            orchestrated: None,
            force_fast: false,
        }
    }

    /// Attach the multi-agent processor.
    pub fn with_orchestrator(mut self, orchestrated: Arc<dyn Processor>) -> Self {
        self.orchestrated = Some(orchestrated);
        self
    }

    /// Treat orchestration as unavailable even when one is attached.
    pub fn with_force_fast(mut self, force_fast: bool) -> Self {
        self.force_fast = force_fast;
        self
    }

    pub fn router(&self) -> &QueryRouter {
        &self.router
    }

    pub fn orchestration_available(&self) -> bool {
        !self.force_fast && self.orchestrated.is_some()
    }

    /// Classify `request` and run it on the selected processor.
    ///
    /// Errors from the fast path are returned as-is. Errors from
    /// orchestration trigger a fast-path retry.
    pub async fn dispatch(
        &self,
        request: &str,
        history: &[String],
    ) -> Result<DispatchOutcome, TfPilotError> {
        let available = self.orchestration_available();
        let decision = self.router.classify(request, available, history)?;

        if decision.use_orchestration {
            if let Some(orchestrated) = &self.orchestrated {
                info!(
                    processor = orchestrated.name(),
                    score = decision.confidence_score,
                    "routing to orchestration"
                );
                match orchestrated.process(request, history).await {
                    Ok(response) => {
                        return Ok(DispatchOutcome {
                            decision,
                            route: Route::Orchestrated,
                            response,
                            fell_back: false,
                        });
                    }
                    Err(e) => {
                        warn!(error = %e, "orchestration failed, falling back to fast path");
                        let response = self
                            .fast
                            .process(request, history)
                            .await?
                            .with_note(format!(
                                "orchestration failed ({e}); answered by the fast path"
                            ));
                        return Ok(DispatchOutcome {
                            decision,
                            route: Route::Fast,
                            response,
                            fell_back: true,
                        });
                    }
                }
            }
        }

        info!(
            processor = self.fast.name(),
            score = decision.confidence_score,
            "routing to fast path"
        );
        let mut response = self.fast.process(request, history).await?;
        let fell_back = !available && self.router.warrants_orchestration(&decision);
        if fell_back {
            response = response.with_note("orchestration unavailable; answered by the fast path");
        }

        Ok(DispatchOutcome {
            decision,
            route: Route::Fast,
            response,
            fell_back,
        })
    }
}
