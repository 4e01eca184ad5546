// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory shell session: the turn log, the routing history window, and
//! the JSON export format used by `/export` and `/import`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tfpilot_core::{TfPilotError, TokenUsage};
use tfpilot_router::{DispatchOutcome, Route};

/// Version of the exported conversation log.
pub const LOG_FORMAT_VERSION: u32 = 1;

/// One answered request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub timestamp: DateTime<Utc>,
    pub request: String,
    pub response: String,
    pub route: Route,
    pub confidence_score: f64,
    #[serde(default)]
    pub usage: TokenUsage,
}

impl Turn {
    pub fn from_outcome(request: &str, outcome: &DispatchOutcome) -> Self {
        Self {
            timestamp: Utc::now(),
            request: request.to_string(),
            response: outcome.response.render(),
            route: outcome.route,
            confidence_score: outcome.decision.confidence_score,
            usage: outcome.response.usage,
        }
    }
}

/// On-disk conversation log.
#[derive(Debug, Serialize, Deserialize)]
struct ConversationLog {
    version: u32,
    exported_at: DateTime<Utc>,
    turns: Vec<Turn>,
}

/// Session state for one shell invocation.
#[derive(Debug)]
pub struct Session {
    turns: Vec<Turn>,
    history_window: usize,
    usage: TokenUsage,
}

impl Session {
    pub fn new(history_window: usize) -> Self {
        Self {
            turns: Vec::new(),
            history_window,
            usage: TokenUsage::default(),
        }
    }

    pub fn record(&mut self, turn: Turn) {
        self.usage.add(turn.usage);
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Tokens spent since the session started (imported turns excluded).
    pub fn usage(&self) -> TokenUsage {
        self.usage
    }

    /// The most recent requests, oldest first, bounded by the history window.
    pub fn recent_requests(&self) -> Vec<String> {
        let skip = self.turns.len().saturating_sub(self.history_window);
        self.turns[skip..].iter().map(|t| t.request.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Write every turn to `path` as pretty-printed JSON.
    pub fn export(&self, path: &Path) -> Result<usize, TfPilotError> {
        let log = ConversationLog {
            version: LOG_FORMAT_VERSION,
            exported_at: Utc::now(),
            turns: self.turns.clone(),
        };
        let json = serde_json::to_string_pretty(&log)
            .map_err(|e| TfPilotError::Internal(format!("failed to serialize session: {e}")))?;
        std::fs::write(path, json)?;
        Ok(self.turns.len())
    }

    /// Append the turns stored in `path`. Returns how many were read.
    pub fn import(&mut self, path: &Path) -> Result<usize, TfPilotError> {
        let content = std::fs::read_to_string(path)?;
        let log: ConversationLog = serde_json::from_str(&content).map_err(|e| {
            TfPilotError::InvalidInput(format!("{} is not a conversation log: {e}", path.display()))
        })?;
        if log.version != LOG_FORMAT_VERSION {
            return Err(TfPilotError::InvalidInput(format!(
                "unsupported conversation log version {} (expected {LOG_FORMAT_VERSION})",
                log.version
            )));
        }
        let count = log.turns.len();
        self.turns.extend(log.turns);
        Ok(count)
    }
}
