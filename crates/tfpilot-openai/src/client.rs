// SPDX-FileCopyrightText: 2026 tfpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the chat-completions API.
//!
//! Provides [`OpenAiClient`] which handles authentication, request
//! encoding, and a single retry on transient errors.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tfpilot_config::model::{ProviderConfig, ProviderKind};
use tfpilot_core::TfPilotError;
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, CompletionRequest, CompletionResponse, ModelList};

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for one OpenAI-style endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    max_retries: u32,
}

impl OpenAiClient {
    /// Build a client from the `[provider]` section.
    ///
    /// `kind = "openai"` requires an API key; compatible servers work
    /// without one.
    pub fn new(config: &ProviderConfig) -> Result<Self, TfPilotError> {
        let api_key = config.resolved_api_key();
        if config.kind == ProviderKind::OpenAi && api_key.is_none() {
            return Err(TfPilotError::Config(
                "provider.api_key or OPENAI_API_KEY is required for kind = \"openai\"".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                TfPilotError::Config(format!("invalid API key header value: {e}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TfPilotError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: 1,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a completion request and returns the decoded response.
    ///
    /// On transient errors (429, 500, 502, 503), retries once after a 1-second delay.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, TfPilotError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await
                .map_err(|e| TfPilotError::Provider {
                    message: format!("HTTP request to {url} failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                return decode(response).await;
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(TfPilotError::provider(format!("API returned {status}: {body}")));
                continue;
            }

            return Err(api_error(status, &body));
        }

        Err(last_error
            .unwrap_or_else(|| TfPilotError::provider("completion request failed after retries")))
    }

    /// Model ids advertised by `GET /models`; used as a connectivity check.
    pub async fn list_models(&self) -> Result<Vec<String>, TfPilotError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TfPilotError::Provider {
                message: format!("HTTP request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }
        let list: ModelList = decode(response).await?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TfPilotError> {
    let body = response.text().await.map_err(|e| TfPilotError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_str(&body).map_err(|e| TfPilotError::Provider {
        message: format!("failed to parse API response: {e}"),
        source: Some(Box::new(e)),
    })
}

fn api_error(status: reqwest::StatusCode, body: &str) -> TfPilotError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => match api_err.error.type_ {
            Some(kind) => format!("API error ({kind}): {}", api_err.error.message),
            None => format!("API error ({status}): {}", api_err.error.message),
        },
        Err(_) => format!("API returned {status}: {body}"),
    };
    TfPilotError::provider(message)
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}
