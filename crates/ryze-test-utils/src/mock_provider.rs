// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted generative backend for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with a FIFO script of answers
//! and errors, and records every request it receives together with the
//! (tokio) instant of the call, so backoff timing can be asserted under
//! paused time.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::sync::Mutex;
use tokio::time::Instant;

use ryze_core::traits::adapter::PluginAdapter;
use ryze_core::traits::provider::ProviderAdapter;
use ryze_core::types::{AdapterType, HealthStatus, ProviderRequest, ProviderResponse};
use ryze_core::RyzeError;

/// Answer used when the script is empty and no fallback is set.
pub const DEFAULT_MOCK_HTML: &str = "<div>mock page</div>";

type ErrorFactory = Arc<dyn Fn() -> RyzeError + Send + Sync>;

/// A request as seen by the mock, with the credential exposed for assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub api_key: String,
    pub at: Instant,
}

/// A backend that replays scripted answers.
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Result<String, RyzeError>>>>,
    fallback: Option<ErrorFactory>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockProvider {
    /// Create a mock with an empty script.
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pre-loaded with successful answers.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            script: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            ..Self::new()
        }
    }

    /// Create a mock that fails every call with the error `make` builds.
    pub fn always_failing(make: impl Fn() -> RyzeError + Send + Sync + 'static) -> Self {
        Self {
            fallback: Some(Arc::new(make)),
            ..Self::new()
        }
    }

    /// Append a successful answer to the script.
    pub async fn push_response(&self, text: impl Into<String>) {
        self.script.lock().await.push_back(Ok(text.into()));
    }

    /// Append an error to the script.
    pub async fn push_error(&self, err: RyzeError) {
        self.script.lock().await.push_back(Err(err));
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_outcome(&self) -> Result<String, RyzeError> {
        if let Some(outcome) = self.script.lock().await.pop_front() {
            return outcome;
        }
        match &self.fallback {
            Some(make) => Err(make()),
            None => Ok(DEFAULT_MOCK_HTML.to_string()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// A 429 as the Gemini adapter reports it.
pub fn quota_error() -> RyzeError {
    RyzeError::Provider {
        message: "Gemini API error (429 RESOURCE_EXHAUSTED): Quota exceeded".into(),
        status: Some(429),
        source: None,
    }
}

/// A non-quota backend failure.
pub fn backend_error() -> RyzeError {
    RyzeError::Provider {
        message: "Gemini API error (500 INTERNAL): internal error".into(),
        status: Some(500),
        source: None,
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, RyzeError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RyzeError> {
        Ok(())
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, RyzeError> {
        self.requests.lock().await.push(RecordedRequest {
            model: request.model.clone(),
            system_instruction: request.system_instruction.clone(),
            prompt: request.prompt.clone(),
            api_key: request.api_key.expose_secret().to_string(),
            at: Instant::now(),
        });

        let text = self.next_outcome().await?;
        Ok(ProviderResponse {
            text,
            model: request.model,
            finish_reason: Some("STOP".to_string()),
        })
    }
}
