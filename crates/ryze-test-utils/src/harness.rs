// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for session-level integration testing.
//!
//! `TestHarness` assembles a generation session over a scripted backend, a
//! manual clock for the cooldown gate and an in-memory project store.

use std::sync::Arc;
use std::time::Duration;

use ryze_cooldown::CooldownGate;
use ryze_core::RyzeError;
use ryze_generation::{Orchestrator, RetryPolicy};
use ryze_session::GenerationSession;
use secrecy::SecretString;

use crate::manual_clock::ManualClock;
use crate::memory_store::InMemoryProjectStore;
use crate::mock_provider::MockProvider;

/// Shared default key used by harness sessions.
pub const DEFAULT_TEST_KEY: &str = "shared-test-key";

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    errors: Vec<RyzeError>,
    default_credential: Option<String>,
    cooldown: Duration,
    policy: RetryPolicy,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            errors: Vec::new(),
            default_credential: Some(DEFAULT_TEST_KEY.to_string()),
            cooldown: Duration::from_secs(8),
            policy: RetryPolicy::default(),
        }
    }

    /// Set scripted backend answers.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Queue backend errors ahead of the scripted answers.
    pub fn with_mock_errors(mut self, errors: Vec<RyzeError>) -> Self {
        self.errors = errors;
        self
    }

    /// Override (or remove) the shared default credential.
    pub fn with_default_credential(mut self, key: Option<&str>) -> Self {
        self.default_credential = key.map(str::to_string);
        self
    }

    pub fn with_cooldown(mut self, duration: Duration) -> Self {
        self.cooldown = duration;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the harness.
    pub async fn build(self) -> TestHarness {
        let provider = Arc::new(MockProvider::new());
        for err in self.errors {
            provider.push_error(err).await;
        }
        for response in self.responses {
            provider.push_response(response).await;
        }

        let clock = ManualClock::new();
        let gate = Arc::new(CooldownGate::new(self.cooldown, clock.clone()));
        let orchestrator = Arc::new(
            Orchestrator::new(
                provider.clone(),
                self.default_credential.map(SecretString::from),
            )
            .with_policy(self.policy),
        );
        let session = GenerationSession::new(orchestrator.clone(), gate.clone());

        TestHarness {
            session,
            orchestrator,
            provider,
            clock,
            gate,
            store: Arc::new(InMemoryProjectStore::new()),
        }
    }
}

/// A complete session stack over mocks.
pub struct TestHarness {
    pub session: GenerationSession,
    pub orchestrator: Arc<Orchestrator>,
    pub provider: Arc<MockProvider>,
    pub clock: Arc<ManualClock>,
    pub gate: Arc<CooldownGate>,
    pub store: Arc<InMemoryProjectStore>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A second session sharing this harness's orchestrator and gate.
    pub fn sibling_session(&self) -> GenerationSession {
        GenerationSession::new(self.orchestrator.clone(), self.gate.clone())
    }
}
