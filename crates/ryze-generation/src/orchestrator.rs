// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation orchestration.
//!
//! [`Orchestrator`] turns a [`GenerationRequest`] into a finished artifact:
//! it resolves the credential, builds the prompt, calls the backend once per
//! attempt, retries quota errors with linear backoff, and runs the answer
//! through the extractor. It is the only place retry decisions are made.

use std::sync::Arc;
use std::time::Duration;

use ryze_config::RyzeConfig;
use ryze_config::model::GenerationConfig;
use ryze_core::{
    GenerationRequest, GenerationResult, ProviderAdapter, ProviderRequest, RyzeError,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use crate::classify::{DefaultQuotaClassifier, QuotaClassifier};
use crate::error::GenerationError;
use crate::extract::{ExtractionQuality, extract_with_quality};
use crate::prompt::{SYSTEM_INSTRUCTION, build_prompt};

/// Bounded linear backoff for quota errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Wait before attempt 2.
    pub initial_delay: Duration,
    /// Added to the wait before each further attempt.
    pub step: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(10),
            step: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &GenerationConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_secs(config.initial_delay_secs),
            step: Duration::from_secs(config.backoff_step_secs),
        }
    }

    /// Upper bound on backend calls for one turn.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before 1-based `attempt`; zero for the first. Saturates at
    /// [`Duration::MAX`].
    pub fn delay_before(&self, attempt: u32) -> Duration {
        match attempt {
            0 | 1 => Duration::ZERO,
            k => self
                .initial_delay
                .saturating_add(self.step.saturating_mul(k - 2)),
        }
    }
}

/// Sampling parameters forwarded to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampling {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.2,
            top_p: 0.8,
        }
    }
}

/// A successful turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Non-empty, starts with `<`.
    pub html: String,
    pub quality: ExtractionQuality,
    /// Backend calls made, including the successful one.
    pub attempts: u32,
}

/// Drives a single turn against the generative backend.
pub struct Orchestrator {
    provider: Arc<dyn ProviderAdapter>,
    classifier: Arc<dyn QuotaClassifier>,
    policy: RetryPolicy,
    sampling: Sampling,
    default_credential: Option<SecretString>,
}

impl Orchestrator {
    /// Creates an orchestrator with the default policy, classifier and sampling.
    pub fn new(provider: Arc<dyn ProviderAdapter>, default_credential: Option<SecretString>) -> Self {
        Self {
            provider,
            classifier: Arc::new(DefaultQuotaClassifier),
            policy: RetryPolicy::default(),
            sampling: Sampling::default(),
            default_credential: default_credential
                .filter(|secret| !secret.expose_secret().trim().is_empty()),
        }
    }

    /// Creates an orchestrator from the loaded configuration, resolving the
    /// shared default credential from `[gemini]` and the environment.
    pub fn from_config(provider: Arc<dyn ProviderAdapter>, config: &RyzeConfig) -> Self {
        Self::new(provider, config.gemini.default_credential())
            .with_policy(RetryPolicy::from_config(&config.generation))
            .with_sampling(Sampling {
                model: config.gemini.model.clone(),
                temperature: config.gemini.temperature,
                top_p: config.gemini.top_p,
            })
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_classifier(mut self, classifier: impl QuotaClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Whether a shared default credential is configured.
    pub fn has_default_credential(&self) -> bool {
        self.default_credential.is_some()
    }

    /// Runs one turn.
    ///
    /// Quota errors are retried up to the policy's budget, sequentially, with
    /// the computed delay before each retry. Every other error surfaces on the
    /// attempt that produced it.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let credential = self.resolve_credential(request)?;
        let prompt = build_prompt(request.description(), request.prior_artifact());
        let max_attempts = self.policy.max_attempts();

        info!(
            refine = request.is_refinement(),
            description_len = request.description().len(),
            model = %self.sampling.model,
            "starting generation"
        );

        let mut attempt = 1;
        loop {
            let outcome = self
                .provider
                .complete(self.provider_request(&prompt, credential))
                .await;

            match outcome {
                Ok(response) => {
                    let extraction = extract_with_quality(&response.text);
                    if !extraction.is_usable() {
                        warn!(attempt, raw_len = response.text.len(), "backend answer held no markup");
                        return Err(GenerationError::EmptyArtifact);
                    }
                    debug!(
                        attempt,
                        quality = ?extraction.quality,
                        html_len = extraction.html.len(),
                        "generation succeeded"
                    );
                    return Ok(GeneratedArtifact {
                        html: extraction.html,
                        quality: extraction.quality,
                        attempts: attempt,
                    });
                }
                Err(RyzeError::MissingCredential) => {
                    return Err(GenerationError::MissingCredential);
                }
                Err(err) if self.classifier.is_quota(&err) => {
                    if attempt >= max_attempts {
                        warn!(attempts = attempt, error = %err, "quota retries exhausted");
                        return Err(GenerationError::QuotaExceeded { attempts: attempt });
                    }
                    let delay = self.policy.delay_before(attempt + 1);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "quota error from backend, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "generation failed");
                    return Err(GenerationError::Backend {
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    /// Runs one turn and folds the outcome into a [`GenerationResult`].
    pub async fn generate_result(&self, request: &GenerationRequest) -> GenerationResult {
        match self.generate(request).await {
            Ok(artifact) => GenerationResult::Success {
                html: artifact.html,
            },
            Err(err) => GenerationResult::Failure {
                kind: err.kind(),
                message: err.user_message().to_string(),
            },
        }
    }

    fn resolve_credential<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Result<&'a SecretString, GenerationError> {
        request
            .credential_override()
            .or(self.default_credential.as_ref())
            .ok_or(GenerationError::MissingCredential)
    }

    fn provider_request(&self, prompt: &str, credential: &SecretString) -> ProviderRequest {
        ProviderRequest {
            model: self.sampling.model.clone(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt.to_string(),
            temperature: self.sampling.temperature,
            top_p: self.sampling.top_p,
            api_key: SecretString::from(credential.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("provider", &self.provider.name())
            .field("policy", &self.policy)
            .field("sampling", &self.sampling)
            .field("default_credential", &self.default_credential.is_some())
            .finish()
    }
}
