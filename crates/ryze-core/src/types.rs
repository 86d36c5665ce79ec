// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the generation pipeline, the session and the adapters.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::RyzeError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Provider,
    Storage,
}

/// A single turn's input: what to build and, for refinements, what to start from.
///
/// Constructed per user action and discarded after use. Fields are private so the
/// non-empty description invariant cannot be bypassed.
#[derive(Debug)]
pub struct GenerationRequest {
    description: String,
    prior_artifact: Option<String>,
    credential_override: Option<SecretString>,
}

impl GenerationRequest {
    /// A "create" turn: build a page from scratch.
    pub fn create(description: impl Into<String>) -> Result<Self, RyzeError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(RyzeError::InvalidRequest(
                "description must not be empty".into(),
            ));
        }
        Ok(Self {
            description,
            prior_artifact: None,
            credential_override: None,
        })
    }

    /// A "refine" turn: edit `prior_artifact` according to `description`.
    ///
    /// An empty prior artifact is treated as absent, which turns the call into a
    /// create turn.
    pub fn refine(
        description: impl Into<String>,
        prior_artifact: impl Into<String>,
    ) -> Result<Self, RyzeError> {
        let mut request = Self::create(description)?;
        let prior = prior_artifact.into();
        if !prior.is_empty() {
            request.prior_artifact = Some(prior);
        }
        Ok(request)
    }

    /// Attaches a caller-supplied credential used instead of the shared default.
    pub fn with_credential(mut self, credential: Option<SecretString>) -> Self {
        self.credential_override =
            credential.filter(|secret| !secret.expose_secret().trim().is_empty());
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn prior_artifact(&self) -> Option<&str> {
        self.prior_artifact.as_deref()
    }

    pub fn credential_override(&self) -> Option<&SecretString> {
        self.credential_override.as_ref()
    }

    /// True for refinement turns.
    pub fn is_refinement(&self) -> bool {
        self.prior_artifact.is_some()
    }
}

/// Status of a generation session. Exactly one value is held at a time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenerationStatus {
    #[default]
    Idle,
    Generating,
    Success,
    Error,
}

/// Coarse failure category carried by [`GenerationResult::Failure`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum FailureKind {
    /// No usable credential; a configuration problem, never retried.
    MissingCredential,
    /// The backend kept reporting quota exhaustion until the retry budget ran out.
    QuotaExceeded,
    /// The backend answered but nothing usable could be extracted.
    EmptyArtifact,
    /// Network failure or a non-quota backend error.
    Backend,
}

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationResult {
    /// `html` is non-empty and starts with `<`.
    Success { html: String },
    Failure { kind: FailureKind, message: String },
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    /// The HTML payload, if the turn succeeded.
    pub fn html(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { html } => Some(html),
            GenerationResult::Failure { .. } => None,
        }
    }
}

/// A single call to the generative backend.
#[derive(Debug)]
pub struct ProviderRequest {
    /// Backend model identifier.
    pub model: String,
    /// Fixed style/format directive sent at system level.
    pub system_instruction: String,
    /// The turn's instruction prompt.
    pub prompt: String,
    pub temperature: f32,
    pub top_p: f32,
    /// Credential resolved for this call (override or shared default).
    pub api_key: SecretString,
}

/// Free-text answer from the generative backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    pub text: String,
    pub model: String,
    pub finish_reason: Option<String>,
}

/// A named project persisted on explicit save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProject {
    /// Opaque unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub html: String,
    /// Description of the last turn.
    pub description: String,
    /// Descriptions of every successful turn, in submission order.
    pub history: Vec<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}
