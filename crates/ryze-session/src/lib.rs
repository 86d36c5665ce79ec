// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation session: the composition root for one user's turns.
//!
//! States: `Idle -> Generating -> {Success, Error}`. Success and Error go
//! back to Generating on the next submission; any state returns to Idle on
//! reset.
//!
//! The session owns the current artifact and the turn history, consults the
//! cooldown gate before dispatch (unless a personal credential is set), and
//! hands the artifact to the sandbox for rendering. Saving is always
//! caller-initiated. `submit` takes `&mut self`, so one session has at most
//! one call in flight.

pub mod error;

use std::sync::Arc;
use std::time::Duration;

use ryze_cooldown::CooldownGate;
use ryze_core::{GenerationRequest, GenerationStatus, ProjectStore, SavedProject};
use ryze_generation::{GeneratedArtifact, GenerationError, Orchestrator};
use ryze_sandbox::{RenderDocument, to_render_document};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

pub use error::SessionError;

/// Characters of the description kept in a saved project's name.
const PROJECT_NAME_CHARS: usize = 30;

/// One user's generation state.
pub struct GenerationSession {
    orchestrator: Arc<Orchestrator>,
    gate: Arc<CooldownGate>,
    personal_credential: Option<SecretString>,
    status: GenerationStatus,
    artifact: Option<String>,
    history: Vec<String>,
    last_description: Option<String>,
    last_error: Option<GenerationError>,
}

impl GenerationSession {
    pub fn new(orchestrator: Arc<Orchestrator>, gate: Arc<CooldownGate>) -> Self {
        Self {
            orchestrator,
            gate,
            personal_credential: None,
            status: GenerationStatus::Idle,
            artifact: None,
            history: Vec::new(),
            last_description: None,
            last_error: None,
        }
    }

    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// Current artifact; survives failed turns.
    pub fn artifact(&self) -> Option<&str> {
        self.artifact.as_deref()
    }

    /// Descriptions of successful turns, in submission order.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_description(&self) -> Option<&str> {
        self.last_description.as_deref()
    }

    pub fn last_error(&self) -> Option<&GenerationError> {
        self.last_error.as_ref()
    }

    /// User-facing text of the last failure.
    pub fn last_error_message(&self) -> Option<&'static str> {
        self.last_error.as_ref().map(GenerationError::user_message)
    }

    /// Sets or clears the personal credential. Blank keys count as none.
    pub fn set_personal_credential(&mut self, credential: Option<SecretString>) {
        self.personal_credential =
            credential.filter(|secret| !secret.expose_secret().trim().is_empty());
        info!(personal = self.personal_credential.is_some(), "credential mode changed");
    }

    /// True when a personal credential exempts this session from the cooldown.
    pub fn is_exempt(&self) -> bool {
        self.personal_credential.is_some()
    }

    /// Cooldown left before the next free-tier submission; zero when exempt.
    pub fn cooldown_remaining(&self) -> Duration {
        if self.is_exempt() {
            Duration::ZERO
        } else {
            self.gate.remaining()
        }
    }

    /// Submits a description as the next turn.
    ///
    /// With a current artifact the turn is a refinement of it. Guard failures
    /// (`EmptyDescription`, `CoolingDown`) leave the session untouched.
    pub async fn submit(&mut self, description: &str) -> Result<GeneratedArtifact, SessionError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(SessionError::EmptyDescription);
        }

        let exempt = self.is_exempt();
        if !exempt && !self.gate.can_proceed() {
            let remaining = self.gate.remaining();
            debug!(remaining_ms = remaining.as_millis() as u64, "submission blocked by cooldown");
            return Err(SessionError::CoolingDown { remaining });
        }

        let request = match self.artifact.as_deref() {
            Some(prior) => GenerationRequest::refine(description, prior),
            None => GenerationRequest::create(description),
        }
        .map_err(|_| SessionError::EmptyDescription)?
        .with_credential(self.personal_credential_copy());

        self.transition(GenerationStatus::Generating);
        self.last_description = Some(description.to_string());
        self.last_error = None;
        if !exempt {
            self.gate.arm();
        }

        match self.orchestrator.generate(&request).await {
            Ok(artifact) => {
                self.artifact = Some(artifact.html.clone());
                self.history.push(description.to_string());
                self.transition(GenerationStatus::Success);
                Ok(artifact)
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                self.transition(GenerationStatus::Error);
                Err(SessionError::Generation(err))
            }
        }
    }

    /// Resubmits the last description.
    pub async fn retry(&mut self) -> Result<GeneratedArtifact, SessionError> {
        let description = self
            .last_description
            .clone()
            .ok_or(SessionError::NothingToRetry)?;
        self.submit(&description).await
    }

    /// Back to Idle: drops artifact, history and last description, and
    /// releases the cooldown.
    ///
    /// The release applies to the gate itself, so every session sharing it is
    /// cleared too, and a free-tier caller can skip the remaining window with
    /// submit, reset, submit. Callers that need a strict throttle should give
    /// each session its own gate or avoid exposing reset mid-window.
    pub fn reset(&mut self) {
        self.artifact = None;
        self.history.clear();
        self.last_description = None;
        self.last_error = None;
        self.gate.release();
        self.transition(GenerationStatus::Idle);
    }

    /// Drops artifact and history so the next turn starts from scratch. The
    /// cooldown is left as is.
    pub fn clear_context(&mut self) {
        self.artifact = None;
        self.history.clear();
        self.last_error = None;
        self.transition(GenerationStatus::Idle);
    }

    /// Render-safe document for the current artifact, recomputed on each call.
    pub fn render_document(&self) -> RenderDocument {
        to_render_document(self.artifact.as_deref().unwrap_or_default())
    }

    /// Builds a project record from the current state without storing it.
    pub fn snapshot_project(&self) -> Result<SavedProject, SessionError> {
        let html = self.artifact.clone().ok_or(SessionError::NothingToSave)?;
        let description = self.last_description.clone().unwrap_or_default();
        Ok(SavedProject {
            id: uuid::Uuid::new_v4().to_string(),
            name: project_name(&description),
            html,
            description,
            history: self.history.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }

    /// Snapshots the session and writes it to `store`.
    pub async fn save(&self, store: &dyn ProjectStore) -> Result<SavedProject, SessionError> {
        let project = self.snapshot_project()?;
        store.save(&project).await.map_err(SessionError::Store)?;
        info!(id = %project.id, name = %project.name, "project saved");
        Ok(project)
    }

    /// Restores a saved project as the current artifact.
    pub fn load_project(&mut self, project: &SavedProject) {
        self.artifact = Some(project.html.clone());
        self.history = project.history.clone();
        self.last_description = Some(project.description.clone());
        self.last_error = None;
        self.transition(GenerationStatus::Success);
        info!(id = %project.id, "project loaded");
    }

    fn personal_credential_copy(&self) -> Option<SecretString> {
        self.personal_credential
            .as_ref()
            .map(|secret| SecretString::from(secret.expose_secret().to_owned()))
    }

    fn transition(&mut self, to: GenerationStatus) {
        debug!(from = %self.status, to = %to, "session transition");
        self.status = to;
    }
}

impl std::fmt::Debug for GenerationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationSession")
            .field("status", &self.status)
            .field("turns", &self.history.len())
            .field("has_artifact", &self.artifact.is_some())
            .field("exempt", &self.is_exempt())
            .finish()
    }
}

/// First 30 characters of `description`, with "..." when truncated.
pub fn project_name(description: &str) -> String {
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(PROJECT_NAME_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
