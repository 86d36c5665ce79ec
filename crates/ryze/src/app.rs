// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring from configuration to the generation components.

use std::sync::Arc;

use ryze_config::RyzeConfig;
use ryze_cooldown::CooldownGate;
use ryze_core::{ProviderAdapter, RyzeError};
use ryze_gemini::GeminiProvider;
use ryze_generation::Orchestrator;
use ryze_session::GenerationSession;
use secrecy::SecretString;
use tracing::{debug, warn};

/// Builds the orchestrator backed by the configured Gemini endpoint.
pub fn build_orchestrator(config: &RyzeConfig) -> Result<Arc<Orchestrator>, RyzeError> {
    let provider: Arc<dyn ProviderAdapter> = Arc::new(GeminiProvider::new(&config.gemini)?);
    let orchestrator = Orchestrator::from_config(provider, config);
    if !orchestrator.has_default_credential() {
        warn!("no shared API key configured; generation needs a personal key");
    }
    Ok(Arc::new(orchestrator))
}

/// Builds an interactive session, seeding the personal key from
/// `override_key` or the `[user]` config section.
pub fn build_session(
    config: &RyzeConfig,
    orchestrator: Arc<Orchestrator>,
    override_key: Option<SecretString>,
) -> GenerationSession {
    let gate = Arc::new(CooldownGate::from_config(&config.cooldown));
    let mut session = GenerationSession::new(orchestrator, gate);
    let personal = override_key.or_else(|| config.user.personal_credential());
    debug!(personal = personal.is_some(), "session created");
    session.set_personal_credential(personal);
    session
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_personal_key_makes_session_exempt() {
        let mut config = RyzeConfig::default();
        config.gemini.api_key = Some("shared".into());
        config.user.api_key = Some("mine".into());
        let orchestrator = build_orchestrator(&config).unwrap();
        let session = build_session(&config, orchestrator, None);
        assert!(session.is_exempt());
    }

    #[test]
    fn session_without_personal_key_is_gated() {
        let mut config = RyzeConfig::default();
        config.gemini.api_key = Some("shared".into());
        let orchestrator = build_orchestrator(&config).unwrap();
        assert!(orchestrator.has_default_credential());
        let session = build_session(&config, orchestrator, None);
        assert!(!session.is_exempt());
    }

    #[test]
    fn override_key_wins() {
        let config = RyzeConfig::default();
        let orchestrator = build_orchestrator(&config).unwrap();
        let session = build_session(
            &config,
            orchestrator,
            Some(SecretString::from("flag-key".to_string())),
        );
        assert!(session.is_exempt());
    }
}
