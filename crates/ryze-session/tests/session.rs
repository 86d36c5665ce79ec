// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session state machine over the mock stack.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ryze_cooldown::CooldownGate;
use ryze_core::{
    AdapterType, GenerationStatus, HealthStatus, PluginAdapter, ProjectStore, ProviderAdapter,
    ProviderRequest, ProviderResponse, RyzeError,
};
use ryze_generation::error::{MSG_BUSY, MSG_GENERIC, MSG_MISSING_CREDENTIAL};
use ryze_generation::{GenerationError, Orchestrator};
use ryze_sandbox::NAVIGATION_SHIELD;
use ryze_session::{GenerationSession, SessionError};
use ryze_test_utils::mock_provider::{backend_error, quota_error};
use ryze_test_utils::{ManualClock, TestHarness};
use secrecy::SecretString;

const BAKERY_HTML: &str = "<!DOCTYPE html><html><body><button class=\"bg-red-500\">Encomendar</button></body></html>";
const GREEN_HTML: &str = "<!DOCTYPE html><html><body><button class=\"bg-green-500\">Encomendar</button></body></html>";

fn cooldown() -> Duration {
    Duration::from_secs(8)
}

#[tokio::test]
async fn bakery_create_then_refine() {
    let mut h = TestHarness::builder()
        .with_mock_responses(vec![
            format!("```html\n{BAKERY_HTML}\n```"),
            GREEN_HTML.to_string(),
        ])
        .build()
        .await;
    assert_eq!(h.session.status(), GenerationStatus::Idle);

    let first = h.session.submit("landing page for a bakery").await.unwrap();
    assert!(first.html.starts_with('<'));
    assert_eq!(h.session.status(), GenerationStatus::Success);
    assert_eq!(h.session.history(), ["landing page for a bakery"]);
    assert_eq!(h.session.artifact(), Some(BAKERY_HTML));

    h.clock.advance(cooldown());
    h.session
        .submit("change the button color to green")
        .await
        .unwrap();

    let sent = h.provider.requests().await;
    assert!(sent[0].prompt.starts_with("RYZE_CREATE:"));
    assert!(sent[1].prompt.starts_with("RYZE_REFINE:"));
    assert!(sent[1].prompt.contains(BAKERY_HTML));
    assert_eq!(
        h.session.history(),
        ["landing page for a bakery", "change the button color to green"]
    );
    assert_eq!(h.session.artifact(), Some(GREEN_HTML));
}

#[tokio::test]
async fn cooldown_blocks_free_tier_until_elapsed() {
    let mut h = TestHarness::builder().build().await;

    h.session.submit("portfolio").await.unwrap();
    let err = h.session.submit("portfolio v2").await.unwrap_err();
    match err {
        SessionError::CoolingDown { remaining } => assert_eq!(remaining, cooldown()),
        other => panic!("expected CoolingDown, got {other:?}"),
    }
    assert_eq!(h.session.status(), GenerationStatus::Success);
    assert_eq!(h.provider.call_count().await, 1);

    h.clock.advance(Duration::from_secs(7));
    assert!(matches!(
        h.session.submit("portfolio v2").await,
        Err(SessionError::CoolingDown { .. })
    ));

    h.clock.advance(Duration::from_secs(1));
    h.session.submit("portfolio v2").await.unwrap();
    assert_eq!(h.provider.call_count().await, 2);
}

#[tokio::test]
async fn personal_credential_is_exempt_from_cooldown() {
    let mut h = TestHarness::builder().build().await;
    h.session
        .set_personal_credential(Some(SecretString::from("personal-key".to_string())));

    h.session.submit("one").await.unwrap();
    h.session.submit("two").await.unwrap();

    assert!(h.gate.can_proceed());
    assert_eq!(h.session.cooldown_remaining(), Duration::ZERO);
    let sent = h.provider.requests().await;
    assert!(sent.iter().all(|r| r.api_key == "personal-key"));
}

#[tokio::test]
async fn blank_personal_credential_is_ignored() {
    let mut h = TestHarness::builder().build().await;
    h.session
        .set_personal_credential(Some(SecretString::from("   ".to_string())));
    assert!(!h.session.is_exempt());

    h.session.submit("one").await.unwrap();
    assert!(!h.gate.can_proceed());
}

#[tokio::test]
async fn failure_keeps_previous_artifact_and_history() {
    let mut h = TestHarness::builder()
        .with_mock_responses(vec![BAKERY_HTML.to_string()])
        .build()
        .await;
    h.session.submit("landing page for a bakery").await.unwrap();
    h.provider.push_error(backend_error()).await;
    h.clock.advance(cooldown());

    let err = h.session.submit("make it purple").await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::Backend { .. })
    ));
    assert_eq!(h.session.status(), GenerationStatus::Error);
    assert_eq!(h.session.artifact(), Some(BAKERY_HTML));
    assert_eq!(h.session.history(), ["landing page for a bakery"]);
    assert_eq!(h.session.last_error_message(), Some(MSG_GENERIC));
    assert_eq!(h.session.last_description(), Some("make it purple"));
}

#[tokio::test]
async fn gate_stays_armed_after_failure() {
    let mut h = TestHarness::builder()
        .with_mock_errors(vec![backend_error()])
        .build()
        .await;

    h.session.submit("x").await.unwrap_err();

    assert!(!h.gate.can_proceed());
    h.clock.advance(cooldown());
    assert!(h.gate.can_proceed());
}

/// Backend that records whether the gate was already armed when called.
struct GateProbe {
    gate: Arc<CooldownGate>,
    saw_armed: AtomicBool,
}

#[async_trait]
impl PluginAdapter for GateProbe {
    fn name(&self) -> &str {
        "gate-probe"
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
impl ProviderAdapter for GateProbe {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, RyzeError> {
        self.saw_armed
            .store(!self.gate.can_proceed(), Ordering::SeqCst);
        Ok(ProviderResponse {
            text: "<div/>".into(),
            model: request.model,
            finish_reason: None,
        })
    }
}

#[tokio::test]
async fn gate_is_armed_before_dispatch() {
    let clock = ManualClock::new();
    let gate = Arc::new(CooldownGate::new(cooldown(), clock.clone()));
    let probe = Arc::new(GateProbe {
        gate: gate.clone(),
        saw_armed: AtomicBool::new(false),
    });
    let orchestrator = Arc::new(Orchestrator::new(
        probe.clone(),
        Some(SecretString::from("k".to_string())),
    ));
    let mut session = GenerationSession::new(orchestrator, gate);

    session.submit("x").await.unwrap();

    assert!(probe.saw_armed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn retry_resubmits_last_description() {
    let mut h = TestHarness::builder()
        .with_mock_errors(vec![backend_error()])
        .with_mock_responses(vec![BAKERY_HTML.to_string()])
        .build()
        .await;

    h.session.submit("landing page for a bakery").await.unwrap_err();
    h.clock.advance(cooldown());
    h.session.retry().await.unwrap();

    assert_eq!(h.session.status(), GenerationStatus::Success);
    assert_eq!(h.session.history(), ["landing page for a bakery"]);
    assert!(h.session.last_error().is_none());
    let sent = h.provider.requests().await;
    assert_eq!(sent[0].prompt, sent[1].prompt);
}

#[tokio::test]
async fn retry_without_history_is_rejected() {
    let mut h = TestHarness::builder().build().await;
    assert!(matches!(
        h.session.retry().await,
        Err(SessionError::NothingToRetry)
    ));
}

#[tokio::test]
async fn empty_description_is_rejected_without_side_effects() {
    let mut h = TestHarness::builder().build().await;

    assert!(matches!(
        h.session.submit("   \n").await,
        Err(SessionError::EmptyDescription)
    ));
    assert_eq!(h.session.status(), GenerationStatus::Idle);
    assert!(h.gate.can_proceed());
    assert_eq!(h.provider.call_count().await, 0);
}

#[tokio::test]
async fn description_is_trimmed() {
    let mut h = TestHarness::builder().build().await;
    h.session.submit("  bakery  ").await.unwrap();
    assert_eq!(h.session.history(), ["bakery"]);
}

#[tokio::test]
async fn reset_clears_everything_and_releases_gate() {
    let mut h = TestHarness::builder().build().await;
    h.session.submit("portfolio").await.unwrap();

    h.session.reset();

    assert_eq!(h.session.status(), GenerationStatus::Idle);
    assert!(h.session.artifact().is_none());
    assert!(h.session.history().is_empty());
    assert!(h.session.last_description().is_none());
    assert!(h.gate.can_proceed());
    h.session.submit("fresh start").await.unwrap();
    assert!(h.provider.requests().await[1].prompt.starts_with("RYZE_CREATE:"));
}

#[tokio::test]
async fn clear_context_keeps_cooldown() {
    let mut h = TestHarness::builder().build().await;
    h.session.submit("portfolio").await.unwrap();

    h.session.clear_context();

    assert_eq!(h.session.status(), GenerationStatus::Idle);
    assert!(h.session.artifact().is_none());
    assert!(h.session.history().is_empty());
    assert!(!h.gate.can_proceed());
}

#[tokio::test]
async fn save_snapshot_and_load_back() {
    let mut h = TestHarness::builder()
        .with_mock_responses(vec![BAKERY_HTML.to_string()])
        .build()
        .await;
    let description = "landing page for a bakery in São Paulo with online orders";
    h.session.submit(description).await.unwrap();

    let saved = h.session.save(&*h.store).await.unwrap();
    assert_eq!(saved.name, "landing page for a bakery in S...");
    assert_eq!(saved.description, description);
    assert_eq!(saved.history, vec![description.to_string()]);
    assert_eq!(saved.html, BAKERY_HTML);
    assert!(saved.timestamp > 0);
    assert_eq!(h.store.get(&saved.id).await.unwrap(), Some(saved.clone()));

    let mut other = h.sibling_session();
    other.load_project(&saved);
    assert_eq!(other.status(), GenerationStatus::Success);
    assert_eq!(other.artifact(), Some(BAKERY_HTML));
    assert_eq!(other.history(), saved.history.as_slice());
}

#[tokio::test]
async fn snapshot_ids_are_unique() {
    let mut h = TestHarness::builder().build().await;
    h.session.submit("x").await.unwrap();
    let a = h.session.snapshot_project().unwrap();
    let b = h.session.snapshot_project().unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn nothing_to_save_without_artifact() {
    let h = TestHarness::builder().build().await;
    assert!(matches!(
        h.session.snapshot_project(),
        Err(SessionError::NothingToSave)
    ));
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn loaded_project_is_refined_next() {
    let mut h = TestHarness::builder().build().await;
    let mut seed = TestHarness::builder()
        .with_mock_responses(vec![BAKERY_HTML.to_string()])
        .build()
        .await;
    seed.session.submit("bakery").await.unwrap();
    let project = seed.session.snapshot_project().unwrap();

    h.session.load_project(&project);
    h.session.submit("add a map").await.unwrap();

    let sent = h.provider.requests().await;
    assert!(sent[0].prompt.starts_with("RYZE_REFINE:"));
    assert!(sent[0].prompt.contains(BAKERY_HTML));
    assert_eq!(h.session.history(), ["bakery", "add a map"]);
}

#[tokio::test]
async fn render_document_tracks_current_artifact() {
    let mut h = TestHarness::builder()
        .with_mock_responses(vec![BAKERY_HTML.to_string()])
        .build()
        .await;
    assert!(h.session.render_document().is_empty());

    h.session.submit("bakery").await.unwrap();

    let doc = h.session.render_document();
    assert!(doc.as_str().contains(NAVIGATION_SHIELD));
    assert!(doc.as_str().ends_with("</body></html>"));
}

#[tokio::test]
async fn missing_credential_surfaces_configuration_message() {
    let mut h = TestHarness::builder()
        .with_default_credential(None)
        .build()
        .await;

    let err = h.session.submit("x").await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::MissingCredential)
    ));
    assert_eq!(h.session.status(), GenerationStatus::Error);
    assert_eq!(h.session.last_error_message(), Some(MSG_MISSING_CREDENTIAL));
    assert_eq!(h.provider.call_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn quota_exhaustion_reports_busy() {
    let mut h = TestHarness::builder()
        .with_mock_errors(vec![quota_error(), quota_error(), quota_error(), quota_error()])
        .build()
        .await;

    let err = h.session.submit("x").await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::QuotaExceeded { attempts: 4 })
    ));
    assert_eq!(h.session.last_error_message(), Some(MSG_BUSY));
}

#[tokio::test]
async fn sessions_sharing_a_gate_throttle_each_other() {
    let mut h = TestHarness::builder().build().await;
    let mut other = h.sibling_session();

    h.session.submit("first").await.unwrap();

    assert!(matches!(
        other.submit("second").await,
        Err(SessionError::CoolingDown { .. })
    ));
    assert_eq!(other.status(), GenerationStatus::Idle);
}

#[tokio::test]
async fn reset_releases_the_gate_for_every_sharing_session() {
    let mut h = TestHarness::builder().build().await;
    let mut other = h.sibling_session();

    h.session.submit("first").await.unwrap();
    assert!(!other.cooldown_remaining().is_zero());

    h.session.reset();

    assert!(other.cooldown_remaining().is_zero());
    other.submit("second").await.unwrap();
    assert_eq!(h.provider.call_count().await, 2);
}
