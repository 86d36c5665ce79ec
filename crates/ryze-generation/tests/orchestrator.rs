// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Orchestrator behaviour against a scripted backend.

use std::sync::Arc;
use std::time::Duration;

use ryze_core::{FailureKind, GenerationRequest, GenerationResult, RyzeError};
use ryze_generation::error::{MSG_BUSY, MSG_GENERIC};
use ryze_generation::{
    ExtractionQuality, GenerationError, Orchestrator, RetryPolicy, SYSTEM_INSTRUCTION,
};
use ryze_test_utils::mock_provider::{backend_error, quota_error};
use ryze_test_utils::MockProvider;
use secrecy::SecretString;

fn key(value: &str) -> Option<SecretString> {
    Some(SecretString::from(value.to_string()))
}

fn orchestrator(provider: &Arc<MockProvider>) -> Orchestrator {
    Orchestrator::new(provider.clone(), key("shared-key"))
}

#[tokio::test]
async fn create_turn_returns_clean_artifact() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "```html\n<!DOCTYPE html><html><body>Padaria</body></html>\n```".into(),
    ]));
    let request = GenerationRequest::create("landing page for a bakery").unwrap();

    let artifact = orchestrator(&provider).generate(&request).await.unwrap();

    assert!(artifact.html.starts_with('<'));
    assert_eq!(artifact.quality, ExtractionQuality::Clean);
    assert_eq!(artifact.attempts, 1);

    let sent = provider.requests().await;
    assert_eq!(sent.len(), 1);
    assert!(sent[0].prompt.starts_with("RYZE_CREATE:"));
    assert!(sent[0].prompt.contains("landing page for a bakery"));
    assert_eq!(sent[0].system_instruction, SYSTEM_INSTRUCTION);
    assert_eq!(sent[0].api_key, "shared-key");
}

#[tokio::test]
async fn refine_turn_references_prior_artifact() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "<button class=\"bg-green-500\">Comprar</button>".into(),
    ]));
    let prior = "<button class=\"bg-red-500\">Comprar</button>";
    let request = GenerationRequest::refine("change the button color to green", prior).unwrap();

    orchestrator(&provider).generate(&request).await.unwrap();

    let sent = provider.requests().await;
    assert!(sent[0].prompt.starts_with("RYZE_REFINE:"));
    assert!(sent[0].prompt.contains(prior));
}

#[tokio::test]
async fn override_credential_wins_over_default() {
    let provider = Arc::new(MockProvider::new());
    let request = GenerationRequest::create("portfolio")
        .unwrap()
        .with_credential(key("personal-key"));

    orchestrator(&provider).generate(&request).await.unwrap();

    assert_eq!(provider.requests().await[0].api_key, "personal-key");
}

#[tokio::test]
async fn missing_credential_fails_before_any_call() {
    let provider = Arc::new(MockProvider::new());
    let orchestrator = Orchestrator::new(provider.clone(), None);
    let request = GenerationRequest::create("portfolio").unwrap();

    let err = orchestrator.generate(&request).await.unwrap_err();

    assert!(matches!(err, GenerationError::MissingCredential));
    assert_eq!(provider.call_count().await, 0);
}

#[tokio::test]
async fn blank_default_credential_counts_as_missing() {
    let provider = Arc::new(MockProvider::new());
    let orchestrator = Orchestrator::new(provider.clone(), key("   "));
    assert!(!orchestrator.has_default_credential());

    let request = GenerationRequest::create("portfolio").unwrap();
    assert!(matches!(
        orchestrator.generate(&request).await,
        Err(GenerationError::MissingCredential)
    ));
}

#[tokio::test(start_paused = true)]
async fn persistent_quota_exhausts_budget_with_linear_backoff() {
    let provider = Arc::new(MockProvider::always_failing(quota_error));
    let request = GenerationRequest::create("landing page").unwrap();

    let err = orchestrator(&provider).generate(&request).await.unwrap_err();

    assert!(matches!(err, GenerationError::QuotaExceeded { attempts: 4 }));
    assert_eq!(err.user_message(), MSG_BUSY);

    let calls = provider.requests().await;
    assert_eq!(calls.len(), 4);
    let gaps: Vec<Duration> = calls.windows(2).map(|w| w[1].at - w[0].at).collect();
    assert_eq!(
        gaps,
        vec![
            Duration::from_secs(10),
            Duration::from_secs(15),
            Duration::from_secs(20)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn quota_then_success_recovers() {
    let provider = Arc::new(MockProvider::new());
    provider.push_error(quota_error()).await;
    provider.push_response("<section>ok</section>").await;
    let request = GenerationRequest::create("landing page").unwrap();

    let artifact = orchestrator(&provider).generate(&request).await.unwrap();

    assert_eq!(artifact.attempts, 2);
    assert_eq!(artifact.html, "<section>ok</section>");
}

#[tokio::test(start_paused = true)]
async fn custom_policy_controls_attempts() {
    let provider = Arc::new(MockProvider::always_failing(quota_error));
    let orchestrator = orchestrator(&provider).with_policy(RetryPolicy {
        max_retries: 1,
        initial_delay: Duration::from_secs(1),
        step: Duration::from_secs(1),
    });
    let request = GenerationRequest::create("x").unwrap();

    let err = orchestrator.generate(&request).await.unwrap_err();

    assert!(matches!(err, GenerationError::QuotaExceeded { attempts: 2 }));
    assert_eq!(provider.call_count().await, 2);
}

#[tokio::test]
async fn non_quota_error_is_not_retried() {
    let provider = Arc::new(MockProvider::always_failing(backend_error));
    let request = GenerationRequest::create("landing page").unwrap();

    let err = orchestrator(&provider).generate(&request).await.unwrap_err();

    assert!(matches!(err, GenerationError::Backend { .. }));
    assert_eq!(err.user_message(), MSG_GENERIC);
    assert_eq!(provider.call_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn pluggable_classifier_changes_what_is_retried() {
    let provider = Arc::new(MockProvider::new());
    provider
        .push_error(RyzeError::Provider {
            message: "overloaded".into(),
            status: Some(503),
            source: None,
        })
        .await;
    provider.push_response("<p>ok</p>").await;
    let orchestrator = orchestrator(&provider)
        .with_classifier(|err: &RyzeError| err.provider_status() == Some(503));
    let request = GenerationRequest::create("x").unwrap();

    let artifact = orchestrator.generate(&request).await.unwrap();

    assert_eq!(artifact.attempts, 2);
}

#[tokio::test]
async fn answer_without_markup_is_empty_artifact() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "Desculpe, não consigo gerar isso.".into(),
    ]));
    let request = GenerationRequest::create("x").unwrap();

    let err = orchestrator(&provider).generate(&request).await.unwrap_err();

    assert!(matches!(err, GenerationError::EmptyArtifact));
}

#[tokio::test]
async fn leading_prose_is_degraded_but_usable() {
    let provider = Arc::new(MockProvider::with_responses(vec![
        "Aqui está: <div>page</div>".into(),
    ]));
    let request = GenerationRequest::create("x").unwrap();

    let artifact = orchestrator(&provider).generate(&request).await.unwrap();

    assert_eq!(artifact.html, "<div>page</div>");
    assert_eq!(artifact.quality, ExtractionQuality::Degraded);
}

#[tokio::test(start_paused = true)]
async fn generate_result_folds_into_tagged_union() {
    let ok = Arc::new(MockProvider::new());
    let request = GenerationRequest::create("x").unwrap();
    let result = orchestrator(&ok).generate_result(&request).await;
    assert!(result.is_success());
    assert!(result.html().unwrap().starts_with('<'));

    let busy = Arc::new(MockProvider::always_failing(quota_error));
    let result = orchestrator(&busy).generate_result(&request).await;
    assert_eq!(
        result,
        GenerationResult::Failure {
            kind: FailureKind::QuotaExceeded,
            message: MSG_BUSY.to_string(),
        }
    );
}
