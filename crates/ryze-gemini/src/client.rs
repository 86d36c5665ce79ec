// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Gemini `generateContent` API.
//!
//! Provides [`GeminiClient`], which builds requests and authenticates with
//! a per-call credential. It sends exactly one request per call and never
//! retries; the caller owns retry policy.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use ryze_core::RyzeError;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

/// Header carrying the API credential.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// HTTP client for Gemini API communication.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Creates a new client rooted at `base_url` (e.g. `.../v1beta`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RyzeError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| RyzeError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                status: None,
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Full endpoint URL for `model`.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    /// Sends one `generateContent` request.
    ///
    /// Non-2xx answers map to [`RyzeError::Provider`] with `status` set and a
    /// message carrying the numeric code and the backend's status name, so
    /// quota exhaustion stays recognizable downstream.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        api_key: &SecretString,
    ) -> Result<GenerateContentResponse, RyzeError> {
        let key = HeaderValue::from_str(api_key.expose_secret()).map_err(|e| {
            RyzeError::Config(format!("invalid API key header value: {e}"))
        })?;

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, key)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model, "generateContent response received");

        if status.is_success() {
            let body = response.text().await.map_err(|e| RyzeError::Provider {
                message: format!("failed to read response body: {e}"),
                status: Some(status.as_u16()),
                source: Some(Box::new(e)),
            })?;
            return serde_json::from_str(&body).map_err(|e| RyzeError::Provider {
                message: format!("failed to parse API response: {e}"),
                status: Some(status.as_u16()),
                source: Some(Box::new(e)),
            });
        }

        let body = response.text().await.unwrap_or_default();
        Err(RyzeError::Provider {
            message: error_message(status.as_u16(), &body),
            status: Some(status.as_u16()),
            source: None,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> RyzeError {
        if e.is_timeout() {
            return RyzeError::Timeout {
                duration: self.timeout,
            };
        }
        RyzeError::Provider {
            message: format!("HTTP request failed: {e}"),
            status: None,
            source: Some(Box::new(e)),
        }
    }
}

/// Formats a non-2xx answer as `Gemini API error (429 RESOURCE_EXHAUSTED): ...`.
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => match api_err.error.status {
            Some(name) => format!("Gemini API error ({status} {name}): {}", api_err.error.message),
            None => format!("Gemini API error ({status}): {}", api_err.error.message),
        },
        Err(_) => format!("API returned {status}: {body}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn key() -> SecretString {
        SecretString::from("test-key".to_string())
    }

    fn request() -> GenerateContentRequest {
        GenerateContentRequest::single_turn("system", "make a page", 0.2, 0.8)
    }

    async fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("http://localhost/v1beta/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "http://localhost/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[tokio::test]
    async fn success_sends_key_header_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "make a page"}]}],
                "generationConfig": {"temperature": 0.2}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{"content": {"parts": [{"text": "<html></html>"}]}, "finishReason": "STOP"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client
            .generate_content("gemini-test", &request(), &key())
            .await
            .unwrap();
        assert_eq!(resp.text(), "<html></html>");
    }

    #[tokio::test]
    async fn quota_error_keeps_status_and_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-test", &request(), &key())
            .await
            .unwrap_err();
        assert_eq!(err.provider_status(), Some(429));
        let msg = err.to_string();
        assert!(msg.contains("429"), "got: {msg}");
        assert!(msg.contains("RESOURCE_EXHAUSTED"), "got: {msg}");
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-test", &request(), &key())
            .await
            .unwrap_err();
        assert_eq!(err.provider_status(), Some(500));
        assert!(err.to_string().contains("API returned 500: boom"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-test", &request(), &key())
            .await
            .unwrap_err();
        assert!(matches!(err, RyzeError::Provider { .. }));
    }

    #[test]
    fn error_message_without_status_name() {
        let msg = error_message(400, r#"{"error":{"code":400,"message":"bad"}}"#);
        assert_eq!(msg, "Gemini API error (400): bad");
    }
}
