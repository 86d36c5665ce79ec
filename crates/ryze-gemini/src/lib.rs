// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini provider adapter for Ryze.
//!
//! Implements [`ProviderAdapter`] on top of the `generateContent` endpoint.
//! Credentials travel with each [`ProviderRequest`], so one provider value
//! serves both the shared default key and personal keys.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use ryze_config::model::GeminiConfig;
use ryze_core::{
    AdapterType, HealthStatus, PluginAdapter, ProviderAdapter, ProviderRequest,
    ProviderResponse, RyzeError,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::GenerateContentRequest;

/// Gemini generative backend.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Builds a provider from the `[gemini]` configuration section.
    pub fn new(config: &GeminiConfig) -> Result<Self, RyzeError> {
        let client = GeminiClient::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, model = %config.model, "Gemini provider initialized");
        Ok(Self { client })
    }

    fn to_api_request(request: &ProviderRequest) -> GenerateContentRequest {
        GenerateContentRequest::single_turn(
            &request.system_instruction,
            &request.prompt,
            request.temperature,
            request.top_p,
        )
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
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
impl ProviderAdapter for GeminiProvider {
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, RyzeError> {
        let api_request = Self::to_api_request(&request);
        let response = self
            .client
            .generate_content(&request.model, &api_request, &request.api_key)
            .await?;

        let text = response.text();
        debug!(model = %request.model, chars = text.len(), "generation text received");

        Ok(ProviderResponse {
            text,
            model: response
                .model_version
                .clone()
                .unwrap_or_else(|| request.model.clone()),
            finish_reason: response.finish_reason(),
        })
    }
}
