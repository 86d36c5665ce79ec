// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for generative model backends.

use async_trait::async_trait;

use crate::error::RyzeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Adapter for a generative model backend.
///
/// Exactly one backend request is sent per call. Implementations must not
/// retry on their own; retry decisions belong to the orchestrator.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response text.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, RyzeError>;
}
