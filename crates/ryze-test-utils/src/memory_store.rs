// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory project store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use ryze_core::traits::adapter::PluginAdapter;
use ryze_core::traits::storage::ProjectStore;
use ryze_core::types::{AdapterType, HealthStatus, SavedProject};
use ryze_core::RyzeError;

/// `ProjectStore` over a `HashMap`, for tests that do not need SQLite.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    projects: Mutex<HashMap<String, SavedProject>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.projects.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.projects.lock().await.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for InMemoryProjectStore {
    fn name(&self) -> &str {
        "memory-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RyzeError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RyzeError> {
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn save(&self, project: &SavedProject) -> Result<(), RyzeError> {
        self.projects
            .lock()
            .await
            .insert(project.id.clone(), project.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SavedProject>, RyzeError> {
        Ok(self.projects.lock().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<SavedProject>, RyzeError> {
        let mut projects: Vec<_> = self.projects.lock().await.values().cloned().collect();
        projects.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(projects)
    }

    async fn delete(&self, id: &str) -> Result<bool, RyzeError> {
        Ok(self.projects.lock().await.remove(id).is_some())
    }
}
