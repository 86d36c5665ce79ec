// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Project store trait: a flat collection of saved projects keyed by id.

use async_trait::async_trait;

use crate::error::RyzeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::SavedProject;

/// Persistence for named projects.
#[async_trait]
pub trait ProjectStore: PluginAdapter {
    /// Inserts the project, replacing any project with the same id.
    async fn save(&self, project: &SavedProject) -> Result<(), RyzeError>;

    /// Fetches a project by id.
    async fn get(&self, id: &str) -> Result<Option<SavedProject>, RyzeError>;

    /// Lists all projects, newest first.
    async fn list(&self) -> Result<Vec<SavedProject>, RyzeError>;

    /// Deletes a project. Returns `false` when no project had that id.
    async fn delete(&self, id: &str) -> Result<bool, RyzeError>;
}
