// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed project store.
//!
//! Saved projects live in a single `projects` table keyed by id. Turn history
//! is stored as a JSON array. All statements run on tokio-rusqlite's single
//! background thread.

use std::path::Path;

use async_trait::async_trait;
use rusqlite::params;
use tracing::{debug, info};

use ryze_config::model::StorageConfig;
use ryze_core::{
    AdapterType, HealthStatus, PluginAdapter, ProjectStore, RyzeError, SavedProject,
};

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    CREATE TABLE IF NOT EXISTS projects (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        html TEXT NOT NULL,
        description TEXT NOT NULL,
        history TEXT NOT NULL DEFAULT '[]',
        timestamp INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_projects_timestamp ON projects(timestamp);
";

const SELECT_COLUMNS: &str = "SELECT id, name, html, description, history, timestamp FROM projects";

/// Convert a tokio-rusqlite error into RyzeError::Storage.
fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> RyzeError {
    RyzeError::Storage {
        source: Box::new(e),
    }
}

/// Saved projects in a SQLite database file.
pub struct SqliteProjectStore {
    conn: tokio_rusqlite::Connection,
    path: String,
}

impl SqliteProjectStore {
    /// Opens (creating when absent) the database at `path` and applies the schema.
    pub async fn open(path: &str) -> Result<Self, RyzeError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| RyzeError::Storage {
                source: Box::new(e),
            })?;
        }
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| RyzeError::Storage {
                source: Box::new(e),
            })?;
        let store = Self {
            conn,
            path: path.to_string(),
        };
        store.apply_schema().await?;
        info!(path, "project store opened");
        Ok(store)
    }

    /// Opens the database named by the `[storage]` section.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, RyzeError> {
        Self::open(&config.database_path).await
    }

    /// A private in-memory database.
    pub async fn open_in_memory() -> Result<Self, RyzeError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| RyzeError::Storage {
                source: Box::new(e),
            })?;
        let store = Self {
            conn,
            path: ":memory:".to_string(),
        };
        store.apply_schema().await?;
        Ok(store)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    async fn apply_schema(&self) -> Result<(), RyzeError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}

fn row_to_project(row: &rusqlite::Row<'_>) -> rusqlite::Result<SavedProject> {
    let history_json: String = row.get(4)?;
    let history: Vec<String> = serde_json::from_str(&history_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(SavedProject {
        id: row.get(0)?,
        name: row.get(1)?,
        html: row.get(2)?,
        description: row.get(3)?,
        history,
        timestamp: row.get(5)?,
    })
}

#[async_trait]
impl PluginAdapter for SqliteProjectStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RyzeError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), RyzeError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("shutdown: WAL checkpoint complete");
        Ok(())
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn save(&self, project: &SavedProject) -> Result<(), RyzeError> {
        let history = serde_json::to_string(&project.history).map_err(|e| RyzeError::Storage {
            source: Box::new(e),
        })?;
        let project = project.clone();
        let id = project.id.clone();

        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT OR REPLACE INTO projects (id, name, html, description, history, timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        project.id,
                        project.name,
                        project.html,
                        project.description,
                        history,
                        project.timestamp,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        debug!(id = %id, "project saved");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<SavedProject>, RyzeError> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<SavedProject>, rusqlite::Error> {
                let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
                match stmt.query_row(params![id], row_to_project) {
                    Ok(project) => Ok(Some(project)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
            .map_err(map_tr_err)
    }

    async fn list(&self) -> Result<Vec<SavedProject>, RyzeError> {
        self.conn
            .call(|conn| -> Result<Vec<SavedProject>, rusqlite::Error> {
                let mut stmt =
                    conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY timestamp DESC, id ASC"))?;
                let rows = stmt.query_map([], row_to_project)?;
                rows.collect()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn delete(&self, id: &str) -> Result<bool, RyzeError> {
        let id = id.to_string();
        let removed = self
            .conn
            .call(move |conn| -> Result<usize, rusqlite::Error> {
                conn.execute("DELETE FROM projects WHERE id = ?1", params![id])
            })
            .await
            .map_err(map_tr_err)?;
        Ok(removed > 0)
    }
}
