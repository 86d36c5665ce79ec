// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ryze projects` command implementation.

use colored::Colorize;
use ryze_config::RyzeConfig;
use ryze_core::{PluginAdapter, ProjectStore, SavedProject};
use ryze_storage::SqliteProjectStore;

use crate::ProjectsAction;
use crate::error::CliError;
use crate::generate::write_file;

pub async fn run_projects(config: &RyzeConfig, action: ProjectsAction) -> Result<(), CliError> {
    let store = SqliteProjectStore::from_config(&config.storage).await?;
    let result = handle(&store, action).await;
    store.shutdown().await?;
    result
}

async fn handle(store: &dyn ProjectStore, action: ProjectsAction) -> Result<(), CliError> {
    match action {
        ProjectsAction::List => {
            let projects = store.list().await?;
            if projects.is_empty() {
                println!("{}", "no saved projects".dimmed());
            }
            for project in &projects {
                println!("{}", summary_line(project));
            }
        }
        ProjectsAction::Show { id } => {
            let project = fetch(store, &id).await?;
            println!("{}", project.name.bold());
            println!("  id:          {}", project.id);
            println!("  saved:       {}", format_timestamp(project.timestamp));
            println!("  description: {}", project.description);
            println!("  html:        {} bytes", project.html.len());
            for (i, turn) in project.history.iter().enumerate() {
                println!("  {:>3}. {turn}", i + 1);
            }
        }
        ProjectsAction::Delete { id } => {
            if !store.delete(&id).await? {
                return Err(CliError::ProjectNotFound(id));
            }
            println!("{} {id}", "deleted".green());
        }
        ProjectsAction::Export { id, file } => {
            let project = fetch(store, &id).await?;
            write_file(&file, &project.html)?;
            println!("{} {}", "wrote".green(), file.display());
        }
    }
    Ok(())
}

pub async fn fetch(store: &dyn ProjectStore, id: &str) -> Result<SavedProject, CliError> {
    store
        .get(id)
        .await?
        .ok_or_else(|| CliError::ProjectNotFound(id.to_string()))
}

/// One line per project: id, save time, turn count, name.
pub fn summary_line(project: &SavedProject) -> String {
    format!(
        "{}  {}  {:>2} turns  {}",
        project.id.dimmed(),
        format_timestamp(project.timestamp),
        project.history.len(),
        project.name
    )
}

fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| millis.to_string())
}
