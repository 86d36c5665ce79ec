// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-level errors for the `ryze` binary.

use std::path::PathBuf;

use ryze_core::RyzeError;
use ryze_generation::GenerationError;
use ryze_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ryze(#[from] RyzeError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project not found: {0}")]
    ProjectNotFound(String),
}

impl CliError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Text printed on the first error line.
    ///
    /// Failed turns show the user-facing message; the technical cause is
    /// available through [`CliError::detail`].
    pub fn user_message(&self) -> String {
        match self {
            CliError::Generation(e) | CliError::Session(SessionError::Generation(e)) => {
                e.user_message().to_string()
            }
            other => other.to_string(),
        }
    }

    /// Technical cause of a failed turn, when it adds something to the
    /// user-facing message.
    pub fn detail(&self) -> Option<String> {
        match self {
            CliError::Generation(e) | CliError::Session(SessionError::Generation(e)) => {
                Some(e.to_string())
            }
            _ => None,
        }
    }
}
