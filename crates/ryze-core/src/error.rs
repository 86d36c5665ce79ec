// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Ryze site builder.

use thiserror::Error;

/// The primary error type used across adapter traits and core operations.
#[derive(Debug, Error)]
pub enum RyzeError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Project store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Generative backend errors (API failure, quota, transport).
    ///
    /// `status` holds the HTTP status code when the backend answered at all.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Neither a per-request override nor a shared default credential is available.
    #[error("no API credential available: supply a personal key or configure a default key")]
    MissingCredential,

    /// A request violated a data model invariant (e.g. an empty description).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A keyed record was not found.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RyzeError {
    /// Returns the HTTP status reported by the backend, if any.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            RyzeError::Provider { status, .. } => *status,
            _ => None,
        }
    }
}
