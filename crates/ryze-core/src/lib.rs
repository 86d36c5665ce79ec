// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Ryze site builder.
//!
//! This crate provides the error type, the data model shared by every turn
//! (requests, results, status, saved projects) and the adapter traits that
//! the generative backend and the project store implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::RyzeError;
pub use types::{
    AdapterType, FailureKind, GenerationRequest, GenerationResult, GenerationStatus, HealthStatus,
    ProviderRequest, ProviderResponse, SavedProject,
};

pub use traits::{PluginAdapter, ProjectStore, ProviderAdapter};
