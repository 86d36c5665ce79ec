// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation pipeline for Ryze.
//!
//! - [`extract`] cleans raw model output into HTML.
//! - [`prompt`] frames create and refine turns.
//! - [`classify`] recognizes quota errors.
//! - [`orchestrator`] ties them together with bounded retry.

pub mod classify;
pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod prompt;

pub use classify::{DefaultQuotaClassifier, QuotaClassifier};
pub use error::GenerationError;
pub use extract::{Extraction, ExtractionQuality, extract, extract_with_quality};
pub use orchestrator::{GeneratedArtifact, Orchestrator, RetryPolicy, Sampling};
pub use prompt::{SYSTEM_INSTRUCTION, build_prompt};
