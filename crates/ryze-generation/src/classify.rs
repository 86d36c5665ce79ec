// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quota/rate-limit recognition for backend errors.
//!
//! Only errors classified as quota signals are retried. The classifier is a
//! trait so that a backend with different error shapes can swap it out.

use ryze_core::RyzeError;

/// Decides whether a backend error is a quota or rate-limit signal.
pub trait QuotaClassifier: Send + Sync {
    fn is_quota(&self, err: &RyzeError) -> bool;
}

impl<F> QuotaClassifier for F
where
    F: Fn(&RyzeError) -> bool + Send + Sync,
{
    fn is_quota(&self, err: &RyzeError) -> bool {
        self(err)
    }
}

/// HTTP 429, or an error text mentioning `429`, `quota` (any case) or
/// `RESOURCE_EXHAUSTED`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultQuotaClassifier;

impl QuotaClassifier for DefaultQuotaClassifier {
    fn is_quota(&self, err: &RyzeError) -> bool {
        match err {
            RyzeError::MissingCredential
            | RyzeError::Config(_)
            | RyzeError::InvalidRequest(_) => false,
            RyzeError::Provider {
                status: Some(429), ..
            } => true,
            other => {
                let text = other.to_string().to_ascii_uppercase();
                text.contains("429") || text.contains("QUOTA") || text.contains("RESOURCE_EXHAUSTED")
            }
        }
    }
}
