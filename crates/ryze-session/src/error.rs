// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session guard and turn errors.

use std::time::Duration;

use ryze_core::RyzeError;
use ryze_generation::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The description was empty after trimming.
    #[error("description must not be empty")]
    EmptyDescription,

    /// The free-tier cooldown window is still open.
    #[error("cooldown active, {}s remaining", .remaining.as_secs_f32().ceil())]
    CoolingDown { remaining: Duration },

    /// `retry` was called before any description was submitted.
    #[error("nothing to retry")]
    NothingToRetry,

    /// A save was requested without a current artifact.
    #[error("no artifact to save")]
    NothingToSave,

    /// The project store rejected a save.
    #[error("project store error: {0}")]
    Store(#[source] RyzeError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooling_down_rounds_up_seconds() {
        let err = SessionError::CoolingDown {
            remaining: Duration::from_millis(2_100),
        };
        assert_eq!(err.to_string(), "cooldown active, 3s remaining");
    }

    #[test]
    fn generation_errors_are_transparent() {
        let err = SessionError::from(GenerationError::EmptyArtifact);
        assert_eq!(err.to_string(), GenerationError::EmptyArtifact.to_string());
    }
}
