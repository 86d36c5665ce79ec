// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation failure taxonomy.

use ryze_core::FailureKind;
use thiserror::Error;

/// User-facing text for an exhausted quota.
pub const MSG_BUSY: &str = "Motor em alta demanda. Tente novamente em alguns segundos.";
/// User-facing text for every other failure of a turn.
pub const MSG_GENERIC: &str = "Erro na geração. Refine sua descrição e tente novamente.";
/// User-facing text when no credential is available.
pub const MSG_MISSING_CREDENTIAL: &str =
    "Nenhuma chave de API configurada. Informe sua chave pessoal ou configure a chave padrão.";

/// Why a turn produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Neither a personal nor a shared credential is available. Never retried.
    #[error("no API credential available")]
    MissingCredential,

    /// The backend reported quota exhaustion on every attempt.
    #[error("backend quota exhausted after {attempts} attempts")]
    QuotaExceeded { attempts: u32 },

    /// Network failure or non-quota backend error. Never retried.
    #[error("backend error: {message}")]
    Backend { message: String },

    /// The backend answered but the answer held no usable markup.
    #[error("backend returned no usable HTML")]
    EmptyArtifact,
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::MissingCredential => FailureKind::MissingCredential,
            GenerationError::QuotaExceeded { .. } => FailureKind::QuotaExceeded,
            GenerationError::Backend { .. } => FailureKind::Backend,
            GenerationError::EmptyArtifact => FailureKind::EmptyArtifact,
        }
    }

    /// Message shown to the user. Quota exhaustion reads "try later"; the
    /// generic message reads "rephrase".
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::MissingCredential => MSG_MISSING_CREDENTIAL,
            GenerationError::QuotaExceeded { .. } => MSG_BUSY,
            GenerationError::Backend { .. } | GenerationError::EmptyArtifact => MSG_GENERIC,
        }
    }
}
