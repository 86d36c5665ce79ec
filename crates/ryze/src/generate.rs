// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ryze generate` command implementation.
//!
//! Runs a single turn outside of any session. Each invocation is its own
//! process, so no cooldown applies here.

use std::io::Write;
use std::path::{Path, PathBuf};

use colored::Colorize;
use ryze_config::RyzeConfig;
use ryze_core::GenerationRequest;
use ryze_generation::{ExtractionQuality, GeneratedArtifact, Orchestrator};
use ryze_sandbox::{Device, host_page, to_render_document};
use secrecy::SecretString;
use tracing::info;

use crate::app::build_orchestrator;
use crate::error::CliError;

/// Arguments of `ryze generate`.
#[derive(Debug)]
pub struct GenerateArgs {
    pub description: String,
    pub refine: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub api_key: Option<String>,
}

pub async fn run_generate(config: &RyzeConfig, args: GenerateArgs) -> Result<(), CliError> {
    let orchestrator = build_orchestrator(config)?;
    let personal = args
        .api_key
        .clone()
        .map(SecretString::from)
        .or_else(|| config.user.personal_credential());

    let prior = match &args.refine {
        Some(path) => Some(read_file(path)?),
        None => None,
    };

    let artifact = generate_once(&orchestrator, &args.description, prior, personal).await?;
    if artifact.quality == ExtractionQuality::Degraded {
        eprintln!(
            "{}",
            "warning: the answer was not clean HTML; leading text was dropped".yellow()
        );
    }

    match &args.out {
        Some(path) => {
            write_file(path, &artifact.html)?;
            eprintln!("{} {}", "wrote".green(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", artifact.html)
                .map_err(|e| CliError::io("failed to write", "<stdout>", e))?;
        }
    }

    if let Some(path) = &args.preview {
        let page = host_page(
            &to_render_document(&artifact.html),
            &ryze_session::project_name(&args.description),
            Device::Desktop,
        );
        write_file(path, &page)?;
        eprintln!("{} {}", "preview".green(), path.display());
    }
    Ok(())
}

/// Builds the request for one turn and runs it.
pub async fn generate_once(
    orchestrator: &Orchestrator,
    description: &str,
    prior: Option<String>,
    personal: Option<SecretString>,
) -> Result<GeneratedArtifact, CliError> {
    let request = match prior {
        Some(prior) => GenerationRequest::refine(description, prior)?,
        None => GenerationRequest::create(description)?,
    }
    .with_credential(personal);

    let artifact = orchestrator.generate(&request).await?;
    info!(
        attempts = artifact.attempts,
        html_len = artifact.html.len(),
        "page generated"
    );
    Ok(artifact)
}

pub fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::io("failed to read", path, e))
}

pub fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    std::fs::write(path, contents).map_err(|e| CliError::io("failed to write", path, e))
}
