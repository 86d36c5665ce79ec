// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ryze config` command implementation.

use colored::Colorize;
use ryze_config::RyzeConfig;

use crate::error::CliError;

const REDACTED: &str = "<redacted>";

/// Reports that the configuration is valid, with a short summary.
///
/// Loading already validated it; an invalid file never gets this far.
pub fn run_check(config: &RyzeConfig) -> Result<(), CliError> {
    println!("{}", "configuration OK".green());
    for line in summary(config) {
        println!("  {line}");
    }
    Ok(())
}

/// Prints the effective configuration as TOML with keys redacted.
pub fn run_show(config: &RyzeConfig) -> Result<(), CliError> {
    let rendered = toml::to_string_pretty(&redacted(config))
        .map_err(|e| ryze_core::RyzeError::Internal(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

fn summary(config: &RyzeConfig) -> Vec<String> {
    let cooldown = if config.cooldown.enabled {
        format!("{}s", config.cooldown.duration_secs)
    } else {
        "disabled".to_string()
    };
    vec![
        format!("model:         {}", config.gemini.model),
        format!(
            "shared key:    {}",
            presence(config.gemini.default_credential().is_some())
        ),
        format!(
            "personal key:  {}",
            presence(config.user.personal_credential().is_some())
        ),
        format!(
            "retries:       {} (first wait {}s, +{}s each)",
            config.generation.max_retries,
            config.generation.initial_delay_secs,
            config.generation.backoff_step_secs
        ),
        format!("cooldown:      {cooldown}"),
        format!("database:      {}", config.storage.database_path),
    ]
}

fn presence(present: bool) -> &'static str {
    if present { "set" } else { "not set" }
}

fn redacted(config: &RyzeConfig) -> RyzeConfig {
    let mut copy = config.clone();
    for key in [&mut copy.gemini.api_key, &mut copy.user.api_key] {
        if key.is_some() {
            *key = Some(REDACTED.to_string());
        }
    }
    copy
}
