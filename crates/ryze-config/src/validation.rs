// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation.
//!
//! Checks semantic constraints serde cannot express, such as sampling ranges
//! and URL schemes. All violations are collected before returning.

use crate::diagnostic::ConfigError;
use crate::model::RyzeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for `cooldown.duration_secs`: one day.
pub const MAX_COOLDOWN_SECS: u64 = 24 * 60 * 60;
/// Upper bound for each backoff setting in `[generation]`: one hour.
pub const MAX_BACKOFF_SECS: u64 = 60 * 60;

/// Validate a deserialized configuration.
pub fn validate_config(config: &RyzeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let level = config.app.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "app.log_level `{}` is not one of {}",
            config.app.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let gemini = &config.gemini;
    if gemini.model.trim().is_empty() {
        fail("gemini.model must not be empty".to_string());
    }
    if !(0.0..=2.0).contains(&gemini.temperature) {
        fail(format!(
            "gemini.temperature must be within [0, 2], got {}",
            gemini.temperature
        ));
    }
    if !(gemini.top_p > 0.0 && gemini.top_p <= 1.0) {
        fail(format!(
            "gemini.top_p must be within (0, 1], got {}",
            gemini.top_p
        ));
    }
    let base_url = gemini.base_url.trim();
    if base_url.is_empty() {
        fail("gemini.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
        fail(format!(
            "gemini.base_url `{base_url}` must start with http:// or https://"
        ));
    }
    if gemini.timeout_secs == 0 {
        fail("gemini.timeout_secs must be greater than 0".to_string());
    }

    if config.cooldown.enabled && config.cooldown.duration_secs == 0 {
        fail("cooldown.duration_secs must be greater than 0 when the cooldown is enabled".to_string());
    }

    if config.cooldown.duration_secs > MAX_COOLDOWN_SECS {
        fail(format!(
            "cooldown.duration_secs must be at most {MAX_COOLDOWN_SECS}, got {}",
            config.cooldown.duration_secs
        ));
    }

    let generation = &config.generation;
    for (key, value) in [
        ("generation.initial_delay_secs", generation.initial_delay_secs),
        ("generation.backoff_step_secs", generation.backoff_step_secs),
    ] {
        if value > MAX_BACKOFF_SECS {
            fail(format!("{key} must be at most {MAX_BACKOFF_SECS}, got {value}"));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
