// SPDX-FileCopyrightText: 2026 Ryze Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so that a misspelled key
//! is reported at startup instead of being silently ignored.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Environment variables consulted for the shared default credential, in order.
pub const DEFAULT_CREDENTIAL_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RyzeConfig {
    /// Application identity and logging.
    #[serde(default)]
    pub app: AppConfig,

    /// Generative backend settings.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Retry/backoff policy for quota errors.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Free-tier cooldown between generation calls.
    #[serde(default)]
    pub cooldown: CooldownConfig,

    /// Saved-project storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// The local user's personal settings.
    #[serde(default)]
    pub user: UserConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "ryze".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Gemini backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Shared default API key. `None` falls back to the environment.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for every generation call.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature. Kept low so the model sticks to raw code.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// API root, without the `/models/...` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Resolves the shared default credential.
    ///
    /// Order: `gemini.api_key`, then the variables in
    /// [`DEFAULT_CREDENTIAL_ENV_VARS`]. Blank values are skipped.
    pub fn default_credential(&self) -> Option<SecretString> {
        resolve_credential(self.api_key.as_deref(), |name| std::env::var(name).ok())
    }
}

/// Credential resolution with an injectable environment lookup.
pub fn resolve_credential(
    configured: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<SecretString> {
    if let Some(key) = configured
        && !key.trim().is_empty()
    {
        return Some(SecretString::from(key.trim().to_string()));
    }
    DEFAULT_CREDENTIAL_ENV_VARS
        .iter()
        .filter_map(|name| env(name))
        .find(|value| !value.trim().is_empty())
        .map(|value| SecretString::from(value.trim().to_string()))
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_top_p() -> f32 {
    0.8
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

/// Retry policy applied to quota errors only.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Retries after the first attempt; total attempts are `max_retries + 1`.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Wait before the first retry, in seconds.
    #[serde(default = "default_initial_delay_secs")]
    pub initial_delay_secs: u64,

    /// Linear growth added to the wait before each further retry, in seconds.
    #[serde(default = "default_backoff_step_secs")]
    pub backoff_step_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_secs: default_initial_delay_secs(),
            backoff_step_secs: default_backoff_step_secs(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_secs() -> u64 {
    10
}

fn default_backoff_step_secs() -> u64 {
    5
}

/// Free-tier cooldown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CooldownConfig {
    /// When false, callers without a personal key are never throttled.
    #[serde(default = "default_cooldown_enabled")]
    pub enabled: bool,

    /// Idle period enforced after each free-tier dispatch, in seconds.
    #[serde(default = "default_cooldown_secs")]
    pub duration_secs: u64,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            enabled: default_cooldown_enabled(),
            duration_secs: default_cooldown_secs(),
        }
    }
}

fn default_cooldown_enabled() -> bool {
    true
}

fn default_cooldown_secs() -> u64 {
    8
}

/// Saved-project storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database holding saved projects.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("ryze").join("projects.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("projects.db"))
        .to_string_lossy()
        .into_owned()
}

/// The local user's personal settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Personal API key. When set, generation bypasses the cooldown and bills
    /// this key instead of the shared default.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl UserConfig {
    /// The personal credential, if a non-blank one is configured.
    pub fn personal_credential(&self) -> Option<SecretString> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| SecretString::from(key.to_string()))
    }
}
